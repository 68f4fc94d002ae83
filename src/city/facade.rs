//! Window facade patterns
//!
//! Each building gets a small tiled texture of lit and dark windows in its
//! accent color. The pattern is generated here as plain data; the renderer
//! uploads the rasterized pixels and tiles them across each face.

use glam::Vec3;
use rand::Rng;

use super::palette::{AccentColor, FACADE_BACKGROUND};

/// Facade texture width in texels
pub const FACADE_WIDTH: u32 = 128;
/// Facade texture height in texels
pub const FACADE_HEIGHT: u32 = 256;
/// Distance between window origins
pub const WINDOW_PITCH: u32 = 16;
/// Window edge length
pub const WINDOW_SIZE: u32 = 8;
/// Offset of the first window from the texture edge
pub const WINDOW_INSET: u32 = 4;
/// Chance that a window is lit
pub const LIT_CHANCE: f32 = 0.7;
/// Lit windows have opacity in [MIN_WINDOW_OPACITY, 1)
pub const MIN_WINDOW_OPACITY: f32 = 0.3;

/// World units covered by one facade tile (x, y)
pub const TILE_WORLD_SIZE: (f32, f32) = (8.0, 16.0);

/// A lit window on the facade texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitWindow {
    pub column: u32,
    pub row: u32,
    pub opacity: f32,
}

impl LitWindow {
    /// Top-left texel of the window
    pub fn origin(&self) -> (u32, u32) {
        (
            self.column * WINDOW_PITCH + WINDOW_INSET,
            self.row * WINDOW_PITCH + WINDOW_INSET,
        )
    }
}

/// Lit windows of one facade tile
#[derive(Debug, Clone, PartialEq)]
pub struct FacadePattern {
    pub accent: AccentColor,
    pub windows: Vec<LitWindow>,
}

impl FacadePattern {
    pub const COLUMNS: u32 = FACADE_WIDTH / WINDOW_PITCH;
    pub const ROWS: u32 = FACADE_HEIGHT / WINDOW_PITCH;

    /// Roll every window slot, row by row
    pub fn generate<R: Rng>(accent: AccentColor, rng: &mut R) -> Self {
        let mut windows = Vec::new();
        for row in 0..Self::ROWS {
            for column in 0..Self::COLUMNS {
                if rng.random::<f32>() > 1.0 - LIT_CHANCE {
                    let opacity = MIN_WINDOW_OPACITY + rng.random::<f32>() * (1.0 - MIN_WINDOW_OPACITY);
                    windows.push(LitWindow { column, row, opacity });
                }
            }
        }
        Self { accent, windows }
    }

    /// Facade with every window dark (low quality preset)
    pub fn dark(accent: AccentColor) -> Self {
        Self {
            accent,
            windows: Vec::new(),
        }
    }

    pub fn slot_count() -> usize {
        (Self::COLUMNS * Self::ROWS) as usize
    }

    /// RGBA8 pixels, row-major, `FACADE_WIDTH * FACADE_HEIGHT * 4` bytes
    ///
    /// Windows are alpha-blended over the facade background.
    pub fn rasterize(&self) -> Vec<u8> {
        let background = unpack(FACADE_BACKGROUND);
        let accent = unpack(self.accent.rgb());

        let mut pixels = Vec::with_capacity((FACADE_WIDTH * FACADE_HEIGHT * 4) as usize);
        for _ in 0..FACADE_WIDTH * FACADE_HEIGHT {
            pixels.extend_from_slice(&[background[0], background[1], background[2], 255]);
        }

        for window in &self.windows {
            let color = blend(accent, background, window.opacity);
            let (x0, y0) = window.origin();
            for y in y0..y0 + WINDOW_SIZE {
                for x in x0..x0 + WINDOW_SIZE {
                    let i = ((y * FACADE_WIDTH + x) * 4) as usize;
                    pixels[i..i + 3].copy_from_slice(&color);
                }
            }
        }

        pixels
    }
}

/// How many times the facade tile repeats across a face of `size` (width, height)
pub fn texture_repeat(size: Vec3) -> (f32, f32) {
    (size.x / TILE_WORLD_SIZE.0, size.y / TILE_WORLD_SIZE.1)
}

fn unpack(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

fn blend(top: [u8; 3], bottom: [u8; 3], alpha: f32) -> [u8; 3] {
    let mix = |t: u8, b: u8| (t as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
    [mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2])]
}
