//! Neon palette
//!
//! Building bodies use one of four near-black blues; every lit detail
//! (windows, rooftop edges, signs) uses one of four neon accents.

use serde::{Deserialize, Serialize};

/// Convert a packed `0xRRGGBB` color to linear-ish RGBA floats
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}

/// CSS-style hex string for a packed color
pub fn rgb_to_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00ff_ffff)
}

/// Building body color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseColor {
    Midnight,
    Void,
    Indigo,
    Abyss,
}

impl BaseColor {
    pub const ALL: [BaseColor; 4] = [
        BaseColor::Midnight,
        BaseColor::Void,
        BaseColor::Indigo,
        BaseColor::Abyss,
    ];

    pub const fn rgb(&self) -> u32 {
        match self {
            BaseColor::Midnight => 0x1a1a2e,
            BaseColor::Void => 0x0a0a1a,
            BaseColor::Indigo => 0x151530,
            BaseColor::Abyss => 0x0f0f25,
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        rgb_to_rgba(self.rgb(), 1.0)
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb())
    }
}

/// Neon accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccentColor {
    Pink,
    Cyan,
    Purple,
    Orange,
}

impl AccentColor {
    pub const ALL: [AccentColor; 4] = [
        AccentColor::Pink,
        AccentColor::Cyan,
        AccentColor::Purple,
        AccentColor::Orange,
    ];

    pub const fn rgb(&self) -> u32 {
        match self {
            AccentColor::Pink => 0xff2d95,
            AccentColor::Cyan => 0x00f0ff,
            AccentColor::Purple => 0xa855f7,
            AccentColor::Orange => 0xff6b2b,
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        rgb_to_rgba(self.rgb(), 1.0)
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb())
    }
}

/// Unlit facade behind the windows
pub const FACADE_BACKGROUND: u32 = 0x0a0a15;
