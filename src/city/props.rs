//! Street furniture and time-driven glow
//!
//! Fixed placements for roads, street lights and neon signs, plus the
//! flicker curves the renderer samples every frame.

use glam::Vec3;
use serde::Serialize;

use super::palette::AccentColor;

/// Road strip width
pub const ROAD_WIDTH: f32 = 12.0;
/// Road strip length
pub const ROAD_LENGTH: f32 = 200.0;
/// World length covered by one road-marking texture tile
pub const ROAD_MARKING_TILE: f32 = 10.0;

/// Street lights stand this far either side of a road center line
pub const STREET_LIGHT_OFFSET: f32 = 7.0;
/// Lights run from -STREET_LIGHT_REACH to +STREET_LIGHT_REACH
pub const STREET_LIGHT_REACH: i32 = 80;
pub const STREET_LIGHT_SPACING: usize = 20;
/// Height of the lamp above the post base
pub const LAMP_HEIGHT: f32 = 7.5;

/// Which way a road strip runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoadAxis {
    /// Runs along z
    NorthSouth,
    /// Runs along x
    EastWest,
}

/// A flat road strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoadSegment {
    pub center: Vec3,
    pub axis: RoadAxis,
    pub width: f32,
    pub length: f32,
}

impl RoadSegment {
    fn new(x: f32, z: f32, axis: RoadAxis) -> Self {
        Self {
            center: Vec3::new(x, 0.01, z),
            axis,
            width: ROAD_WIDTH,
            length: ROAD_LENGTH,
        }
    }

    /// Yaw of the strip (0 runs along z)
    pub fn rotation(&self) -> f32 {
        match self.axis {
            RoadAxis::NorthSouth => 0.0,
            RoadAxis::EastWest => std::f32::consts::FRAC_PI_2,
        }
    }

    /// Road marking repeats along the strip
    pub fn marking_repeat(&self) -> f32 {
        self.length / ROAD_MARKING_TILE
    }
}

/// Main cross through the origin plus the two parallel pairs at ±50
pub fn roads() -> Vec<RoadSegment> {
    vec![
        RoadSegment::new(0.0, 0.0, RoadAxis::NorthSouth),
        RoadSegment::new(0.0, 0.0, RoadAxis::EastWest),
        RoadSegment::new(50.0, 0.0, RoadAxis::NorthSouth),
        RoadSegment::new(-50.0, 0.0, RoadAxis::NorthSouth),
        RoadSegment::new(0.0, 50.0, RoadAxis::EastWest),
        RoadSegment::new(0.0, -50.0, RoadAxis::EastWest),
    ]
}

/// A lamp post
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreetLight {
    /// Base of the post
    pub position: Vec3,
}

impl StreetLight {
    pub fn lamp_position(&self) -> Vec3 {
        self.position + Vec3::Y * LAMP_HEIGHT
    }
}

/// Lamp posts lining both sides of the two main roads
pub fn street_lights() -> Vec<StreetLight> {
    let offset = STREET_LIGHT_OFFSET;
    (-STREET_LIGHT_REACH..=STREET_LIGHT_REACH)
        .step_by(STREET_LIGHT_SPACING)
        .flat_map(|i| {
            let i = i as f32;
            [
                Vec3::new(offset, 0.0, i),
                Vec3::new(-offset, 0.0, i),
                Vec3::new(i, 0.0, offset),
                Vec3::new(i, 0.0, -offset),
            ]
        })
        .map(|position| StreetLight { position })
        .collect()
}

/// A glowing sign hung on the plaza corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeonSign {
    pub text: &'static str,
    pub position: Vec3,
    pub color: AccentColor,
}

pub fn neon_signs() -> [NeonSign; 4] {
    [
        NeonSign {
            text: "CYBER",
            position: Vec3::new(-25.0, 15.0, -25.0),
            color: AccentColor::Pink,
        },
        NeonSign {
            text: "NEON",
            position: Vec3::new(25.0, 20.0, 25.0),
            color: AccentColor::Cyan,
        },
        NeonSign {
            text: "DRIVE",
            position: Vec3::new(-25.0, 12.0, 25.0),
            color: AccentColor::Purple,
        },
        NeonSign {
            text: "ZONE",
            position: Vec3::new(25.0, 18.0, -25.0),
            color: AccentColor::Orange,
        },
    ]
}

/// Window emissive intensity for a building at world `x`, in [0.2, 0.4]
pub fn window_glow(elapsed: f32, x: f32) -> f32 {
    0.3 + (elapsed * 2.0 + x).sin() * 0.1
}

/// Sign opacity: steady 0.8 with brief drops to half
pub fn sign_opacity(elapsed: f32, x: f32) -> f32 {
    let flicker = if (elapsed * 10.0 + x).sin() > 0.9 { 0.5 } else { 1.0 };
    0.8 * flicker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_light_layout() {
        let lights = street_lights();
        assert_eq!(lights.len(), 36);
        assert_eq!(lights[0].position, Vec3::new(7.0, 0.0, -80.0));
        assert_eq!(lights[35].position, Vec3::new(80.0, 0.0, -7.0));
        assert!(lights.iter().all(|l| l.position.y == 0.0));
        assert_eq!(lights[0].lamp_position().y, LAMP_HEIGHT);
    }

    #[test]
    fn test_roads() {
        let roads = roads();
        assert_eq!(roads.len(), 6);
        let along_z = roads.iter().filter(|r| r.axis == RoadAxis::NorthSouth).count();
        assert_eq!(along_z, 3);
        assert_eq!(roads[0].marking_repeat(), 20.0);
        assert_eq!(roads[1].rotation(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_signs() {
        let signs = neon_signs();
        let texts: Vec<&str> = signs.iter().map(|s| s.text).collect();
        assert_eq!(texts, ["CYBER", "NEON", "DRIVE", "ZONE"]);
    }

    #[test]
    fn test_window_glow_range() {
        for i in 0..500 {
            let glow = window_glow(i as f32 * 0.037, -75.0 + i as f32);
            assert!((0.2 - 1e-6..=0.4 + 1e-6).contains(&glow));
        }
        assert!((window_glow(0.0, 0.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_sign_flicker() {
        // sin(pi/2) = 1 > 0.9
        let t = std::f32::consts::FRAC_PI_2 / 10.0;
        assert_eq!(sign_opacity(t, 0.0), 0.4);
        assert_eq!(sign_opacity(0.0, 0.0), 0.8);
    }
}
