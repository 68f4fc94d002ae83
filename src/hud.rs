//! HUD speed readout
//!
//! The simulation reports a signed velocity; the HUD shows its magnitude
//! scaled to a km/h-style integer and turns pink past the redline.

use serde::Serialize;

use crate::consts::SPEED_DISPLAY_SCALE;

/// Readout above this value is shown in the hot color
pub const REDLINE: u32 = 100;
/// Unit label under the number
pub const SPEED_UNIT: &str = "km/h";
/// Readout color below the redline
pub const CRUISE_COLOR: &str = "#00f0ff";
/// Readout color above the redline
pub const REDLINE_COLOR: &str = "#ff2d95";

/// What the speedometer shows for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeedReadout {
    pub value: u32,
    pub redline: bool,
}

impl SpeedReadout {
    /// `round(|velocity| * 50)`; reverse shows as a positive speed
    pub fn from_velocity(velocity: f32) -> Self {
        let value = if velocity.is_finite() {
            (velocity.abs() * SPEED_DISPLAY_SCALE).round() as u32
        } else {
            0
        };
        Self {
            value,
            redline: value > REDLINE,
        }
    }

    pub fn color(&self) -> &'static str {
        if self.redline { REDLINE_COLOR } else { CRUISE_COLOR }
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }

    /// Number with its unit, for accessible labels
    pub fn label(&self) -> String {
        format!("{} {}", self.value, SPEED_UNIT)
    }
}
