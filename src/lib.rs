//! Neon Drive - An arcade drive through a procedural neon city
//!
//! Core modules:
//! - `sim`: Vehicle simulation, chase camera, per-frame session tick
//! - `city`: Procedural city layout and street props
//! - `hud`: Speed readout policy
//! - `renderer`: Packed instance/uniform records for the page's renderer
//! - `settings`: Persisted player preferences

pub mod city;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use city::{BuildingDescriptor, CityLayoutGenerator, GridConfig};
pub use hud::SpeedReadout;
pub use settings::{QualityPreset, Settings};

use glam::Vec3;

/// Simulation constants
pub mod consts {
    use glam::Vec3;

    /// Forward/backward acceleration (units/s²)
    pub const ACCELERATION: f32 = 8.0;
    /// Top forward speed (units/s)
    pub const MAX_SPEED: f32 = 4.0;
    /// Reverse is capped at half of top speed
    pub const REVERSE_SPEED_CAP: f32 = MAX_SPEED * 0.5;
    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.98;
    /// Velocity multiplier applied while braking
    pub const BRAKE_FORCE: f32 = 0.92;
    /// Yaw rate (rad/s)
    pub const TURN_SPEED: f32 = 2.5;
    /// Steering only works above this speed
    pub const TURN_THRESHOLD: f32 = 0.1;
    /// World units travelled per velocity unit per second
    pub const WORLD_SCALE: f32 = 10.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
    /// Nominal host frame rate used for frame-rate independent smoothing
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Chase camera distance behind the vehicle
    pub const CAMERA_DISTANCE: f32 = 12.0;
    /// Chase camera height above the vehicle
    pub const CAMERA_HEIGHT: f32 = 5.0;
    /// Fraction of the remaining distance the camera closes each tick
    pub const CAMERA_SMOOTHING: f32 = 0.05;
    /// Camera aims this far above the vehicle origin
    pub const LOOK_AT_HEIGHT: f32 = 1.0;
    /// Camera position before the first tick
    pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 5.0, 10.0);

    /// HUD shows |velocity| * 50 as km/h
    pub const SPEED_DISPLAY_SCALE: f32 = 50.0;
    /// Wheel spin (rad/s), purely cosmetic
    pub const WHEEL_SPIN_RATE: f32 = 10.0;
}

/// Unit forward vector for a yaw angle (heading 0 faces +z)
#[inline]
pub fn heading_direction(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Sign of a velocity as used for steering: +1 moving forward, -1 otherwise
#[inline]
pub fn travel_sign(velocity: f32) -> f32 {
    if velocity > 0.0 { 1.0 } else { -1.0 }
}
