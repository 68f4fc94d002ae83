//! Chase camera
//!
//! Sits behind and above the vehicle, rotated with its heading. Only the
//! position lags; the look-at point tracks the vehicle directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::vehicle::VehiclePose;
use crate::consts::*;
use crate::heading_direction;

/// How the smoothing factor relates to frame time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraSmoothing {
    /// Fixed fraction per tick. Lag depends on the host frame rate.
    #[default]
    PerTick,
    /// Fraction scaled by delta so the lag matches a 60 Hz host at any rate
    FrameRateIndependent,
}

impl CameraSmoothing {
    /// Lerp factor for a frame of `delta` seconds
    pub fn factor(&self, delta: f32) -> f32 {
        match self {
            CameraSmoothing::PerTick => CAMERA_SMOOTHING,
            CameraSmoothing::FrameRateIndependent => {
                let frames = delta.max(0.0) * REFERENCE_FRAME_RATE;
                1.0 - (1.0 - CAMERA_SMOOTHING).powf(frames)
            }
        }
    }
}

/// Camera placement for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Smoothly follows a vehicle pose
#[derive(Debug, Clone)]
pub struct CameraFollower {
    position: Vec3,
    look_at: Vec3,
    smoothing: CameraSmoothing,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(INITIAL_CAMERA_POSITION)
    }
}

impl CameraFollower {
    /// Camera resting at `position`, looking down -z until the first step
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            look_at: position - Vec3::Z,
            smoothing: CameraSmoothing::default(),
        }
    }

    pub fn with_smoothing(mut self, smoothing: CameraSmoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn smoothing(&self) -> CameraSmoothing {
        self.smoothing
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
        }
    }

    /// Where the camera wants to be for a given vehicle pose
    pub fn target_position(vehicle_position: Vec3, heading: f32) -> Vec3 {
        let behind = -heading_direction(heading) * CAMERA_DISTANCE;
        vehicle_position + behind + Vec3::Y * CAMERA_HEIGHT
    }

    /// Move toward the chase position and aim at the vehicle
    pub fn step(&mut self, vehicle: &VehiclePose, delta: f32) -> CameraPose {
        let target = Self::target_position(vehicle.position, vehicle.heading);
        let t = self.smoothing.factor(delta);
        self.position = self.position.lerp(target, t);
        self.look_at = vehicle.position + Vec3::Y * LOOK_AT_HEIGHT;
        self.pose()
    }
}
