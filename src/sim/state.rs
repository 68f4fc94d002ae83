//! Drive session state
//!
//! One session per page load: the generated city, the vehicle, the camera
//! and the clock used by flicker effects.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraFollower;
use super::tick::FrameOutput;
use super::vehicle::VehicleController;
use crate::city::{BuildingDescriptor, CityLayoutGenerator};
use crate::settings::Settings;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivePhase {
    /// Start screen; the world renders but nothing drives
    #[default]
    Title,
    /// Player has control
    Driving,
}

/// Everything the frame loop needs
#[derive(Debug, Clone)]
pub struct DriveSession {
    /// Seed the city was generated from
    pub seed: u64,
    pub phase: DrivePhase,
    pub vehicle: VehicleController,
    pub camera: CameraFollower,
    /// Building list, fixed for the session
    pub buildings: Vec<BuildingDescriptor>,
    /// Seconds since the session was created (sanitized deltas)
    pub elapsed: f32,
    /// Cosmetic wheel rotation (radians)
    pub wheel_spin: f32,
}

impl DriveSession {
    /// Create a session with a default city generated from `seed`
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let buildings = CityLayoutGenerator::default().generate(&mut rng);
        log::info!("City generated from seed {}: {} buildings", seed, buildings.len());
        Self::with_buildings(seed, buildings, settings)
    }

    /// Create a session around an already generated city
    pub fn with_buildings(seed: u64, buildings: Vec<BuildingDescriptor>, settings: &Settings) -> Self {
        Self {
            seed,
            phase: DrivePhase::Title,
            vehicle: VehicleController::new().with_max_delta(settings.max_frame_delta),
            camera: CameraFollower::default().with_smoothing(settings.camera_smoothing),
            buildings,
            elapsed: 0.0,
            wheel_spin: 0.0,
        }
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == DrivePhase::Title {
            log::info!("Drive started");
            self.phase = DrivePhase::Driving;
        }
    }

    pub fn is_driving(&self) -> bool {
        self.phase == DrivePhase::Driving
    }

    /// Current poses without advancing anything (start screen frames)
    pub fn current_frame(&self) -> FrameOutput {
        FrameOutput {
            vehicle: self.vehicle.pose(),
            camera: self.camera.pose(),
            elapsed: self.elapsed,
            wheel_spin: self.wheel_spin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_title() {
        let session = DriveSession::new(7, &Settings::default());
        assert_eq!(session.phase, DrivePhase::Title);
        assert!(!session.is_driving());
        assert_eq!(session.buildings.len(), 52);
        assert_eq!(session.vehicle.state().velocity, 0.0);
    }

    #[test]
    fn test_same_seed_same_city() {
        let a = DriveSession::new(424242, &Settings::default());
        let b = DriveSession::new(424242, &Settings::default());
        assert_eq!(a.buildings, b.buildings);

        let c = DriveSession::new(424243, &Settings::default());
        assert_ne!(a.buildings, c.buildings);
    }

    #[test]
    fn test_settings_flow_into_components() {
        let settings = Settings {
            max_frame_delta: 0.05,
            camera_smoothing: crate::sim::CameraSmoothing::FrameRateIndependent,
            ..Default::default()
        };
        let session = DriveSession::new(1, &settings);
        assert_eq!(session.vehicle.max_delta(), 0.05);
        assert_eq!(
            session.camera.smoothing(),
            crate::sim::CameraSmoothing::FrameRateIndependent
        );
    }

    #[test]
    fn test_current_frame_on_title() {
        let session = DriveSession::new(11, &Settings::default());
        let frame = session.current_frame();
        assert_eq!(frame.vehicle.position, glam::Vec3::ZERO);
        assert_eq!(frame.camera.position, crate::consts::INITIAL_CAMERA_POSITION);
        assert_eq!(frame.speed(), 0.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut session = DriveSession::new(3, &Settings::default());
        session.start();
        session.start();
        assert_eq!(session.phase, DrivePhase::Driving);
    }
}
