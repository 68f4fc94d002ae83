//! Per-frame tick
//!
//! Called once per rendered frame with the host's elapsed time. Vehicle
//! first, then the camera chases the vehicle's new pose.

use serde::{Deserialize, Serialize};

use super::camera::CameraPose;
use super::input::InputState;
use super::state::{DrivePhase, DriveSession};
use super::vehicle::{VehiclePose, sanitize_delta};
use crate::consts::WHEEL_SPIN_RATE;

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub vehicle: VehiclePose,
    pub camera: CameraPose,
    /// Session clock for flicker effects
    pub elapsed: f32,
    /// Wheel rotation about the axle
    pub wheel_spin: f32,
}

impl FrameOutput {
    /// Signed speed for the HUD
    pub fn speed(&self) -> f32 {
        self.vehicle.velocity
    }
}

/// Advance the session by one frame
///
/// Returns `None` while the start screen is up: the clock and the wheels run
/// so the scene stays alive, but the vehicle and camera stay put.
/// `DriveSession::current_frame` picks up the spin for those frames.
pub fn tick(session: &mut DriveSession, input: &InputState, delta: f32) -> Option<FrameOutput> {
    let dt = sanitize_delta(delta, session.vehicle.max_delta());
    session.elapsed += dt;
    // Fixed rate, independent of speed and phase
    session.wheel_spin -= dt * WHEEL_SPIN_RATE;

    if session.phase == DrivePhase::Title {
        return None;
    }

    let vehicle = session.vehicle.step(input, delta);
    let camera = session.camera.step(&vehicle, dt);

    Some(FrameOutput {
        vehicle,
        camera,
        elapsed: session.elapsed,
        wheel_spin: session.wheel_spin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> DriveSession {
        DriveSession::with_buildings(1, Vec::new(), &Settings::default())
    }

    #[test]
    fn test_title_phase_holds_vehicle() {
        let mut session = session();
        let input = InputState {
            forward: true,
            ..Default::default()
        };
        for _ in 0..30 {
            assert!(tick(&mut session, &input, DT).is_none());
        }
        assert_eq!(session.vehicle.state().position, Vec3::ZERO);
        assert_eq!(session.camera.pose().position, INITIAL_CAMERA_POSITION);
        assert!((session.elapsed - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_wheels_spin_behind_start_screen() {
        let mut session = session();
        for _ in 0..30 {
            assert!(tick(&mut session, &InputState::default(), DT).is_none());
        }
        let frame = session.current_frame();
        assert!((frame.wheel_spin + 0.5 * WHEEL_SPIN_RATE).abs() < 1e-3);
        assert_eq!(frame.vehicle.position, Vec3::ZERO);
    }

    #[test]
    fn test_driving_advances_vehicle_then_camera() {
        let mut session = session();
        session.start();
        let input = InputState {
            forward: true,
            ..Default::default()
        };
        let frame = tick(&mut session, &input, DT).expect("driving");
        assert!(frame.vehicle.position.z > 0.0);
        assert!(frame.speed() > 0.0);
        assert_eq!(frame.camera.look_at, frame.vehicle.position + Vec3::Y * LOOK_AT_HEIGHT);
        assert!((frame.wheel_spin + DT * WHEEL_SPIN_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut session = session();
        session.start();
        let input = InputState {
            forward: true,
            ..Default::default()
        };
        let frame = tick(&mut session, &input, 3.0).expect("driving");
        assert!((frame.elapsed - MAX_FRAME_DELTA).abs() < 1e-6);
        // One capped step: (0 + 8 * 0.1) * 0.98 * 0.1 * 10
        assert!((frame.vehicle.position.z - 0.784).abs() < 1e-5);
    }

    #[test]
    fn test_camera_trails_behind_when_cruising() {
        let mut session = session();
        session.start();
        let input = InputState {
            forward: true,
            ..Default::default()
        };
        let mut frame = None;
        for _ in 0..600 {
            frame = tick(&mut session, &input, DT);
        }
        let frame = frame.expect("driving");
        // Heading 0: camera behind on -z and above
        assert!(frame.camera.position.z < frame.vehicle.position.z);
        assert!(frame.camera.position.y > 0.0);
    }
}
