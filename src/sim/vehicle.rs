//! Arcade vehicle model
//!
//! A single scalar speed along the heading, no tyres and no collisions.
//! Acceleration and friction are both active every tick, so top speed is
//! an equilibrium just under [`MAX_SPEED`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use crate::consts::*;
use crate::{heading_direction, travel_sign};

/// Mutable vehicle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Signed forward speed, in [-REVERSE_SPEED_CAP, MAX_SPEED]
    pub velocity: f32,
    /// Yaw in radians, accumulates without wrapping
    pub heading: f32,
    /// World position (y stays at ground level)
    pub position: Vec3,
}

/// What the vehicle reports after a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    pub position: Vec3,
    pub heading: f32,
    /// Signed speed; the HUD takes the absolute value
    pub velocity: f32,
}

impl From<VehicleState> for VehiclePose {
    fn from(state: VehicleState) -> Self {
        Self {
            position: state.position,
            heading: state.heading,
            velocity: state.velocity,
        }
    }
}

/// Clamp a host frame delta into `[0, max_delta]`; NaN becomes 0
#[inline]
pub fn sanitize_delta(delta: f32, max_delta: f32) -> f32 {
    if delta.is_nan() || delta <= 0.0 {
        0.0
    } else {
        delta.min(max_delta)
    }
}

/// Owns and integrates the vehicle state
#[derive(Debug, Clone)]
pub struct VehicleController {
    state: VehicleState,
    max_delta: f32,
}

impl Default for VehicleController {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleController {
    /// Vehicle at rest at the origin, facing +z
    pub fn new() -> Self {
        Self::from_state(VehicleState::default())
    }

    /// Start from an explicit state. Velocity is clamped into the legal
    /// range and the vehicle is put back on the ground.
    pub fn from_state(mut state: VehicleState) -> Self {
        state.velocity = state.velocity.clamp(-REVERSE_SPEED_CAP, MAX_SPEED);
        state.position.y = 0.0;
        Self {
            state,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Override the frame delta cap. Non-finite or non-positive caps are ignored.
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        if max_delta.is_finite() && max_delta > 0.0 {
            self.max_delta = max_delta;
        } else {
            log::warn!("Ignoring invalid max frame delta {}", max_delta);
        }
        self
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn pose(&self) -> VehiclePose {
        self.state.into()
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Advance one frame
    pub fn step(&mut self, input: &InputState, delta: f32) -> VehiclePose {
        let dt = sanitize_delta(delta, self.max_delta);
        if dt != delta {
            log::debug!("Frame delta {} corrected to {}", delta, dt);
        }

        let state = &mut self.state;

        // Throttle. Both directions may apply in the same tick.
        if input.forward {
            state.velocity = (state.velocity + ACCELERATION * dt).min(MAX_SPEED);
        }
        if input.backward {
            state.velocity = (state.velocity - ACCELERATION * dt).max(-REVERSE_SPEED_CAP);
        }

        if input.brake {
            state.velocity *= BRAKE_FORCE;
        }
        state.velocity *= FRICTION;

        // Steering flips in reverse so left always swings the nose the same way on screen
        if state.velocity.abs() > TURN_THRESHOLD {
            let turn = TURN_SPEED * dt * travel_sign(state.velocity);
            if input.left {
                state.heading += turn;
            }
            if input.right {
                state.heading -= turn;
            }
        }

        state.position += heading_direction(state.heading) * (state.velocity * dt * WORLD_SCALE);

        self.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn forward() -> InputState {
        InputState {
            forward: true,
            ..Default::default()
        }
    }

    fn moving_at(velocity: f32) -> VehicleController {
        VehicleController::from_state(VehicleState {
            velocity,
            ..Default::default()
        })
    }

    #[test]
    fn test_forward_settles_below_max_speed() {
        let mut vehicle = VehicleController::new();
        let mut last = 0.0;
        for _ in 0..2000 {
            last = vehicle.step(&forward(), DT).velocity;
            assert!(last <= MAX_SPEED);
        }
        // Clamp to 4 then friction: 4 * 0.98
        assert!((last - MAX_SPEED * FRICTION).abs() < 1e-5);

        // Stable, not oscillating
        let next = vehicle.step(&forward(), DT).velocity;
        assert!((next - last).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_cap() {
        let mut vehicle = VehicleController::new();
        let input = InputState {
            backward: true,
            ..Default::default()
        };
        let mut velocity = 0.0;
        for _ in 0..2000 {
            velocity = vehicle.step(&input, DT).velocity;
            assert!(velocity >= -REVERSE_SPEED_CAP);
        }
        assert!((velocity + REVERSE_SPEED_CAP * FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_no_turn_when_stopped() {
        let mut vehicle = VehicleController::new();
        let left = InputState {
            left: true,
            ..Default::default()
        };
        let right = InputState {
            right: true,
            ..Default::default()
        };
        assert_eq!(vehicle.step(&left, DT).heading, 0.0);
        assert_eq!(vehicle.step(&right, DT).heading, 0.0);
    }

    #[test]
    fn test_no_turn_below_threshold() {
        // Friction takes 0.1 under the threshold before steering is checked
        let mut vehicle = moving_at(0.1);
        let left = InputState {
            left: true,
            ..Default::default()
        };
        let pose = vehicle.step(&left, DT);
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn test_turning_reverses_with_travel_direction() {
        let left = InputState {
            left: true,
            ..Default::default()
        };

        let mut ahead = moving_at(3.0);
        let heading = ahead.step(&left, DT).heading;
        assert!((heading - TURN_SPEED * DT).abs() < 1e-6);

        let mut reversing = moving_at(-1.5);
        let heading = reversing.step(&left, DT).heading;
        assert!((heading + TURN_SPEED * DT).abs() < 1e-6);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut vehicle = moving_at(3.0);
        let both = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        let pose = vehicle.step(&both, DT);
        assert!(pose.heading.abs() < 1e-7);
    }

    #[test]
    fn test_idle_decay() {
        let v0 = 3.0;
        let mut vehicle = moving_at(v0);
        let idle = InputState::default();

        let first = vehicle.step(&idle, DT).velocity;
        assert_eq!(first, v0 * FRICTION);

        let mut expected = first;
        for n in 2..=50 {
            expected *= FRICTION;
            let velocity = vehicle.step(&idle, DT).velocity;
            assert_eq!(velocity, expected);
            assert!((velocity - v0 * FRICTION.powi(n)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_brake_and_friction_stack() {
        let mut vehicle = moving_at(2.0);
        let brake = InputState {
            brake: true,
            ..Default::default()
        };
        let velocity = vehicle.step(&brake, DT).velocity;
        assert!((velocity - 2.0 * BRAKE_FORCE * FRICTION).abs() < 1e-6);
    }

    #[test]
    fn test_forward_and_backward_same_tick() {
        let mut vehicle = moving_at(1.0);
        let both = InputState {
            forward: true,
            backward: true,
            ..Default::default()
        };
        // +a*dt then -a*dt, then friction
        let velocity = vehicle.step(&both, DT).velocity;
        assert!((velocity - 1.0 * FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_golden_trace_one_second_forward() {
        let mut vehicle = VehicleController::new();

        // Reference integration of the per-tick formula in f64
        let dt = 1.0_f64 / 60.0;
        let mut v = 0.0_f64;
        let mut z = 0.0_f64;
        let mut last_z = 0.0_f32;

        for tick in 1..=60 {
            let pose = vehicle.step(&forward(), DT);

            v = (v + 8.0 * dt).min(4.0) * 0.98;
            z += v * dt * 10.0;

            assert!((pose.velocity as f64 - v).abs() < 1e-5, "tick {tick}");
            assert!((pose.position.z as f64 - z).abs() < 1e-3, "tick {tick}");
            assert!(pose.position.z > last_z, "z must increase at tick {tick}");
            assert_eq!(pose.position.x, 0.0);
            assert_eq!(pose.position.y, 0.0);
            assert_eq!(pose.heading, 0.0);
            last_z = pose.position.z;

            if tick == 1 {
                assert!((pose.velocity - 0.130_666_67).abs() < 1e-6);
                assert!((pose.position.z - 0.021_777_78).abs() < 1e-6);
            }
            if tick == 2 {
                assert!((pose.velocity - 0.258_72).abs() < 1e-6);
                assert!((pose.position.z - 0.064_897_78).abs() < 1e-5);
            }
            if tick == 10 {
                assert!((pose.velocity - 1.195_124).abs() < 1e-4);
            }
        }

        // Clamp first bites at tick 46; by one second it sits at equilibrium
        assert!((vehicle.state().velocity - 3.92).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_delta_is_corrected() {
        let mut vehicle = moving_at(2.0);
        let before = vehicle.state().position;

        let pose = vehicle.step(&forward(), f32::NAN);
        assert_eq!(pose.position, before);
        // Friction is per tick and still applies
        assert!((pose.velocity - 2.0 * FRICTION).abs() < 1e-6);

        let pose = vehicle.step(&forward(), -1.0);
        assert_eq!(pose.position, before);
    }

    #[test]
    fn test_large_delta_is_capped() {
        let mut capped = VehicleController::new();
        let mut reference = VehicleController::new();
        let stalled = capped.step(&forward(), 5.0);
        let nominal = reference.step(&forward(), MAX_FRAME_DELTA);
        assert_eq!(stalled, nominal);
    }

    #[test]
    fn test_custom_max_delta() {
        let vehicle = VehicleController::new().with_max_delta(0.25);
        assert_eq!(vehicle.max_delta(), 0.25);
        let vehicle = VehicleController::new().with_max_delta(f32::INFINITY);
        assert_eq!(vehicle.max_delta(), MAX_FRAME_DELTA);
        let vehicle = VehicleController::new().with_max_delta(0.0);
        assert_eq!(vehicle.max_delta(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_from_state_clamps_and_grounds() {
        let vehicle = VehicleController::from_state(VehicleState {
            velocity: 9.0,
            heading: 7.0,
            position: Vec3::new(1.0, 3.0, 2.0),
        });
        assert_eq!(vehicle.state().velocity, MAX_SPEED);
        assert_eq!(vehicle.state().heading, 7.0);
        assert_eq!(vehicle.state().position, Vec3::new(1.0, 0.0, 2.0));

        let vehicle = moving_at(-5.0);
        assert_eq!(vehicle.state().velocity, -REVERSE_SPEED_CAP);
    }

    #[test]
    fn test_heading_not_wrapped() {
        let mut vehicle = moving_at(3.0);
        let input = InputState {
            forward: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..600 {
            vehicle.step(&input, DT);
        }
        // 10 s at 2.5 rad/s
        assert!(vehicle.state().heading > std::f32::consts::TAU);
    }

    proptest! {
        #[test]
        fn prop_velocity_stays_in_range(
            ticks in prop::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..0.2),
                1..200,
            )
        ) {
            let mut vehicle = VehicleController::new();
            for (forward, backward, left, right, brake, dt) in ticks {
                let input = InputState { forward, backward, left, right, brake };
                let heading_before = vehicle.state().heading;
                let pose = vehicle.step(&input, dt);

                prop_assert!(pose.velocity <= MAX_SPEED);
                prop_assert!(pose.velocity >= -REVERSE_SPEED_CAP);
                prop_assert_eq!(pose.position.y, 0.0);
                if pose.velocity.abs() <= TURN_THRESHOLD {
                    prop_assert_eq!(pose.heading, heading_before);
                }
            }
        }
    }
}
