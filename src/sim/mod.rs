//! Drive simulation module
//!
//! Everything that changes per frame lives here:
//! - Vehicle integration (speed, heading, position)
//! - Chase camera smoothing
//! - Session phase and the per-frame tick
//!
//! No rendering or platform dependencies.

pub mod camera;
pub mod input;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use camera::{CameraFollower, CameraPose, CameraSmoothing};
pub use input::{DriveKey, InputState, KeyTracker};
pub use state::{DrivePhase, DriveSession};
pub use tick::{FrameOutput, tick};
pub use vehicle::{VehicleController, VehiclePose, VehicleState, sanitize_delta};
