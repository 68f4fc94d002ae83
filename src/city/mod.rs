//! City generation
//!
//! Built once when the session starts; nothing here changes per frame
//! except the flicker curves, which are pure functions of time.

pub mod facade;
pub mod layout;
pub mod palette;
pub mod props;

pub use facade::{FacadePattern, texture_repeat};
pub use layout::{BuildingDescriptor, CityLayoutGenerator, ExclusionRule, GridCell, GridConfig, SizeRange};
pub use palette::{AccentColor, BaseColor};
pub use props::{NeonSign, RoadSegment, StreetLight, neon_signs, roads, sign_opacity, street_lights, window_glow};
