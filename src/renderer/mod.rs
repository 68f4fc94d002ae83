//! Render bridge
//!
//! Drawing happens in the page's WebGPU scene. This module only packs the
//! city and per-frame state into flat buffers for it.

pub mod instances;

pub use instances::{
    BuildingInstance, FrameUniform, PropInstance, PropKind, as_floats, glow_levels, pack_buildings, pack_props,
};
