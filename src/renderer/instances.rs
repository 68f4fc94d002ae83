//! GPU-ready records for the page's renderer
//!
//! Plain `#[repr(C)]` structs that cast straight to `f32` slices, so the
//! JavaScript side can copy them into a `Float32Array` and upload as-is.

use bytemuck::{Pod, Zeroable};

use crate::city::props::{LAMP_HEIGHT, RoadSegment};
use crate::city::{
    AccentColor, BuildingDescriptor, neon_signs, roads, sign_opacity, street_lights, texture_repeat, window_glow,
};
use crate::sim::FrameOutput;

/// Sign backing board (width, height)
pub const SIGN_SIZE: (f32, f32) = (6.0, 2.0);
/// Window glow when flicker is off
pub const STEADY_WINDOW_GLOW: f32 = 0.3;
/// Sign opacity when flicker is off
pub const STEADY_SIGN_OPACITY: f32 = 0.8;

/// One building box, 16 floats
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BuildingInstance {
    /// Box center; w = facade repeat across the width
    pub position: [f32; 4],
    /// Width, height, depth; w = facade repeat up the height
    pub size: [f32; 4],
    pub base_color: [f32; 4],
    pub accent_color: [f32; 4],
}

impl BuildingInstance {
    pub const FLOATS: usize = std::mem::size_of::<Self>() / std::mem::size_of::<f32>();

    pub fn from_descriptor(building: &BuildingDescriptor) -> Self {
        let (repeat_u, repeat_v) = texture_repeat(building.size);
        Self {
            position: building.position.extend(repeat_u).to_array(),
            size: building.size.extend(repeat_v).to_array(),
            base_color: building.base_color.rgba(),
            accent_color: building.accent_color.rgba(),
        }
    }
}

/// Pack the whole city for one upload
pub fn pack_buildings(buildings: &[BuildingDescriptor]) -> Vec<BuildingInstance> {
    buildings.iter().map(BuildingInstance::from_descriptor).collect()
}

/// Kind tag stored in `PropInstance::position[3]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PropKind {
    StreetLight = 0,
    Sign = 1,
    Road = 2,
}

/// One piece of street furniture, 12 floats
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PropInstance {
    /// Position; w = [`PropKind`]
    pub position: [f32; 4],
    /// Light: lamp height. Sign: width, height. Road: width, length, yaw, marking repeat.
    pub params: [f32; 4],
    pub color: [f32; 4],
}

impl PropInstance {
    fn new(kind: PropKind, position: glam::Vec3, params: [f32; 4], color: [f32; 4]) -> Self {
        Self {
            position: position.extend(kind as u32 as f32).to_array(),
            params,
            color,
        }
    }

    pub fn kind(&self) -> Option<PropKind> {
        match self.position[3] as u32 {
            0 => Some(PropKind::StreetLight),
            1 => Some(PropKind::Sign),
            2 => Some(PropKind::Road),
            _ => None,
        }
    }
}

/// Roads, street lights and signs, in that order
pub fn pack_props() -> Vec<PropInstance> {
    let road = |r: &RoadSegment| {
        PropInstance::new(
            PropKind::Road,
            r.center,
            [r.width, r.length, r.rotation(), r.marking_repeat()],
            AccentColor::Pink.rgba(),
        )
    };
    let roads = roads();
    let lights = street_lights();
    let signs = neon_signs();

    let mut props = Vec::with_capacity(roads.len() + lights.len() + signs.len());
    props.extend(roads.iter().map(road));
    props.extend(lights.iter().map(|l| {
        PropInstance::new(
            PropKind::StreetLight,
            l.position,
            [LAMP_HEIGHT, 0.0, 0.0, 0.0],
            AccentColor::Cyan.rgba(),
        )
    }));
    props.extend(signs.iter().map(|s| {
        PropInstance::new(
            PropKind::Sign,
            s.position,
            [SIGN_SIZE.0, SIGN_SIZE.1, 0.0, 0.0],
            s.color.rgba(),
        )
    }));
    props
}

/// Per-frame glow: one window intensity per building, then one opacity per sign
pub fn glow_levels(elapsed: f32, buildings: &[BuildingDescriptor], flicker: bool) -> Vec<f32> {
    let signs = neon_signs();
    let mut levels = Vec::with_capacity(buildings.len() + signs.len());
    if flicker {
        levels.extend(buildings.iter().map(|b| window_glow(elapsed, b.position.x)));
        levels.extend(signs.iter().map(|s| sign_opacity(elapsed, s.position.x)));
    } else {
        levels.extend(buildings.iter().map(|_| STEADY_WINDOW_GLOW));
        levels.extend(signs.iter().map(|_| STEADY_SIGN_OPACITY));
    }
    levels
}

/// Per-frame scene values, 16 floats
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    /// Vehicle x, y, z, heading
    pub vehicle: [f32; 4],
    /// Camera position; w = signed speed
    pub camera_position: [f32; 4],
    /// Look-at point; w = wheel spin
    pub look_at: [f32; 4],
    /// Elapsed seconds, flicker on (1) / off (0), unused, unused
    pub time: [f32; 4],
}

impl FrameUniform {
    pub const FLOATS: usize = std::mem::size_of::<Self>() / std::mem::size_of::<f32>();

    pub fn new(frame: &FrameOutput, flicker: bool) -> Self {
        let vehicle = &frame.vehicle;
        let camera = &frame.camera;
        Self {
            vehicle: vehicle.position.extend(vehicle.heading).to_array(),
            camera_position: camera.position.extend(vehicle.velocity).to_array(),
            look_at: camera.look_at.extend(frame.wheel_spin).to_array(),
            time: [frame.elapsed, if flicker { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

/// View any slice of instance records as raw floats
pub fn as_floats<T: Pod>(records: &[T]) -> &[f32] {
    bytemuck::cast_slice(records)
}
