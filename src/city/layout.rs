//! Procedural city layout
//!
//! Buildings sit on a square grid of cells around the origin. A cross of
//! roads and a central plaza are kept clear; every other cell gets one
//! building with random footprint, height, palette and a small jitter off
//! the cell center.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::{AccentColor, BaseColor};

/// Integer grid coordinates of a city cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// First exclusion rule this cell falls under, if any
    pub fn exclusion(&self) -> Option<ExclusionRule> {
        ExclusionRule::ALL.into_iter().find(|rule| rule.matches(*self))
    }

    pub fn is_buildable(&self) -> bool {
        self.exclusion().is_none()
    }
}

/// Reasons a cell stays empty, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExclusionRule {
    /// 3x3 block around the origin
    CenterPlaza,
    /// The two main roads
    CrossRoad,
    /// Clearance where the x = ±2 roads meet the plaza
    SpurX,
    /// Clearance where the z = ±2 roads meet the plaza
    SpurZ,
}

impl ExclusionRule {
    pub const ALL: [ExclusionRule; 4] = [
        ExclusionRule::CenterPlaza,
        ExclusionRule::CrossRoad,
        ExclusionRule::SpurX,
        ExclusionRule::SpurZ,
    ];

    pub fn matches(&self, cell: GridCell) -> bool {
        let (x, z) = (cell.x.abs(), cell.z.abs());
        match self {
            ExclusionRule::CenterPlaza => x <= 1 && z <= 1,
            ExclusionRule::CrossRoad => cell.x == 0 || cell.z == 0,
            ExclusionRule::SpurX => x == 2 && z <= 1,
            ExclusionRule::SpurZ => z == 2 && x <= 1,
        }
    }
}

/// Half-open sampling range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl SizeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample; an empty, inverted or non-finite range yields `min`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        // A span that overflows to infinity is as unsampleable as an infinite bound
        if self.max > self.min && (self.max - self.min).is_finite() {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Grid and size parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells span `-half_extent..=half_extent` on both axes
    pub half_extent: i32,
    /// World distance between cell centers
    pub spacing: f32,
    /// Max offset from the cell center on x and z
    pub jitter: f32,
    pub width: SizeRange,
    pub depth: SizeRange,
    pub height: SizeRange,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            half_extent: 4,
            spacing: 25.0,
            jitter: 2.5,
            width: SizeRange::new(8.0, 16.0),
            depth: SizeRange::new(8.0, 16.0),
            height: SizeRange::new(15.0, 60.0),
        }
    }
}

impl GridConfig {
    /// World-space center of a cell at ground level
    pub fn cell_center(&self, cell: GridCell) -> Vec3 {
        Vec3::new(cell.x as f32 * self.spacing, 0.0, cell.z as f32 * self.spacing)
    }
}

/// One generated building
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescriptor {
    /// Cell the building was placed in
    pub cell: GridCell,
    /// Center of the box (y is half the height, so it stands on the ground)
    pub position: Vec3,
    /// Width, height, depth
    pub size: Vec3,
    pub base_color: BaseColor,
    pub accent_color: AccentColor,
}

/// Builds the city's building list once per session
#[derive(Debug, Clone, Default)]
pub struct CityLayoutGenerator {
    config: GridConfig,
}

impl CityLayoutGenerator {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All grid cells, row by row (x outer, z inner)
    ///
    /// A negative half extent is treated as zero, leaving only the origin cell.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let n = self.config.half_extent.max(0);
        (-n..=n).flat_map(move |x| (-n..=n).map(move |z| GridCell::new(x, z)))
    }

    pub fn buildable_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells().filter(GridCell::is_buildable)
    }

    pub fn excluded_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells().filter(|cell| !cell.is_buildable())
    }

    /// Generate one building per buildable cell
    ///
    /// Draw order per cell: width, depth, height, x jitter, z jitter, base
    /// color, accent color. The same RNG state always yields the same city.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<BuildingDescriptor> {
        let config = &self.config;
        let spread = if config.jitter.is_finite() { config.jitter } else { 0.0 };
        let jitter = SizeRange::new(-spread, spread);

        let buildings: Vec<BuildingDescriptor> = self
            .buildable_cells()
            .map(|cell| {
                let width = config.width.sample(rng);
                let depth = config.depth.sample(rng);
                let height = config.height.sample(rng);

                let offset_x = jitter.sample(rng);
                let offset_z = jitter.sample(rng);
                let center = config.cell_center(cell);

                let base_color = BaseColor::ALL[rng.random_range(0..BaseColor::ALL.len())];
                let accent_color = AccentColor::ALL[rng.random_range(0..AccentColor::ALL.len())];

                BuildingDescriptor {
                    cell,
                    position: Vec3::new(center.x + offset_x, height / 2.0, center.z + offset_z),
                    size: Vec3::new(width, height, depth),
                    base_color,
                    accent_color,
                }
            })
            .collect();

        if buildings.is_empty() {
            log::warn!("City grid has no buildable cells (half extent {})", config.half_extent);
        } else {
            log::debug!("Generated {} buildings", buildings.len());
        }

        buildings
    }
}
