//! Player preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA;
use crate::sim::CameraSmoothing;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Stars in the sky dome
    pub fn star_count(&self) -> u32 {
        match self {
            QualityPreset::Low => 1000,
            QualityPreset::Medium => 3000,
            QualityPreset::High => 5000,
        }
    }

    /// Whether buildings get lit window facades
    pub fn facade_windows(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Shadow map edge length in texels (0 = shadows off)
    pub fn shadow_map_size(&self) -> u32 {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 1024,
            QualityPreset::High => 2048,
        }
    }
}

/// Drive settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Simulation ===
    /// Longest frame the simulation will integrate (seconds); longer frames
    /// (tab stalls) are cut down to this
    #[serde(default = "default_max_frame_delta")]
    pub max_frame_delta: f32,
    /// Camera lag behavior
    #[serde(default)]
    pub camera_smoothing: CameraSmoothing,
    /// Fixed city seed; a fresh city every load when unset
    #[serde(default)]
    pub city_seed: Option<u64>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no neon flicker)
    pub reduced_motion: bool,
}

fn default_max_frame_delta() -> f32 {
    MAX_FRAME_DELTA
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            max_frame_delta: MAX_FRAME_DELTA,
            camera_smoothing: CameraSmoothing::PerTick,
            city_seed: None,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective neon flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Seed for this session's city, falling back to `fresh`
    pub fn seed_or(&self, fresh: u64) -> u64 {
        self.city_seed.unwrap_or(fresh)
    }

    /// Apply `quality`, `seed` and `fps` overrides from a URL query string
    /// (`?quality=low&seed=42&fps=1`). Unknown keys and bad values are skipped.
    /// Returns true if anything changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let before = self.clone();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => match QualityPreset::parse(value) {
                    Some(preset) => self.quality = preset,
                    None => log::warn!("Unknown quality preset '{}'", value),
                },
                "seed" => match value.parse::<u64>() {
                    Ok(seed) => self.city_seed = Some(seed),
                    Err(_) if value.is_empty() => self.city_seed = None,
                    Err(_) => log::warn!("Bad city seed '{}'", value),
                },
                "fps" => self.show_fps = matches!(value, "" | "1" | "true" | "on"),
                _ => {}
            }
        }
        if *self != before {
            log::info!("URL overrides: quality {}, seed {:?}", self.quality.as_str(), self.city_seed);
            true
        } else {
            false
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_drive_settings";

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings not persisted on native");
    }
}
