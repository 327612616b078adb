use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse map config RON: {0}")]
    Parse(String),
}

/// Color tiers for the elevation label, selected by world height.
/// `high_color` applies strictly above `high_min`, `mid_color` at or above
/// `mid_min`, `low_color` below that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevationTiers {
    #[serde(default = "default_high_min")]
    pub high_min: i64,
    #[serde(default = "default_mid_min")]
    pub mid_min: i64,
    #[serde(default = "default_high_color")]
    pub high_color: u8,
    #[serde(default = "default_mid_color")]
    pub mid_color: u8,
    #[serde(default = "default_low_color")]
    pub low_color: u8,
}

fn default_high_min() -> i64 {
    100
}
fn default_mid_min() -> i64 {
    54
}
fn default_high_color() -> u8 {
    54
}
fn default_mid_color() -> u8 {
    86
}
fn default_low_color() -> u8 {
    114
}

impl Default for ElevationTiers {
    fn default() -> Self {
        Self {
            high_min: default_high_min(),
            mid_min: default_mid_min(),
            high_color: default_high_color(),
            mid_color: default_mid_color(),
            low_color: default_low_color(),
        }
    }
}

impl ElevationTiers {
    /// Palette byte for an elevation value.
    pub fn color_for(&self, y: i64) -> u8 {
        if y > self.high_min {
            self.high_color
        } else if y >= self.mid_min {
            self.mid_color
        } else {
            self.low_color
        }
    }
}

/// Runtime map settings. The host loads these once at startup and may flip
/// the display toggles live; the render path reads them every frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Ticks between marker refresh passes (scheduling is host-owned).
    #[serde(default = "default_update_interval")]
    pub update_interval_ticks: u64,
    #[serde(default = "default_show_player_names")]
    pub show_player_names: bool,
    #[serde(default)]
    pub show_y_level: bool,
    #[serde(default)]
    pub elevation_tiers: ElevationTiers,
}

fn default_update_interval() -> u64 {
    5
}
fn default_show_player_names() -> bool {
    true
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            update_interval_ticks: default_update_interval(),
            show_player_names: default_show_player_names(),
            show_y_level: false,
            elevation_tiers: ElevationTiers::default(),
        }
    }
}

/// Parse a map config from a RON string.
pub fn load_config_from_str(ron_str: &str) -> Result<MapConfig, ConfigError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| ConfigError::Parse(e.to_string()))
}
