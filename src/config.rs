//! Session settings with TOML support.
//!
//! Every section uses `#[serde(default)]`, so a file only has to mention what it changes:
//!
//! ```toml
//! variant = "avl"
//!
//! [canvas]
//! width = 800.0
//!
//! [playback]
//! speed = 5
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::history::Variant;
use crate::layout::{Canvas, LayoutConfig};
use crate::playback::Speed;
use crate::{Error, Result};

/// Top-level settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Variant shown when the session starts.
    pub variant: Variant,
    /// Drawing surface size.
    pub canvas: Canvas,
    /// Node spacing.
    pub layout: LayoutConfig,
    /// Playback settings.
    pub playback: PlaybackConfig,
    /// Random tree generation.
    pub random: RandomConfig,
}

/// Playback settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Steps per second, 1 to 5.
    pub speed: Speed,
}

/// Bounds for [`Session::generate_random`](crate::Session::generate_random).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Fewest keys a random tree gets.
    pub min_count: usize,
    /// Most keys a random tree gets.
    pub max_count: usize,
    /// Smallest key drawn.
    pub min_value: i64,
    /// Largest key drawn.
    pub max_value: i64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            min_count: 7,
            max_count: 10,
            min_value: 1,
            max_value: 99,
        }
    }
}

impl RandomConfig {
    /// How many keys to draw.
    pub fn count_range(&self) -> RangeInclusive<usize> {
        self.min_count..=self.max_count
    }

    /// Which keys may be drawn.
    pub fn value_range(&self) -> RangeInclusive<i64> {
        self.min_value..=self.max_value
    }
}

impl Config {
    /// Load settings from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde can't: positive sizes, ordered ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.canvas.width.is_finite() && self.canvas.height.is_finite()) {
            return Err(Error::InvalidConfig("canvas size must be finite".into()));
        }
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        self.layout.validate()?;
        if self.random.min_count > self.random.max_count {
            return Err(Error::InvalidConfig(format!(
                "random.min_count ({}) is larger than random.max_count ({})",
                self.random.min_count, self.random.max_count
            )));
        }
        if self.random.min_value > self.random.max_value {
            return Err(Error::InvalidConfig(format!(
                "random.min_value ({}) is larger than random.max_value ({})",
                self.random.min_value, self.random.max_value
            )));
        }
        Ok(())
    }
}
