//! Reveal configuration file handling
//!
//! `reveal.toml` holds the simulated viewport and playback settings:
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [playback]
//! frame_rate = 60
//! duration_ms = 500
//! easing = "power3.out"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use anyhow::{Context, Result};
use reveal_animation::{Easing, TimelineDefaults};
use reveal_core::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "reveal.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Frames per second used by `simulate`
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Duration for steps that don't set one
    #[serde(default = "default_duration")]
    pub duration_ms: f32,
    /// Easing for steps that don't set one, e.g. `power3.out` or `back.out(1.7)`
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_frame_rate() -> u32 {
    60
}

fn default_duration() -> f32 {
    500.0
}

fn default_easing() -> String {
    "power3.out".to_string()
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            duration_ms: default_duration(),
            easing: default_easing(),
        }
    }
}

/// Settings loaded from `reveal.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl RevealConfig {
    /// Desktop viewport at 60fps
    pub fn standard() -> Self {
        Self::default()
    }

    /// Small viewport, coarse frames and linear easing for predictable output
    pub fn testing() -> Self {
        Self::default()
            .with_viewport(800.0, 600.0)
            .with_frame_rate(10)
            .with_easing("linear")
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = ViewportConfig { width, height };
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.playback.frame_rate = frame_rate;
        self
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.playback.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.playback.easing = easing.into();
        self
    }

    /// Load `reveal.toml` from a directory, falling back to defaults
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::standard());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: RevealConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the values a page can't be simulated without
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            anyhow::bail!(
                "Invalid viewport {}x{}: both sides must be positive",
                self.viewport.width,
                self.viewport.height
            );
        }
        if self.playback.frame_rate == 0 {
            anyhow::bail!("Invalid frame_rate 0: must be at least 1");
        }
        if self.playback.duration_ms < 0.0 {
            anyhow::bail!(
                "Invalid duration_ms {}: must not be negative",
                self.playback.duration_ms
            );
        }
        self.easing()?;
        Ok(())
    }

    pub fn easing(&self) -> Result<Easing> {
        Easing::parse(&self.playback.easing).with_context(|| {
            format!(
                "Unknown easing '{}'. Expected e.g. linear, power2.out, back.out(1.7)",
                self.playback.easing
            )
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.playback.frame_rate.max(1) as f32
    }

    pub fn timeline_defaults(&self) -> Result<TimelineDefaults> {
        Ok(TimelineDefaults {
            duration_ms: self.playback.duration_ms,
            easing: self.easing()?,
        })
    }
}
