use serde::{Deserialize, Serialize};
use stellar_engine::error::{EngineError, Result};

use crate::bodies::{BODY_RADIUS, BODY_SPACING};

/// How the per-frame reset tweens treat bodies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverPolicy {
    /// Reset every body every frame, hovered or not. The reset is issued
    /// after the highlight, so it wins and hovered bodies only twitch.
    #[default]
    Faithful,
    /// Skip the reset for bodies hit this frame so the highlight holds.
    GateReset,
}

/// Point light placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: u32,
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -5.0, 7.0],
            color: 0xffffff,
            intensity: 2.0,
        }
    }
}

/// Demo settings. Read from the same JSON document as the engine config;
/// unknown keys belong to the engine and are ignored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub particle_count: usize,
    /// Stars are scattered in a cube of this edge length around the origin.
    pub particle_spread: f32,
    pub star_size: f32,
    pub body_spacing: f32,
    pub body_radius: f32,
    /// Camera Y per CSS pixel of page scroll.
    pub scroll_factor: f32,
    pub light: LightConfig,
    pub hover_policy: HoverPolicy,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            particle_count: 500,
            particle_spread: 100.0,
            star_size: 0.15,
            body_spacing: BODY_SPACING,
            body_radius: BODY_RADIUS,
            scroll_factor: 0.01,
            light: LightConfig::default(),
            hover_policy: HoverPolicy::default(),
        }
    }
}

impl StackConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }
}
