//! Scene parameters: presets, JSON overrides and validation.

use bevy::prelude::Resource;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::graph::EdgeRule;
use crate::network::{BackgroundConfig, CoreMotion, Placement, TrailConfig};

/// Path to a JSON file deserialized into [`NetworkConfig`]
pub const CONFIG_VAR: &str = "KNOT_NETWORK_CONFIG";
/// Preset name, `full` or `drift`
pub const PRESET_VAR: &str = "KNOT_NETWORK_PRESET";
/// Seed for the scene RNG
pub const SEED_VAR: &str = "KNOT_NETWORK_SEED";

/// Pair evaluation is O(n²); keep scenes small
pub const MAX_NODES: usize = 4096;

pub mod presets {
    use super::*;

    /// Orbiting nodes with per-category behaviors over a pulsing web
    pub const FULL: NetworkConfig = NetworkConfig {
        node_count: 20,
        bounding_radius: 35.0,
        edge_rule: EdgeRule::Probability { p: 0.035 },
        placement: Placement::Orbit {
            base_radius: 20.0,
            amplitude: 5.0,
        },
        behaviors: true,
        edge_bow: Some(0.2),
        trails: None,
        background: Some(BackgroundConfig {
            point_count: 150,
            bounding_radius: 50.0,
            threshold: 15.0,
        }),
        core_motion: CoreMotion::Sinusoidal,
        seed: None,
    };

    /// Drifting nodes that leave fading ghosts behind
    pub const DRIFT: NetworkConfig = NetworkConfig {
        node_count: 40,
        bounding_radius: 30.0,
        edge_rule: EdgeRule::Proximity { threshold: 18.0 },
        placement: Placement::Drift,
        behaviors: false,
        edge_bow: None,
        trails: Some(TrailConfig {
            spawn_probability: 0.015,
            opacity_decay: 0.96,
            life_decay: 0.02,
            start_opacity: 0.4,
        }),
        background: None,
        core_motion: CoreMotion::Linear {
            step: [0.003, 0.005, 0.0],
        },
        seed: None,
    };
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub node_count: usize,
    /// Half-width of the cube node positions are sampled in
    pub bounding_radius: f32,
    pub edge_rule: EdgeRule,
    pub placement: Placement,
    /// Enables spin / shimmer / blink overlays
    pub behaviors: bool,
    /// Amplitude of the edge bow effect; rigid edges when unset
    pub edge_bow: Option<f32>,
    pub trails: Option<TrailConfig>,
    pub background: Option<BackgroundConfig>,
    pub core_motion: CoreMotion,
    /// Fixed seed for reproducible scenes
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        presets::FULL
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    UnknownPreset(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Cannot read {}: {}", path, source),
            ConfigError::Parse(e) => write!(f, "Invalid config JSON: {}", e),
            ConfigError::UnknownPreset(name) => {
                write!(f, "Unknown preset '{}' (expected 'full' or 'drift')", name)
            }
            ConfigError::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl NetworkConfig {
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(presets::FULL),
            "drift" => Ok(presets::DRIFT),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    /// Parse a config; missing fields take the `full` preset's values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Resolve the config from the process environment
    ///
    /// A config file wins over a preset name; the seed applies to either.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var(CONFIG_VAR).ok().as_deref(),
            std::env::var(PRESET_VAR).ok().as_deref(),
            std::env::var(SEED_VAR).ok().as_deref(),
        )
    }

    fn resolve(
        config_path: Option<&str>,
        preset: Option<&str>,
        seed: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match (config_path, preset) {
            (Some(path), _) => Self::from_file(path)?,
            (None, Some(name)) => Self::preset(name)?,
            (None, None) => Self::default(),
        };

        if let Some(raw) = seed {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{}={} is not an unsigned integer", SEED_VAR, raw))
            })?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Like [`NetworkConfig::from_env`], but logs and falls back to the
    /// default preset instead of failing
    pub fn load_or_default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}; using the full preset", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid(reason));

        if self.node_count == 0 || self.node_count > MAX_NODES {
            return invalid(format!(
                "node_count {} outside 1..={}",
                self.node_count, MAX_NODES
            ));
        }
        if !(self.bounding_radius.is_finite() && self.bounding_radius > 0.0) {
            return invalid(format!("bounding_radius {} must be positive", self.bounding_radius));
        }

        match self.edge_rule {
            EdgeRule::Proximity { threshold } if !(threshold.is_finite() && threshold > 0.0) => {
                return invalid(format!("proximity threshold {} must be positive", threshold));
            }
            EdgeRule::Probability { p } if !(0.0..=1.0).contains(&p) => {
                return invalid(format!("edge probability {} outside [0, 1]", p));
            }
            _ => {}
        }

        if let Placement::Orbit {
            base_radius,
            amplitude,
        } = self.placement
        {
            if !(base_radius.is_finite() && amplitude.is_finite()) {
                return invalid("orbit radius and amplitude must be finite".to_string());
            }
        }

        if let Some(bow) = self.edge_bow {
            if !bow.is_finite() {
                return invalid(format!("edge_bow {} must be finite", bow));
            }
        }

        if let Some(trails) = &self.trails {
            if !(0.0..=1.0).contains(&trails.spawn_probability) {
                return invalid(format!(
                    "trail spawn_probability {} outside [0, 1]",
                    trails.spawn_probability
                ));
            }
            if !(trails.opacity_decay > 0.0 && trails.opacity_decay <= 1.0) {
                return invalid(format!(
                    "trail opacity_decay {} outside (0, 1]",
                    trails.opacity_decay
                ));
            }
            if !(trails.life_decay.is_finite() && trails.life_decay > 0.0) {
                return invalid(format!("trail life_decay {} must be positive", trails.life_decay));
            }
        }

        if let Some(background) = &self.background {
            if background.point_count > MAX_NODES {
                return invalid(format!(
                    "background point_count {} exceeds {}",
                    background.point_count, MAX_NODES
                ));
            }
            if !(background.bounding_radius.is_finite() && background.bounding_radius > 0.0) {
                return invalid("background bounding_radius must be positive".to_string());
            }
            if !(background.threshold.is_finite() && background.threshold > 0.0) {
                return invalid("background threshold must be positive".to_string());
            }
        }

        Ok(())
    }
}
