//! Configuration system
//!
//! Every tunable of the simulation lives in [`SimulationConfig`]. Files are
//! picked by extension: `.toml` or `.ron`. Missing fields take their defaults.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};
use crate::physics::RAY_PARALLEL_EPSILON;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, choosing the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Health state machine timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Seconds a hit target hangs in the air before falling
    pub death_pause: f32,
    /// Direction of the fall
    pub fall_direction: [f32; 3],
    /// Fall speed in units per second
    pub fall_speed: f32,
    /// Targets below this height are destroyed
    pub death_plane_y: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            death_pause: 0.5,
            fall_direction: [0.0, -1.0, 0.0],
            fall_speed: 6.0,
            death_plane_y: -5.0,
        }
    }
}

impl LifecycleConfig {
    /// `fall_direction` as a vector
    pub fn fall_direction(&self) -> Vec3 {
        Vec3::from(self.fall_direction)
    }
}

/// Escape rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Escape radius given to targets built by the factories
    pub default_escape_distance: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            default_escape_distance: 40.0,
        }
    }
}

/// Ray casting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Slab-parallel threshold for ray direction components
    pub parallel_epsilon: f32,
    /// Range given to guns built by the factories
    pub default_max_distance: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            parallel_epsilon: RAY_PARALLEL_EPSILON,
            default_max_distance: 100.0,
        }
    }
}

/// Scoring and round rules for the game-state collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    /// Points for a hit in round 1
    pub base_score: u32,
    /// Per-round growth factor of the hit score
    pub score_multiplier: f32,
    /// A round fails once this many targets escaped
    pub max_escapes: u32,
    /// Targets spawned per round
    pub ducks_per_round: u32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            base_score: 100,
            score_multiplier: 1.5,
            max_escapes: 3,
            ducks_per_round: 10,
        }
    }
}

/// Root configuration of the simulation core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Health state machine timing
    pub lifecycle: LifecycleConfig,
    /// Escape rules
    pub bounds: BoundsConfig,
    /// Ray casting parameters
    pub raycast: RaycastConfig,
    /// Scoring and round rules
    pub rules: RoundRules,
}

impl Config for SimulationConfig {}

impl SimulationConfig {
    /// Load and validate
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the systems cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("lifecycle.death_pause", self.lifecycle.death_pause),
            ("lifecycle.fall_speed", self.lifecycle.fall_speed),
            ("bounds.default_escape_distance", self.bounds.default_escape_distance),
            ("raycast.parallel_epsilon", self.raycast.parallel_epsilon),
            ("raycast.default_max_distance", self.raycast.default_max_distance),
            ("rules.score_multiplier", self.rules.score_multiplier),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.lifecycle.death_plane_y.is_finite() {
            return Err(ConfigError::Invalid("lifecycle.death_plane_y must be finite".into()));
        }
        if self.lifecycle.fall_direction.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid("lifecycle.fall_direction must be finite".into()));
        }
        // A zero direction would leave falling targets hanging above the death plane
        if utils::try_direction(self.lifecycle.fall_direction()).is_none() {
            return Err(ConfigError::Invalid(
                "lifecycle.fall_direction must have non-zero length".into(),
            ));
        }
        if self.rules.max_escapes == 0 {
            return Err(ConfigError::Invalid("rules.max_escapes must be at least 1".into()));
        }
        Ok(())
    }
}
