//! Compute configuration.
//!
//! Hosts pass a JSON document; every field is optional.

use serde::{Deserialize, Serialize};

use crate::best::TieBreak;
use crate::error::ConfigError;

/// Distances offered as filter tabs when the athlete has swum them.
pub const DEFAULT_COMMON_DISTANCES: [u32; 6] = [50, 100, 200, 400, 800, 1500];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeConfig {
    #[serde(default)]
    pub tie_break: TieBreak,

    #[serde(default = "default_common_distances")]
    pub common_distances: Vec<u32>,
}

fn default_common_distances() -> Vec<u32> {
    DEFAULT_COMMON_DISTANCES.to_vec()
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            common_distances: default_common_distances(),
        }
    }
}

impl ComputeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.common_distances.contains(&0) {
            return Err(ConfigError::ZeroDistance);
        }
        Ok(())
    }
}
