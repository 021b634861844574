//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityConfig;
use crate::conflict::ConflictOptions;
use crate::error::{Result, ScheduleError};
use crate::workload::WorkloadLimits;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub availability: AvailabilityConfig,
    pub conflicts: ConflictOptions,
    pub workload: WorkloadLimits,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.availability.validate()?;
        Ok(config)
    }
}
