// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_LOG_FILTER, DEFAULT_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration for an event tree and the host that drives it.
///
/// Every field is optional in YAML and falls back to its default.
///
/// # Fields
/// * `prune_empty_listener_sets` - Drop a type's listener set once its last listener is removed
/// * `queue_capacity` - Initial capacity of the pending-action queue
/// * `log_filter` - `EnvFilter` directive used by hosts when installing a subscriber
///
/// # Example
/// ```yaml
/// prune_empty_listener_sets: true
/// queue_capacity: 256
/// log_filter: "mercury_events=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub prune_empty_listener_sets: bool,
    pub queue_capacity: usize,
    pub log_filter: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            prune_empty_listener_sets: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TreeConfig {
    /// Check field ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "queue_capacity",
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.queue_capacity, MAX_QUEUE_CAPACITY
                ),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_filter",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TreeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: TreeConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config from a YAML file and check its field ranges
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<TreeConfig, ConfigError> {
    let cfg = load_config(path)?;
    cfg.validate()?;
    Ok(cfg)
}
