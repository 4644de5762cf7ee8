//! Detector configuration.
//!
//! Defaults are hardcoded; an optional TOML file overlays them through the
//! `config` crate loader.


use std::path::Path;

use config::Config;
use config::File;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Capacity of the facade-to-loop command channel. `detect` calls beyond
    /// this backlog apply backpressure on the caller, never on the loop.
    pub command_buffer: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig { command_buffer: 64 }
    }
}

impl DetectorConfig {
    /// Loads configuration from a TOML file layered over the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().add_source(File::from(path.as_ref())).build()?;

        Ok(config.try_deserialize()?)
    }
}
