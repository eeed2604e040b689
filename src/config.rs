// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::Path};

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};

use crate::template::loader::is_yaml_path;

pub const DEFAULT_MAX_CALC_PASSES: usize = 3;

/// Engine settings. Missing fields take their defaults, so an empty config
/// document is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Upper bound on calc resolution passes, which is also the longest
    /// calc-to-calc chain that resolves.
    pub max_calc_passes: usize,
    /// Reject templates whose calc expressions do not compile, instead of
    /// leaving those calcs blank.
    pub strict_expressions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_calc_passes: DEFAULT_MAX_CALC_PASSES,
            strict_expressions: false,
        }
    }
}

impl EngineConfig {
    pub fn from_file(filename: &Path) -> Result<EngineConfig, Error> {
        let input = fs::read_to_string(filename).with_context(|| format!("failed to read {}", filename.display()))?;
        let config = if is_yaml_path(filename) {
            serde_yaml::from_str(&input).with_context(|| format!("invalid config {}", filename.display()))?
        } else {
            serde_json::from_str(&input).with_context(|| format!("invalid config {}", filename.display()))?
        };
        Ok(config)
    }
}
