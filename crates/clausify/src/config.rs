//! Conversion configuration types.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for fresh-name generation during conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Prefix of standardized variable names (`X1`, `X2`, ...)
    pub variable_prefix: String,
    /// Prefix of Skolem function and constant names (`SK1`, `SK2`, ...)
    pub skolem_prefix: String,
    /// First index issued by both counters
    pub first_index: usize,
    /// Skip candidate names that already occur in the input formula
    pub avoid_input_names: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            variable_prefix: "X".to_string(),
            skolem_prefix: "SK".to_string(),
            first_index: 1,
            avoid_input_names: true,
        }
    }
}

impl ConversionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
