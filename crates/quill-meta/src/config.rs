//! Engine configuration.
//!
//! Every field has a default, so an empty YAML document is a valid configuration:
//!
//! ```yaml
//! detection:
//!   rule_neighbors: both        # both | either
//!   missing_neighbor_is_blank: false
//! folding:
//!   placeholder: "---…---"
//!   preserve_collapsed: true
//! styles:
//!   delimiter: 83886081
//! ```

use crate::decorations::MetaStyles;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which blank neighbours make an isolated delimiter a horizontal rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborRule {
    /// Blank line above **and** below.
    #[default]
    Both,
    /// Blank line above **or** below.
    Either,
}

/// Horizontal-rule disambiguation rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Neighbour requirement for the isolated-rule check.
    pub rule_neighbors: NeighborRule,
    /// How a delimiter on the first or last line treats its missing neighbour.
    pub missing_neighbor_is_blank: bool,
}

/// Host folding presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoldingConfig {
    /// One-line summary shown while a block is collapsed.
    pub placeholder: String,
    /// Keep collapsed blocks collapsed when fold regions are replaced.
    pub preserve_collapsed: bool,
}

impl Default for FoldingConfig {
    fn default() -> Self {
        Self {
            placeholder: String::from("---…---"),
            preserve_collapsed: true,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Delimiter disambiguation.
    pub detection: DetectionConfig,
    /// Folding presentation.
    pub folding: FoldingConfig,
    /// Span kind to `StyleId` mapping.
    pub styles: MetaStyles,
}

impl EngineConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as YAML null, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folding.placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "folding.placeholder must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
