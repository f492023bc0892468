#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Settings shared by the translators and the renderer. The configuration can be
//! built programmatically or loaded from YAML.
//!
//! ```
//! use oasgen_core::config::GeneratorConfig;
//! use oasgen_core::ir::AccessModifier;
//!
//! let config = GeneratorConfig::from_yaml_str("accessModifier: internal\nindentation: 2\n").unwrap();
//! assert_eq!(config.access_modifier, AccessModifier::Internal);
//! assert_eq!(config.indentation, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::ir::AccessModifier;

/// Configuration for Swift code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Access modifier stamped on every generated declaration.
    #[serde(default = "default_access_modifier")]
    pub access_modifier: AccessModifier,

    /// Number of spaces per indentation level in rendered text.
    #[serde(default = "default_indentation")]
    pub indentation: usize,

    /// Comment placed at the top of every generated file.
    #[serde(default = "default_top_comment")]
    pub top_comment: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            access_modifier: default_access_modifier(),
            indentation: default_indentation(),
            top_comment: default_top_comment(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Config(format!("Failed to parse generator config: {}", e)))?;
        if config.indentation == 0 {
            return Err(AppError::Config("indentation must be at least 1".into()));
        }
        Ok(config)
    }
}

fn default_access_modifier() -> AccessModifier {
    AccessModifier::Public
}

fn default_indentation() -> usize {
    4
}

fn default_top_comment() -> String {
    "Generated by oasgen, do not modify.".to_string()
}
