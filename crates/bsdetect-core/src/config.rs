//! Detector configuration

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::extension::scheme_for_override;
use crate::scheme::Scheme;

fn default_true() -> bool {
    true
}

/// Options controlling how [`Detector`](crate::Detector) combines its two
/// strategies.
///
/// Loads from TOML:
///
/// ```toml
/// extension_hints = true
/// content_sniffing = true
///
/// [extensions]
/// pal = "F8"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectConfig {
    /// Consult the filename extension before the content
    #[serde(default = "default_true")]
    #[schemars(description = "Use filename extensions as scheme hints")]
    pub extension_hints: bool,

    /// Fall back to content heuristics when the filename says nothing
    #[serde(default = "default_true")]
    #[schemars(description = "Inspect ROM content when no extension hint applies")]
    pub content_sniffing: bool,

    /// Extra extension mappings, checked before the built-in table
    #[serde(default)]
    #[schemars(
        description = "Additional or overriding extension to scheme mappings (case-insensitive, no leading dot)"
    )]
    pub extensions: BTreeMap<String, Scheme>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            extension_hints: true,
            content_sniffing: true,
            extensions: BTreeMap::new(),
        }
    }
}

impl DetectConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Look up a user-supplied extension mapping, ignoring case.
    pub fn extension_override(&self, ext: &str) -> Option<Scheme> {
        scheme_for_override(&self.extensions, ext)
    }

    /// Check the configuration for entries that can never take effect.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !self.extension_hints && !self.content_sniffing {
            warnings.push(ConfigWarning {
                field: "content_sniffing".to_string(),
                message: "Both extension_hints and content_sniffing are disabled; every image will be AUTO"
                    .to_string(),
                suggestion: Some("Enable at least one detection strategy".to_string()),
            });
        }

        for (ext, scheme) in &self.extensions {
            let field = format!("extensions.{}", ext);
            let shadowed_by = self
                .extensions
                .keys()
                .find(|key| key.eq_ignore_ascii_case(ext))
                .filter(|key| *key != ext);
            if let Some(winner) = shadowed_by {
                warnings.push(ConfigWarning {
                    field,
                    message: format!(
                        "Extension '{}' differs from '{}' only in case and never matches",
                        ext, winner
                    ),
                    suggestion: Some(format!("Merge it into '{}'", winner)),
                });
            } else if ext.is_empty() {
                warnings.push(ConfigWarning {
                    field,
                    message: "Empty extension key never matches".to_string(),
                    suggestion: None,
                });
            } else if ext.contains('.') {
                warnings.push(ConfigWarning {
                    field,
                    message: format!("Extension '{}' contains a dot and never matches", ext),
                    suggestion: Some(format!(
                        "Use '{}' instead",
                        ext.rsplit('.').next().unwrap_or(ext)
                    )),
                });
            } else if !scheme.is_known() {
                warnings.push(ConfigWarning {
                    field,
                    message: format!(
                        "Extension '{}' maps to AUTO and hides the built-in mapping",
                        ext
                    ),
                    suggestion: Some("Remove the entry to use the built-in table".to_string()),
                });
            }
        }

        warnings
    }
}

/// A configuration entry that is accepted but suspicious.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The field path that has the issue (e.g., "extensions.bin")
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

/// Generate a JSON Schema for [`DetectConfig`].
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(DetectConfig)
}
