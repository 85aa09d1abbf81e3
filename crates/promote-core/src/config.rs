use crate::error::{PromoteError, Result};
use crate::gate::{default_allowed_refs, RefGate};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PublisherConfig
// ---------------------------------------------------------------------------

/// The external command that performs a channel promotion on the hosting
/// platform. Each entry of `args` may contain `{package}`, `{track}`,
/// `{from}`, `{to}`, `{from_ref}` and `{to_ref}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "charmcraft".to_string()
}

fn default_args() -> Vec<String> {
    [
        "promote",
        "{package}",
        "--from-channel",
        "{from_ref}",
        "--to-channel",
        "{to_ref}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default = "default_allowed_refs")]
    pub allowed_refs: Vec<String>,
    #[serde(default = "default_branches")]
    pub default_branches: Vec<String>,
    #[serde(default)]
    pub publisher: PublisherConfig,
}

fn default_version() -> u32 {
    1
}

fn default_branches() -> Vec<String> {
    vec!["main".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            packages: Vec::new(),
            allowed_refs: default_allowed_refs(),
            default_branches: default_branches(),
            publisher: PublisherConfig::default(),
        }
    }
}

impl Config {
    pub fn new(packages: Vec<String>) -> Self {
        Self {
            packages,
            ..Self::default()
        }
    }

    pub fn gate(&self) -> RefGate {
        RefGate::new(self.allowed_refs.clone())
    }

    pub fn exists(root: &Path) -> bool {
        paths::config_path(root).exists()
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PromoteError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the project config, or fall back to defaults when none exists.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(PromoteError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.packages.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no packages configured; 'promote run' will need --package".to_string(),
            });
        }
        for pkg in &self.packages {
            if pkg.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "empty package name in packages".to_string(),
                });
            }
        }

        if self.allowed_refs.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "allowed_refs is empty; no ref can ever run a promotion".to_string(),
            });
        }

        for (field, refs) in [
            ("allowed_refs", &self.allowed_refs),
            ("default_branches", &self.default_branches),
        ] {
            for r in refs {
                if paths::validate_ref(r).is_err() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!("invalid ref name '{r}' in {field}"),
                    });
                }
            }
        }

        for branch in &self.default_branches {
            if !self.allowed_refs.contains(branch) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "default branch '{branch}' is not in allowed_refs; the latest track can never be promoted from it"
                    ),
                });
            }
        }

        if self.publisher.program.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "publisher.program is empty".to_string(),
            });
        }

        let targets_destination = self
            .publisher
            .args
            .iter()
            .any(|a| a.contains("{to}") || a.contains("{to_ref}"));
        if !targets_destination {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "publisher.args never references {to} or {to_ref}; the destination channel is not passed to the publisher".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
