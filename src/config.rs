use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::MigrationError;

pub const TOKEN_VAR: &str = "OP_API_TOKEN";
pub const ENDPOINT_VAR: &str = "OP_API_ENDPOINT";
pub const PROJECT_VAR: &str = "OP_PROJECT_ID";

/// Connection settings for the target OpenProject instance, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_token: String,
    pub api_endpoint: String,
    pub project_id: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, MigrationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MigrationError> {
        let require = |name: &'static str| lookup(name).ok_or(MigrationError::MissingEnv(name));
        Ok(Self {
            api_token: require(TOKEN_VAR)?,
            api_endpoint: require(ENDPOINT_VAR)?,
            project_id: require(PROJECT_VAR)?,
        })
    }
}

/// Lookup tables tying one Wekan board to one OpenProject instance.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Mappings {
    /// Version link attached to every card's work package.
    pub version: String,
    /// Wekan list title -> OpenProject status name.
    pub statuses: BTreeMap<String, String>,
    /// Wekan user id -> OpenProject user link.
    pub users: BTreeMap<String, String>,
    /// Status name for checklist items marked finished.
    pub finished_status: String,
    /// Status name for open checklist items.
    pub open_status: String,
}

const DEFAULT_STATUSES: &[(&str, &str)] = &[
    ("Pool", "New"),
    ("Ready", "New"),
    ("Doing", "In progress"),
    ("Waiting", "On hold"),
    ("Done", "Closed"),
];

const DEFAULT_USERS: &[(&str, &str)] = &[
    ("N54tnXfaWQGLFEahb", "/api/v3/users/5"),
    ("QMFskvFgCzGZcmurb", "/api/v3/users/9"),
    ("aYGB9PxY89dXxEQT5", "/api/v3/users/11"),
    ("oMDvEoTZquEPqSzbi", "/api/v3/users/11"),
];

impl Default for Mappings {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self {
            version: "/api/v3/versions/8".into(),
            statuses: owned(DEFAULT_STATUSES),
            users: owned(DEFAULT_USERS),
            finished_status: "Closed".into(),
            open_status: "New".into(),
        }
    }
}

fn default_mappings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wk2op")
        .join("mappings.toml")
}

impl Mappings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mappings from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse mappings in {}", path.display()))
    }

    /// An explicit path must exist; otherwise fall back to the home-directory file,
    /// then to the built-in tables.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let path = default_mappings_path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "using mappings file");
            return Self::from_file(&path);
        }
        Ok(Self::default())
    }
}
