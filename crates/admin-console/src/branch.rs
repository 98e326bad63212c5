//! # Branch Preference
//!
//! The selected company branch is kept in `preferences.json` under the state
//! directory, as the `company-branch` key. Other keys in that file are left alone.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const BRANCH_KEY: &str = "company-branch";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Branch {
    #[default]
    A21,
    B29,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::A21, Branch::B29];

    pub fn code(self) -> &'static str {
        match self {
            Branch::A21 => "BRMSC012",
            Branch::B29 => "BRMSC029",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Branch::A21 => "A-21 [BRMSC012]",
            Branch::B29 => "B-29 [BRMSC029]",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Branch {
    type Err = BranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::ALL
            .into_iter()
            .find(|branch| branch.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BranchError::Unknown(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    #[error("Unknown branch {0:?}")]
    Unknown(String),

    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed branch selection.
#[derive(Debug, Clone)]
pub struct BranchPreference {
    path: PathBuf,
}

impl BranchPreference {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored branch, or the default when nothing valid is stored.
    pub fn get(&self) -> Result<Branch, BranchError> {
        let preferences = self.read()?;
        let branch = preferences
            .get(BRANCH_KEY)
            .and_then(Value::as_str)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();
        debug!(%branch, "Loaded branch preference");
        Ok(branch)
    }

    pub fn set(&self, branch: Branch) -> Result<(), BranchError> {
        let mut preferences = self.read()?;
        preferences.insert(BRANCH_KEY.to_string(), Value::from(branch.code()));

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| self.io(source))?;
        }
        let text = serde_json::to_string_pretty(&preferences).map_err(|source| self.corrupt(source))?;
        std::fs::write(&self.path, text).map_err(|source| self.io(source))?;
        info!(%branch, path = %self.path.display(), "Saved branch preference");
        Ok(())
    }

    fn read(&self) -> Result<Map<String, Value>, BranchError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| self.corrupt(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(source) => Err(self.io(source)),
        }
    }

    fn io(&self, source: std::io::Error) -> BranchError {
        BranchError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, source: serde_json::Error) -> BranchError {
        BranchError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}
