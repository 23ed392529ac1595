//! Small domain types shared across the workspace.
//!
//! Branch names end up inside shell-interpreted command lines, so
//! [`BranchName`] only ever holds a validated value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RepositoryError;

/// Branch checked out and pulled when no other branch is chosen.
pub const DEFAULT_BRANCH: &str = "master";

/// Menu answer that selects [`DEFAULT_BRANCH`].
pub const DEFAULT_BRANCH_SHORTCUT: &str = "M";

// ---------------------------------------------------------------------------
// BranchName
// ---------------------------------------------------------------------------

/// A git branch name that is safe to interpolate into a shell command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Validate and wrap `name`.
    pub fn new(name: impl Into<String>) -> Result<Self, RepositoryError> {
        let name = name.into();
        let valid = !name.is_empty()
            && !name.starts_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-'));
        if valid {
            Ok(Self(name))
        } else {
            Err(RepositoryError::InvalidBranch { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BranchName {
    fn default() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl FromStr for BranchName {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// AllowedRepoNames
// ---------------------------------------------------------------------------

/// Directory name suffixes recognised as buildable checkouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRepoNames(Vec<String>);

impl AllowedRepoNames {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(suffixes.into_iter().map(Into::into).collect())
    }

    /// `true` when `path` ends with one of the recognised suffixes.
    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AllowedRepoNames {
    fn default() -> Self {
        Self::new([
            "com.ericsson.bss.ael.aep",
            "com.ericsson.bss.ael.aep.plugins",
            "com.ericsson.bss.ael.bae",
            "com.ericsson.bss.ael.dae",
            "com.ericsson.bss.ael.jive",
            "com.ericsson.bss.ael.aep.sdk",
        ])
    }
}

// ---------------------------------------------------------------------------
// Policies and overrides
// ---------------------------------------------------------------------------

/// What the engine does after a repository fails to update or build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the remaining repositories on the first failure.
    #[default]
    FailFast,
    /// Record the failure and carry on with the next repository.
    ContinueOnError,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::FailFast => write!(f, "fail-fast"),
            FailurePolicy::ContinueOnError => write!(f, "continue-on-error"),
        }
    }
}

/// A named per-project build command: the repository with `label` always
/// builds with catalog entry `key`, whatever command was chosen for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOverride {
    pub label: String,
    pub key: u8,
}

impl FromStr for CommandOverride {
    type Err = String;

    /// Parses `LABEL=KEY`, e.g. `SDK=1`. Labels compare case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, key) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=KEY, got '{s}'"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(format!("missing label in '{s}'"));
        }
        let key = key
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("'{}' is not a catalog key", key.trim()))?;
        Ok(Self {
            label: label.to_uppercase(),
            key,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
