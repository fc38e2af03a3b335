use std::path::{Path, PathBuf};

use super::error::DiscoveryError;
use crate::model::capability::Scope;

/// The two roots every loader reads from: the home directory and the
/// working directory. A root that could not be determined fails only the
/// loads that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRoots {
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
}

impl ScopeRoots {
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self::with_roots(Some(home.into()), Some(cwd.into()))
    }

    pub fn with_roots(home: Option<PathBuf>, cwd: Option<PathBuf>) -> Self {
        Self { home, cwd }
    }

    pub fn from_env() -> Self {
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        if home.is_none() {
            tracing::warn!("cannot determine home directory, user scope unavailable");
        }

        let cwd = match std::env::current_dir() {
            Ok(cwd) => Some(cwd),
            Err(err) => {
                tracing::warn!("cannot determine working directory, project scope unavailable: {err}");
                None
            }
        };

        Self::with_roots(home, cwd)
    }

    fn root(&self, scope: Scope) -> Result<&Path, DiscoveryError> {
        match scope {
            Scope::User => self
                .home
                .as_deref()
                .ok_or(DiscoveryError::HomeDirUnavailable),
            Scope::Project => self
                .cwd
                .as_deref()
                .ok_or(DiscoveryError::WorkingDirUnavailable),
        }
    }

    /// `~/.claude` or `{cwd}/.claude`.
    pub fn base_dir(&self, scope: Scope) -> Result<PathBuf, DiscoveryError> {
        Ok(self.root(scope)?.join(".claude"))
    }

    /// `~/.claude.json` or `{cwd}/.claude/.mcp.json`.
    pub fn mcp_config(&self, scope: Scope) -> Result<PathBuf, DiscoveryError> {
        match scope {
            Scope::User => Ok(self.root(Scope::User)?.join(".claude.json")),
            Scope::Project => Ok(self.base_dir(Scope::Project)?.join(".mcp.json")),
        }
    }

    pub fn plugins_dir(&self, scope: Scope) -> Result<PathBuf, DiscoveryError> {
        Ok(self.base_dir(scope)?.join("plugins"))
    }

    pub fn installed_plugins(&self, scope: Scope) -> Result<PathBuf, DiscoveryError> {
        Ok(self.plugins_dir(scope)?.join("installed_plugins.json"))
    }
}
