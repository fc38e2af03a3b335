use std::collections::BTreeMap;

use serde::Deserialize;

use super::capability::{PluginAuthor, Scope};
use super::serde_ext::null_as_default;

/// `installed_plugins.json`, e.g. `~/.claude/plugins/installed_plugins.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstalledPluginsRegistry {
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)] // read by serde; no schema migrations exist yet
    pub version: i64,
    /// Keyed by `name@source`; sorted so plugin output order is stable.
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugins: BTreeMap<String, Vec<InstalledPluginInfo>>,
}

/// A single installation of a registry entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPluginInfo {
    /// Kept as text: registries may carry scopes this tool does not list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub install_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub installed_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub last_updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub git_commit_sha: String,
}

impl InstalledPluginInfo {
    pub fn is_in(&self, scope: Scope) -> bool {
        self.scope == scope.as_str()
    }
}

/// `.claude-plugin/plugin.json` inside an install path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginManifest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: PluginAuthor,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub license: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_parses_camel_case_installations() {
        let raw = r#"{
            "version": 2,
            "plugins": {
                "acme-tools@github.com/acme/tools": [{
                    "scope": "user",
                    "installPath": "/opt/acme",
                    "version": "1.2.0",
                    "installedAt": "2025-01-01T00:00:00Z",
                    "lastUpdated": "2025-01-02T00:00:00Z",
                    "gitCommitSha": "abc123"
                }]
            }
        }"#;

        let registry: InstalledPluginsRegistry = serde_json::from_str(raw).unwrap();
        let installs = &registry.plugins["acme-tools@github.com/acme/tools"];

        assert_eq!(registry.version, 2);
        assert_eq!(installs[0].install_path, "/opt/acme");
        assert_eq!(installs[0].git_commit_sha, "abc123");
        assert!(installs[0].is_in(Scope::User));
        assert!(!installs[0].is_in(Scope::Project));
    }

    #[test]
    fn manifest_tolerates_missing_optional_fields() {
        let manifest: PluginManifest = serde_json::from_str(r#"{"name": "acme"}"#).unwrap();

        assert_eq!(manifest.name, "acme");
        assert!(manifest.author.name.is_empty());
        assert!(manifest.keywords.is_empty());
    }
}
