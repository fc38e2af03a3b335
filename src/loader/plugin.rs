use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Loader;
use super::error::DiscoveryError;
use super::scope::ScopeRoots;
use crate::model::capability::{CapabilityInfo, CapabilityType, Plugin, Scope};
use crate::model::registry::{InstalledPluginInfo, InstalledPluginsRegistry, PluginManifest};

/// Description given to plugins installed without a manifest.
pub const REGISTRY_ONLY_DESCRIPTION: &str = "Plugin installed from registry";

/// Reads the installed-plugins registry, then each installation's manifest.
#[derive(Debug, Clone)]
pub struct PluginLoader {
    roots: ScopeRoots,
}

impl PluginLoader {
    pub fn new(roots: ScopeRoots) -> Self {
        tracing::debug!("initializing plugin loader");
        Self { roots }
    }

    /// `Ok(None)` when the registry file does not exist.
    fn read_registry(&self, path: &Path) -> Result<Option<InstalledPluginsRegistry>, DiscoveryError> {
        let Some(data) = read_if_exists(path)? else {
            return Ok(None);
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|err| DiscoveryError::parse(path, err))
    }

    fn load_installation(
        &self,
        key: &str,
        install: &InstalledPluginInfo,
        scope: Scope,
    ) -> Result<Plugin, DiscoveryError> {
        let manifest_path = PathBuf::from(&install.install_path)
            .join(".claude-plugin")
            .join("plugin.json");

        let manifest = match read_if_exists(&manifest_path)? {
            Some(data) => {
                let manifest: PluginManifest = serde_json::from_slice(&data)
                    .map_err(|err| DiscoveryError::parse(&manifest_path, err))?;
                tracing::debug!(key, name = %manifest.name, scope = %scope, "loaded plugin with manifest");
                Some(manifest)
            }
            None => {
                tracing::debug!(
                    key,
                    path = %install.install_path,
                    "plugin manifest not found, using registry data"
                );
                None
            }
        };

        let manifest_present = manifest.is_some();
        let manifest = manifest.unwrap_or_default();

        let name = if manifest.name.is_empty() {
            name_from_key(key).to_string()
        } else {
            manifest.name
        };
        let description = if manifest_present {
            manifest.description
        } else {
            REGISTRY_ONLY_DESCRIPTION.to_string()
        };
        let version = if install.version.is_empty() {
            manifest.version
        } else {
            install.version.clone()
        };

        Ok(Plugin {
            info: CapabilityInfo::new(name, description, CapabilityType::Plugin, scope),
            version,
            author: manifest.author,
            homepage: manifest.homepage,
            repository: manifest.repository,
            license: manifest.license,
            keywords: manifest.keywords,
            mcp_servers: Vec::new(),
            commands: Vec::new(),
            skills: Vec::new(),
            agents: Vec::new(),
            path: install.install_path.clone(),
        })
    }
}

impl Loader for PluginLoader {
    type Record = Plugin;

    /// A missing registry or manifest is skipped; a malformed one fails the
    /// whole call.
    fn load(&self, scope: Scope) -> Result<Vec<Plugin>, DiscoveryError> {
        let registry_path = self.roots.installed_plugins(scope)?;

        let registry = match self.read_registry(&registry_path) {
            Ok(Some(registry)) => registry,
            Ok(None) => {
                tracing::info!(scope = %scope, "no plugin registry found");
                return Ok(Vec::new());
            }
            Err(err) => {
                tracing::error!(path = %registry_path.display(), "failed to load plugin registry: {err}");
                return Err(err);
            }
        };

        let mut plugins = Vec::new();
        for (key, installs) in &registry.plugins {
            for install in installs.iter().filter(|install| install.is_in(scope)) {
                plugins.push(self.load_installation(key, install, scope)?);
            }
        }

        tracing::info!(count = plugins.len(), scope = %scope, "discovered plugins from registry");
        Ok(plugins)
    }
}

/// `acme-tools@github.com/acme/tools` → `acme-tools`. Keys without an `@`
/// after the first character are used whole.
pub fn name_from_key(key: &str) -> &str {
    match key.find('@') {
        Some(idx) if idx > 0 => &key[..idx],
        _ => key,
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, DiscoveryError> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(DiscoveryError::io(path, err)),
    }
}
