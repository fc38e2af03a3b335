use std::collections::BTreeMap;
use std::fs;
use std::io;

use serde::Deserialize;

use super::Loader;
use super::error::DiscoveryError;
use super::scope::ScopeRoots;
use crate::model::capability::{CapabilityInfo, CapabilityType, McpServer, Scope};
use crate::model::serde_ext::null_as_default;

/// One entry of `mcpServers`.
#[derive(Debug, Clone, Default, Deserialize)]
struct McpServerConfig {
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    server_kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    args: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    env: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
}

/// The part of `.claude.json` / `.mcp.json` this tool reads. `null` values
/// are treated like missing ones.
#[derive(Debug, Default, Deserialize)]
struct ClaudeConfig {
    #[serde(default, deserialize_with = "null_as_default", rename = "mcpServers")]
    mcp_servers: BTreeMap<String, McpServerConfig>,
}

#[derive(Debug, Clone)]
pub struct McpLoader {
    roots: ScopeRoots,
}

impl McpLoader {
    pub fn new(roots: ScopeRoots) -> Self {
        tracing::debug!("initializing MCP loader");
        Self { roots }
    }
}

impl Loader for McpLoader {
    type Record = McpServer;

    /// Servers come back sorted by name.
    fn load(&self, scope: Scope) -> Result<Vec<McpServer>, DiscoveryError> {
        let config_path = self.roots.mcp_config(scope)?;

        let data = match fs::read(&config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %config_path.display(), "config file not found, skipping");
                return Ok(Vec::new());
            }
            Err(err) => {
                tracing::error!(path = %config_path.display(), "failed to read config file: {err}");
                return Err(DiscoveryError::io(config_path, err));
            }
        };

        let config: ClaudeConfig = serde_json::from_slice(&data).map_err(|err| {
            tracing::error!(path = %config_path.display(), "failed to parse config JSON: {err}");
            DiscoveryError::parse(&config_path, err)
        })?;

        let servers: Vec<McpServer> = config
            .mcp_servers
            .into_iter()
            .map(|(name, server)| {
                tracing::debug!(name = %name, scope = %scope, "loaded MCP server");
                McpServer {
                    info: CapabilityInfo::new(name, "", CapabilityType::Mcp, scope),
                    command: server.command,
                    args: server.args,
                    env: server.env,
                    server_kind: server.server_kind,
                    url: server.url,
                }
            })
            .collect();

        tracing::info!(
            count = servers.len(),
            scope = %scope,
            path = %config_path.display(),
            "loaded MCP servers"
        );
        Ok(servers)
    }
}
