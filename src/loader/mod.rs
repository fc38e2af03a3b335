pub mod error;
pub mod frontmatter;
pub mod markdown;
pub mod mcp;
pub mod plugin;
pub mod scope;

pub use error::DiscoveryError;
pub use markdown::{MarkdownKind, MarkdownLoader};
pub use mcp::McpLoader;
pub use plugin::PluginLoader;
pub use scope::ScopeRoots;

use crate::model::capability::{Capability, CapabilityType, Scope};

/// Reads one capability kind for one scope.
///
/// A missing directory or file is an empty result. Unreadable or malformed
/// inputs fail the call; individual bad files inside a directory scan are
/// logged and skipped instead.
pub trait Loader {
    type Record: Into<Capability>;

    fn load(&self, scope: Scope) -> Result<Vec<Self::Record>, DiscoveryError>;

    /// [`Loader::load`] lifted into the capability sum type.
    fn load_capabilities(&self, scope: Scope) -> Result<Vec<Capability>, DiscoveryError> {
        Ok(self.load(scope)?.into_iter().map(Into::into).collect())
    }
}

/// One loader per capability kind.
#[derive(Debug, Clone)]
pub struct Loaders {
    pub mcp: McpLoader,
    pub command: MarkdownLoader,
    pub skill: MarkdownLoader,
    pub agent: MarkdownLoader,
    pub plugin: PluginLoader,
}

impl Loaders {
    pub fn new(roots: &ScopeRoots) -> Self {
        Self {
            mcp: McpLoader::new(roots.clone()),
            command: MarkdownLoader::new(roots.clone(), MarkdownKind::Command),
            skill: MarkdownLoader::new(roots.clone(), MarkdownKind::Skill),
            agent: MarkdownLoader::new(roots.clone(), MarkdownKind::Agent),
            plugin: PluginLoader::new(roots.clone()),
        }
    }

    pub fn load(&self, kind: CapabilityType, scope: Scope) -> Result<Vec<Capability>, DiscoveryError> {
        match kind {
            CapabilityType::Mcp => self.mcp.load_capabilities(scope),
            CapabilityType::Command => self.command.load_capabilities(scope),
            CapabilityType::Skill => self.skill.load_capabilities(scope),
            CapabilityType::Agent => self.agent.load_capabilities(scope),
            CapabilityType::Plugin => self.plugin.load_capabilities(scope),
        }
    }
}
