use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::model::capability::{CapabilityType, Scope};

#[derive(Debug, Parser)]
#[command(name = "claudectl")]
#[command(about = "Browse MCP servers, commands, skills, agents and plugins")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and exit
    #[arg(long)]
    pub version: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// List MCP servers
    #[arg(long)]
    pub list_mcps: bool,

    /// List commands
    #[arg(long)]
    pub list_commands: bool,

    /// List skills
    #[arg(long)]
    pub list_skills: bool,

    /// List agents
    #[arg(long)]
    pub list_agents: bool,

    /// List plugins
    #[arg(long)]
    pub list_plugins: bool,

    /// Which scope to list
    #[arg(long, value_enum, default_value_t = ScopeFilter::All)]
    pub scope: ScopeFilter,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeFilter {
    User,
    Project,
    All,
}

impl ScopeFilter {
    pub fn scopes(self) -> &'static [Scope] {
        match self {
            ScopeFilter::User => &[Scope::User],
            ScopeFilter::Project => &[Scope::Project],
            ScopeFilter::All => &Scope::ALL,
        }
    }
}

impl Cli {
    /// Any `--list-*` flag selects batch mode.
    pub fn is_batch(&self) -> bool {
        !self.requested_kinds().is_empty()
    }

    pub fn requested_kinds(&self) -> Vec<CapabilityType> {
        [
            (self.list_mcps, CapabilityType::Mcp),
            (self.list_commands, CapabilityType::Command),
            (self.list_skills, CapabilityType::Skill),
            (self.list_agents, CapabilityType::Agent),
            (self.list_plugins, CapabilityType::Plugin),
        ]
        .into_iter()
        .filter_map(|(requested, kind)| requested.then_some(kind))
        .collect()
    }

    pub fn log_filter<'a>(&self, configured: &'a str) -> &'a str {
        if self.debug { "claudectl=debug" } else { configured }
    }
}

pub fn version_line() -> String {
    format!("claudectl version {}", env!("CARGO_PKG_VERSION"))
}
