use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::serde_ext::null_as_default;

/// Where a capability is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    User,
    Project,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::User, Scope::Project];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five kinds of capability the tool knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityType {
    Mcp,
    Command,
    Skill,
    Agent,
    Plugin,
}

impl CapabilityType {
    /// Batch output order.
    pub const ALL: [CapabilityType; 5] = [
        CapabilityType::Mcp,
        CapabilityType::Command,
        CapabilityType::Skill,
        CapabilityType::Agent,
        CapabilityType::Plugin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityType::Mcp => "mcp",
            CapabilityType::Command => "command",
            CapabilityType::Skill => "skill",
            CapabilityType::Agent => "agent",
            CapabilityType::Plugin => "plugin",
        }
    }
}

impl fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every capability. Serialized with capitalized field
/// names to keep the JSON output format stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Type")]
    pub kind: CapabilityType,
    #[serde(rename = "Scope")]
    pub scope: Scope,
}

impl CapabilityInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: CapabilityType,
        scope: Scope,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McpServer {
    #[serde(flatten)]
    pub info: CapabilityInfo,
    #[serde(rename = "Command")]
    pub command: String,
    #[serde(rename = "Args")]
    pub args: Vec<String>,
    #[serde(rename = "Env")]
    pub env: BTreeMap<String, String>,
    /// Transport type (`stdio`, `http`, `sse`, ...).
    #[serde(rename = "MCPType")]
    pub server_kind: String,
    #[serde(rename = "Url")]
    pub url: String,
}

/// A Markdown-backed capability: command, skill or agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCapability {
    #[serde(flatten)]
    pub info: CapabilityInfo,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    /// Document body with the frontmatter block stripped.
    #[serde(rename = "Content")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginAuthor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    #[serde(flatten)]
    pub info: CapabilityInfo,
    pub version: String,
    pub author: PluginAuthor,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub homepage: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repository: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    // Bundled capabilities are not discovered yet; the fields keep the JSON
    // shape stable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mcp_servers: Vec<McpServer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<FileCapability>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<FileCapability>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<FileCapability>,
    /// Install path from the registry.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Any discovered capability. The variant set is closed; every consumer
/// matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Capability {
    Mcp(McpServer),
    Command(FileCapability),
    Skill(FileCapability),
    Agent(FileCapability),
    Plugin(Plugin),
}

impl Capability {
    pub fn info(&self) -> &CapabilityInfo {
        match self {
            Capability::Mcp(server) => &server.info,
            Capability::Command(file) | Capability::Skill(file) | Capability::Agent(file) => {
                &file.info
            }
            Capability::Plugin(plugin) => &plugin.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn description(&self) -> &str {
        &self.info().description
    }

    pub fn kind(&self) -> CapabilityType {
        self.info().kind
    }

    pub fn scope(&self) -> Scope {
        self.info().scope
    }
}

impl From<McpServer> for Capability {
    fn from(server: McpServer) -> Self {
        Capability::Mcp(server)
    }
}

impl From<Plugin> for Capability {
    fn from(plugin: Plugin) -> Self {
        Capability::Plugin(plugin)
    }
}

impl From<FileCapability> for Capability {
    /// Picks the variant from the record's own kind tag.
    fn from(file: FileCapability) -> Self {
        match file.info.kind {
            CapabilityType::Skill => Capability::Skill(file),
            CapabilityType::Agent => Capability::Agent(file),
            _ => Capability::Command(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> FileCapability {
        FileCapability {
            info: CapabilityInfo::new(name, "does things", CapabilityType::Command, Scope::User),
            file_path: format!("/tmp/{name}.md"),
            content: "body".to_string(),
        }
    }

    #[test]
    fn file_capability_lands_in_variant_matching_its_kind() {
        let mut agent = command("reviewer");
        agent.info.kind = CapabilityType::Agent;

        assert!(matches!(Capability::from(agent), Capability::Agent(_)));
        assert!(matches!(Capability::from(command("fmt")), Capability::Command(_)));
    }

    #[test]
    fn command_serializes_with_go_style_field_names() {
        let json = serde_json::to_value(Capability::from(command("fmt"))).unwrap();

        assert_eq!(json["Name"], "fmt");
        assert_eq!(json["Type"], "command");
        assert_eq!(json["Scope"], "user");
        assert_eq!(json["FilePath"], "/tmp/fmt.md");
        assert_eq!(json["Content"], "body");
    }

    #[test]
    fn plugin_omits_empty_optional_fields() {
        let plugin = Plugin {
            info: CapabilityInfo::new("acme", "", CapabilityType::Plugin, Scope::Project),
            version: "1.0.0".to_string(),
            author: PluginAuthor::default(),
            homepage: String::new(),
            repository: String::new(),
            license: String::new(),
            keywords: Vec::new(),
            mcp_servers: Vec::new(),
            commands: Vec::new(),
            skills: Vec::new(),
            agents: Vec::new(),
            path: String::new(),
        };

        let json = serde_json::to_value(Capability::from(plugin)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["author"], serde_json::json!({ "name": "" }));
        assert!(!object.contains_key("keywords"));
        assert!(!object.contains_key("mcp_servers"));
        assert!(!object.contains_key("path"));
    }
}
