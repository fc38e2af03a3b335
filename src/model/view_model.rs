use std::collections::BTreeMap;

use super::capability::{Capability, CapabilityType, Scope};

/// Type-specific data a view carries for its detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Extra {
    None,
    Mcp {
        server_kind: String,
        url: String,
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    Plugin {
        version: String,
        author: String,
        license: String,
    },
}

/// Display projection of a capability. Owns copies of everything it shows,
/// so it never aliases the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityView {
    name: String,
    description: String,
    scope: Scope,
    kind: CapabilityType,
    file_path: String,
    content: String,
    extra: Extra,
}

impl CapabilityView {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn kind(&self) -> CapabilityType {
        self.kind
    }

    /// Secondary list text, e.g. `[user] Formats the code`.
    pub fn list_label(&self) -> String {
        format!("[{}] {}", self.scope, self.description)
    }

    pub fn render_details(&self) -> Vec<String> {
        match &self.extra {
            Extra::None => Vec::new(),
            Extra::Mcp {
                server_kind,
                url,
                command,
                args,
                env,
            } => {
                let mut details = Vec::new();
                if !server_kind.is_empty() {
                    details.push(format!("Type: {server_kind}"));
                }
                if !url.is_empty() {
                    details.push(format!("URL: {url}"));
                }
                if !command.is_empty() {
                    details.push(format!("Command: {command}"));
                }
                if !args.is_empty() {
                    details.push("Arguments:".to_string());
                    details.extend(args.iter().map(|arg| format!("  {arg}")));
                }
                if !env.is_empty() {
                    details.push("Environment:".to_string());
                    details.extend(env.iter().map(|(key, value)| format!("  {key}={value}")));
                }
                details
            }
            Extra::Plugin {
                version,
                author,
                license,
            } => {
                let mut details = vec![format!("Version: {version}")];
                if !author.is_empty() {
                    details.push(format!("Author: {author}"));
                }
                if !license.is_empty() {
                    details.push(format!("License: {license}"));
                }
                details
            }
        }
    }

    /// Full detail pane text: header, path, description, detail lines, body.
    pub fn detail_text(&self) -> String {
        let mut text = format!("{} [{}]", self.name, self.scope);

        if !self.file_path.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.file_path);
        }

        if !self.description.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.description);
        }

        let details = self.render_details();
        if !details.is_empty() {
            text.push('\n');
            for detail in details {
                text.push('\n');
                text.push_str(&detail);
            }
        }

        if !self.content.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.content);
        }

        text
    }
}

impl From<&Capability> for CapabilityView {
    fn from(capability: &Capability) -> Self {
        let info = capability.info();
        let mut view = CapabilityView {
            name: info.name.clone(),
            description: info.description.clone(),
            scope: info.scope,
            kind: info.kind,
            file_path: String::new(),
            content: String::new(),
            extra: Extra::None,
        };

        match capability {
            Capability::Mcp(server) => {
                view.extra = Extra::Mcp {
                    server_kind: server.server_kind.clone(),
                    url: server.url.clone(),
                    command: server.command.clone(),
                    args: server.args.clone(),
                    env: server.env.clone(),
                };
            }
            Capability::Command(file) | Capability::Skill(file) | Capability::Agent(file) => {
                view.file_path = file.file_path.clone();
                view.content = file.content.clone();
            }
            Capability::Plugin(plugin) => {
                view.file_path = plugin.path.clone();
                view.extra = Extra::Plugin {
                    version: plugin.version.clone(),
                    author: plugin.author.name.clone(),
                    license: plugin.license.clone(),
                };
            }
        }

        view
    }
}
