use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Loader;
use super::error::DiscoveryError;
use super::frontmatter::{self, Document};
use super::scope::ScopeRoots;
use crate::model::capability::{CapabilityInfo, CapabilityType, FileCapability, Scope};

/// On-disk layout of a Markdown-backed capability kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownKind {
    /// `commands/*.md`
    Command,
    /// `agents/*.md`
    Agent,
    /// `skills/*/SKILL.md`
    Skill,
}

impl MarkdownKind {
    fn dir_name(self) -> &'static str {
        match self {
            MarkdownKind::Command => "commands",
            MarkdownKind::Agent => "agents",
            MarkdownKind::Skill => "skills",
        }
    }

    fn capability_type(self) -> CapabilityType {
        match self {
            MarkdownKind::Command => CapabilityType::Command,
            MarkdownKind::Agent => CapabilityType::Agent,
            MarkdownKind::Skill => CapabilityType::Skill,
        }
    }
}

/// Loads commands, agents or skills from a scope's `.claude` directory.
#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    roots: ScopeRoots,
    kind: MarkdownKind,
}

impl MarkdownLoader {
    pub fn new(roots: ScopeRoots, kind: MarkdownKind) -> Self {
        tracing::debug!(kind = ?kind, "initializing markdown loader");
        Self { roots, kind }
    }

    /// `(default name, file)` pairs in file-name order.
    fn candidates(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>, DiscoveryError> {
        let entries = fs::read_dir(dir).map_err(|err| DiscoveryError::io(dir, err))?;

        let mut found: Vec<(String, PathBuf)> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(path = %dir.display(), "failed to read directory entry: {err}");
                    None
                }
            })
            .filter_map(|entry| {
                let path = entry.path();
                let file_name = entry.file_name().to_str()?.to_string();

                match self.kind {
                    MarkdownKind::Command | MarkdownKind::Agent => {
                        if path.is_dir() {
                            return None;
                        }
                        let stem = file_name.strip_suffix(".md")?;
                        Some((stem.to_string(), path))
                    }
                    MarkdownKind::Skill => {
                        if !path.is_dir() {
                            return None;
                        }
                        let skill_file = path.join("SKILL.md");
                        skill_file.exists().then_some((file_name, skill_file))
                    }
                }
            })
            .collect();

        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }

    fn read_capability(
        &self,
        default_name: String,
        path: PathBuf,
        scope: Scope,
    ) -> Option<FileCapability> {
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read file: {err}");
                return None;
            }
        };
        let content = String::from_utf8_lossy(&raw);

        let Document { metadata, body } = frontmatter::parse(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), "failed to parse frontmatter: {err}");
            Document::bodyless(&content)
        });

        let metadata = metadata.unwrap_or_default();
        let name = if metadata.name.is_empty() {
            default_name
        } else {
            metadata.name
        };

        tracing::debug!(name = %name, scope = %scope, "discovered {}", self.kind.capability_type());

        Some(FileCapability {
            info: CapabilityInfo::new(
                name,
                metadata.description,
                self.kind.capability_type(),
                scope,
            ),
            file_path: path.to_string_lossy().into_owned(),
            content: body,
        })
    }
}

impl Loader for MarkdownLoader {
    type Record = FileCapability;

    fn load(&self, scope: Scope) -> Result<Vec<FileCapability>, DiscoveryError> {
        let dir = self.roots.base_dir(scope)?.join(self.kind.dir_name());

        let candidates = match self.candidates(&dir) {
            Ok(candidates) => candidates,
            Err(DiscoveryError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %dir.display(), "directory not found");
                return Ok(Vec::new());
            }
            Err(err) => {
                tracing::error!(path = %dir.display(), "failed to read directory: {err}");
                return Err(err);
            }
        };

        let capabilities: Vec<FileCapability> = candidates
            .into_iter()
            .filter_map(|(name, path)| self.read_capability(name, path, scope))
            .collect();

        tracing::info!(
            count = capabilities.len(),
            path = %dir.display(),
            "discovered {}s",
            self.kind.capability_type()
        );
        Ok(capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        home: TempDir,
        cwd: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                home: TempDir::new().unwrap(),
                cwd: TempDir::new().unwrap(),
            }
        }

        fn roots(&self) -> ScopeRoots {
            ScopeRoots::new(self.home.path(), self.cwd.path())
        }

        fn write(&self, scope: Scope, relative: &str, content: &str) -> PathBuf {
            let path = self.roots().base_dir(scope).unwrap().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path
        }

        fn loader(&self, kind: MarkdownKind) -> MarkdownLoader {
            MarkdownLoader::new(self.roots(), kind)
        }
    }

    #[test]
    fn missing_directory_is_empty_not_an_error() {
        let fx = Fixture::new();

        for kind in [MarkdownKind::Command, MarkdownKind::Agent, MarkdownKind::Skill] {
            assert!(fx.loader(kind).load(Scope::User).unwrap().is_empty());
        }
    }

    #[test]
    fn command_without_frontmatter_is_named_after_file() {
        let fx = Fixture::new();
        let path = fx.write(Scope::Project, "commands/foo.md", "Run the foo checks.\n");

        let commands = fx.loader(MarkdownKind::Command).load(Scope::Project).unwrap();

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].info.name, "foo");
        assert_eq!(commands[0].info.description, "");
        assert_eq!(commands[0].info.kind, CapabilityType::Command);
        assert_eq!(commands[0].info.scope, Scope::Project);
        assert_eq!(commands[0].content, "Run the foo checks.\n");
        assert_eq!(commands[0].file_path, path.to_string_lossy());
    }

    #[test]
    fn agent_frontmatter_overrides_name_and_sets_description() {
        let fx = Fixture::new();
        fx.write(
            Scope::User,
            "agents/reviewer.md",
            "---\nname: code-reviewer\ndescription: Reviews diffs\nmodel: opus\n---\nYou review code.",
        );

        let agents = fx.loader(MarkdownKind::Agent).load(Scope::User).unwrap();

        assert_eq!(agents[0].info.name, "code-reviewer");
        assert_eq!(agents[0].info.description, "Reviews diffs");
        assert_eq!(agents[0].info.kind, CapabilityType::Agent);
        assert_eq!(agents[0].content, "You review code.");
    }

    #[test]
    fn empty_frontmatter_name_keeps_file_name() {
        let fx = Fixture::new();
        fx.write(Scope::User, "commands/deploy.md", "---\nname:\ndescription: Ship it\n---\n");

        let commands = fx.loader(MarkdownKind::Command).load(Scope::User).unwrap();

        assert_eq!(commands[0].info.name, "deploy");
        assert_eq!(commands[0].info.description, "Ship it");
    }

    #[test]
    fn flat_scan_skips_subdirectories_and_other_extensions() {
        let fx = Fixture::new();
        fx.write(Scope::User, "commands/b.md", "b");
        fx.write(Scope::User, "commands/a.md", "a");
        fx.write(Scope::User, "commands/notes.txt", "nope");
        fx.write(Scope::User, "commands/nested/c.md", "nested");

        let names: Vec<String> = fx
            .loader(MarkdownKind::Command)
            .load(Scope::User)
            .unwrap()
            .into_iter()
            .map(|command| command.info.name)
            .collect();

        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn unterminated_frontmatter_keeps_file_with_whole_body() {
        let fx = Fixture::new();
        let raw = "---\nname: broken\nstill going";
        fx.write(Scope::User, "agents/broken.md", raw);

        let agents = fx.loader(MarkdownKind::Agent).load(Scope::User).unwrap();

        assert_eq!(agents[0].info.name, "broken");
        assert_eq!(agents[0].info.description, "");
        assert_eq!(agents[0].content, raw);
    }

    #[test]
    fn skill_name_comes_from_frontmatter_over_directory() {
        let fx = Fixture::new();
        fx.write(
            Scope::User,
            "skills/bar/SKILL.md",
            "---\nname: Custom\ndescription: A skill\n---\nSteps",
        );

        let skills = fx.loader(MarkdownKind::Skill).load(Scope::User).unwrap();

        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].info.name, "Custom");
        assert_eq!(skills[0].info.kind, CapabilityType::Skill);
        assert_eq!(skills[0].content, "Steps");
        assert!(skills[0].file_path.ends_with("SKILL.md"));
    }

    #[test]
    fn skill_scan_requires_skill_file_in_subdirectory() {
        let fx = Fixture::new();
        fx.write(Scope::Project, "skills/plain/SKILL.md", "no header");
        fx.write(Scope::Project, "skills/empty/README.md", "not a skill");
        fx.write(Scope::Project, "skills/SKILL.md", "top-level file");

        let skills = fx.loader(MarkdownKind::Skill).load(Scope::Project).unwrap();

        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].info.name, "plain");
        assert_eq!(skills[0].content, "no header");
    }

    #[test]
    fn scopes_are_read_independently() {
        let fx = Fixture::new();
        fx.write(Scope::User, "commands/mine.md", "");

        let loader = fx.loader(MarkdownKind::Command);

        assert_eq!(loader.load(Scope::User).unwrap().len(), 1);
        assert!(loader.load(Scope::Project).unwrap().is_empty());
    }

    #[test]
    fn directory_path_that_is_a_file_is_an_io_error() {
        let fx = Fixture::new();
        let base = fx.roots().base_dir(Scope::User).unwrap();
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("commands"), "not a directory").unwrap();

        let err = fx.loader(MarkdownKind::Command).load(Scope::User).unwrap_err();

        assert!(matches!(err, DiscoveryError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_without_aborting_the_scan() {
        let fx = Fixture::new();
        let ok = fx.write(Scope::User, "commands/ok.md", "fine");
        let dir = ok.parent().unwrap();
        std::os::unix::fs::symlink(dir.join("missing-target.md"), dir.join("broken.md")).unwrap();

        let commands = fx.loader(MarkdownKind::Command).load(Scope::User).unwrap();

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].info.name, "ok");
    }

    #[test]
    fn unavailable_root_fails_only_that_scope() {
        let fx = Fixture::new();
        fx.write(Scope::User, "agents/helper.md", "");
        let roots = ScopeRoots::with_roots(Some(fx.home.path().to_path_buf()), None);
        let loader = MarkdownLoader::new(roots, MarkdownKind::Agent);

        assert_eq!(loader.load(Scope::User).unwrap().len(), 1);
        assert!(matches!(
            loader.load(Scope::Project),
            Err(DiscoveryError::WorkingDirUnavailable)
        ));
    }
}
