//! `---` delimited metadata headers on Markdown documents.
//!
//! Only `name` and `description` are read, as flat `key: value` lines. The
//! header is not YAML; anything fancier is ignored.

use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub description: String,
}

/// A document split into its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `None` when the document has no header.
    pub metadata: Option<Metadata>,
    pub body: String,
}

impl Document {
    /// The whole input as body, with no metadata.
    pub fn bodyless(content: &str) -> Self {
        Self {
            metadata: None,
            body: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    #[error("frontmatter opened with --- but never closed")]
    Unterminated,
}

pub fn has_opening_delimiter(content: &str) -> bool {
    content.starts_with("---\n") || content.starts_with("---\r\n")
}

pub fn parse(content: &str) -> Result<Document, FrontmatterError> {
    if !has_opening_delimiter(content) {
        return Ok(Document::bodyless(content));
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let end = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == "---")
        .map(|idx| idx + 1)
        .ok_or(FrontmatterError::Unterminated)?;

    Ok(Document {
        metadata: Some(parse_key_values(&lines[1..end])),
        body: lines[end + 1..].join("\n"),
    })
}

fn parse_key_values(lines: &[&str]) -> Metadata {
    let mut metadata = Metadata::default();

    for line in lines {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };

        match key.trim() {
            "name" => metadata.name = value.trim().to_string(),
            "description" => metadata.description = value.trim().to_string(),
            _ => {}
        }
    }

    metadata
}
