//! Frontmatter parsing for content documents.
//!
//! Only the `title` and `description` fields are of interest to the
//! exporters; the rest of the frontmatter is dropped.

/// Title and description extracted from a document's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// `title:` field, quotes stripped.
    pub title: Option<String>,
    /// `description:` field, quotes stripped.
    pub description: Option<String>,
}

/// Split a document into its frontmatter text and body.
///
/// Returns `None` when the document carries no leading `---` fence.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---\n")?;
    let end = rest.find("\n---\n")?;
    Some((&rest[..end], &rest[end + 5..]))
}

/// Parse a document, yielding its frontmatter fields and body.
///
/// A document without frontmatter yields empty fields and the full
/// content as body.
pub fn parse(content: &str) -> (Frontmatter, &str) {
    match split(content) {
        Some((front, body)) => (
            Frontmatter {
                title: field(front, "title"),
                description: field(front, "description"),
            },
            body,
        ),
        None => (Frontmatter::default(), content),
    }
}

fn field(frontmatter: &str, name: &str) -> Option<String> {
    for line in frontmatter.lines() {
        let Some(rest) = line.strip_prefix(name) else {
            continue;
        };
        let Some(raw) = rest.strip_prefix(':') else {
            continue;
        };
        let value: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '"' && *c != '\'')
            .collect();
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}
