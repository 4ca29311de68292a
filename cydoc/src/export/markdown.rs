//! Per-document markdown export.
//!
//! Every content page is exported as a processed markdown copy under
//! `dist/markdown/` for LLM consumption: frontmatter is stripped with
//! the title and description hoisted into the body, imports and
//! component markup are removed, and blank runs are collapsed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use log::{debug, error, info};
use regex::Regex;

use crate::ctx::AppContext;

use super::frontmatter;

/// Export processed markdown copies of all documentation pages.
///
/// Per-file failures are logged and skipped; the exported count is
/// returned.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created.
pub fn export_markdown(ctx: &AppContext) -> anyhow::Result<usize> {
    let content_dir = ctx.paths.content_dir();
    let out_dir = ctx.paths.markdown_dir();

    let files = super::content_files(&content_dir);
    info!("found {} documentation files to export", files.len());

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut exported = 0;
    for file in &files {
        match export_one(&content_dir, &out_dir, file) {
            Ok(path) => {
                exported += 1;
                debug!("exported {}", path.display());
            }
            Err(e) => error!("failed to export {}: {e:#}", file.display()),
        }
    }
    Ok(exported)
}

fn export_one(content_dir: &Path, out_dir: &Path, file: &Path) -> anyhow::Result<PathBuf> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let processed = process_content(&hoist_frontmatter(&content));

    let out_path = out_dir.join(super::markdown_url_path(content_dir, file));
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&out_path, processed)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(out_path)
}

/// Strip frontmatter, hoisting title and description into the body.
///
/// The title becomes a leading `#` heading unless the body already
/// starts with one; the description becomes a leading paragraph.
pub fn hoist_frontmatter(content: &str) -> String {
    let (front, body) = frontmatter::parse(content);
    if body.len() == content.len() {
        return content.to_string();
    }

    let mut out = String::new();
    if let Some(title) = &front.title {
        if !body.trim().starts_with("# ") {
            out.push_str(&format!("# {title}\n\n"));
        }
    }
    if let Some(description) = &front.description {
        out.push_str(&format!("{description}\n\n"));
    }
    out.push_str(body);
    out
}

/// Reduce MDX leftovers to plain markdown.
///
/// Import statements are dropped, `<Image>` components become markdown
/// images, remaining paired components are unwrapped keeping their
/// content, and runs of blank lines collapse to one.
pub fn process_content(content: &str) -> String {
    let without_imports: Vec<&str> = content
        .lines()
        .map(|line| {
            if line.starts_with("import ") || line.starts_with("import\t") {
                ""
            } else {
                line
            }
        })
        .collect();
    let text = without_imports.join("\n");

    let text = image_re()
        .replace_all(&text, "![$alt]($src)")
        .into_owned();
    let text = unwrap_components(&text);
    let text = blank_runs_re().replace_all(&text, "\n\n").into_owned();
    text.trim().to_string()
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<Image\s+src=\{(?P<src>[^}]+)\}\s+alt="(?P<alt>[^"]*)"[^>]*/>"#)
            .expect("static regex")
    })
}

fn open_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(\w+)[^>]*>").expect("static regex"))
}

fn blank_runs_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n\n+").expect("static regex"))
}

/// Drop paired component tags, keeping the wrapped content.
fn unwrap_components(content: &str) -> String {
    let mut text = content.to_string();
    let mut search_from = 0;
    while let Some(caps) = open_tag_re().captures_at(&text, search_from) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let open = (whole.start(), whole.end());
        let name = tag.as_str().to_string();
        let close = format!("</{name}>");
        match text[open.1..].find(&close) {
            Some(rel) => {
                let inner = text[open.1..open.1 + rel].to_string();
                text.replace_range(open.0..open.1 + rel + close.len(), &inner);
                search_from = open.0;
            }
            None => {
                // unpaired tag, leave it alone
                search_from = open.1;
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_hoisted_once() {
        let out = hoist_frontmatter("---\ntitle: Setup\ndescription: How to set up\n---\nContent here\n");
        assert!(out.starts_with("# Setup\n\nHow to set up\n\nContent here"));

        let out = hoist_frontmatter("---\ntitle: Setup\n---\n# Setup\n\nContent\n");
        assert!(!out.starts_with("# Setup\n\n# Setup"));
    }

    #[test]
    fn test_import_lines_dropped() {
        let out = process_content("import { Card } from '@astrojs/starlight/components';\n\nText\n");
        assert_eq!(out, "Text");
    }

    #[test]
    fn test_image_component_converted() {
        let out = process_content(r#"<Image src={diagram} alt="Data flow" width="600"/>"#);
        assert_eq!(out, "![Data flow](diagram)");
    }

    #[test]
    fn test_components_unwrapped() {
        let out = process_content("<Card title=\"x\">inner text</Card>\n");
        assert_eq!(out, "inner text");

        let out = process_content("<CardGrid>\n<Card>one</Card>\n<Card>two</Card>\n</CardGrid>\n");
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn test_blank_runs_collapse() {
        let out = process_content("a\n\n\n\nb");
        assert_eq!(out, "a\n\nb");
    }
}
