//! Schema documentation page generation.
//!
//! Every JSON schema source becomes a markdown documentation page under
//! `content/schemas/`, with its property tree rendered fully expanded.
//! Each schema directory gets an index page listing its schemas, and a
//! main index points readers at the categories and the downloadable
//! archive.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};
use serde_json::Value;

use schemadoc::view::write_markdown;
use schemadoc::{kebab_case, ExpandState, SchemaNode, SchemaTree, TreeRenderer};

use crate::ctx::AppContext;

/// One generated schema page, tracked for the index pages.
#[derive(Debug, Clone)]
struct SchemaPage {
    title: String,
    slug: String,
}

/// Generate documentation pages for all JSON schemas.
///
/// Returns the number of schema pages written, not counting indexes.
///
/// # Errors
///
/// Returns an error when a schema cannot be read or parsed, or a page
/// cannot be written.
pub fn generate_schema_pages(ctx: &AppContext) -> anyhow::Result<usize> {
    let schemas_dir = ctx.paths.schemas_dir();
    let pages_dir = ctx.paths.content_dir().join("schemas");

    let files = super::schema_files(&schemas_dir);
    info!("found {} schema files to document", files.len());

    let mut directories: BTreeMap<String, Vec<SchemaPage>> = BTreeMap::new();
    let mut generated = 0;
    for file in &files {
        let page = generate_one(&schemas_dir, &pages_dir, file)?;
        let rel = super::relative_url_path(&schemas_dir, file);
        let dir = rel.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
        directories.entry(dir.to_string()).or_default().push(page);
        generated += 1;
    }

    for (dir, pages) in &directories {
        write_directory_index(&pages_dir, dir, pages)?;
    }
    write_main_index(&pages_dir, &directories)?;
    Ok(generated)
}

fn generate_one(schemas_dir: &Path, pages_dir: &Path, file: &Path) -> anyhow::Result<SchemaPage> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let schema: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = schema
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(&stem)
        .to_string();
    let description = schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Schema definition for {stem}"));

    let rel = super::relative_url_path(schemas_dir, file);
    let rel_dir = rel.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
    let category = rel_dir.split('/').next().filter(|c| !c.is_empty());
    let category = category.unwrap_or("common");

    let slug = kebab_case(&stem);
    let out_path = if rel_dir.is_empty() {
        pages_dir.join(format!("{slug}.md"))
    } else {
        pages_dir.join(rel_dir).join(format!("{slug}.md"))
    };
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut page = String::new();
    page.push_str("---\n");
    page.push_str(&format!("title: {}\n", escape_frontmatter(&title)));
    page.push_str(&format!(
        "description: {}\n",
        escape_frontmatter(&description)
    ));
    page.push_str("---\n\n");
    page.push_str(&format!("# {title}\n\n"));
    page.push_str(&format!("{description}\n\n"));

    let node = SchemaNode::from_value(&schema);
    let state = ExpandState::expand_all(&node);
    let tree = TreeRenderer::new(&state).render(&node, 0);
    if let SchemaTree::Properties(_) = &tree {
        page.push_str("## Properties\n\n");
        page.push_str(&write_markdown(&tree));
        page.push('\n');
    }

    page.push_str(&format!(
        "## Related Schemas\n\nSee other schemas in the [{category}](/schemas/{category}/) category.\n"
    ));

    fs::write(&out_path, page)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    debug!("generated {}", out_path.display());

    Ok(SchemaPage { title, slug })
}

fn write_directory_index(
    pages_dir: &Path,
    dir: &str,
    pages: &[SchemaPage],
) -> anyhow::Result<PathBuf> {
    let display = dir
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(crate::config::capitalize)
        .unwrap_or_else(|| "All".to_string());

    let mut index = String::new();
    index.push_str("---\n");
    index.push_str(&format!("title: {display} Schemas\n"));
    index.push_str(&format!(
        "description: JSON schema definitions in the {display} category\n"
    ));
    index.push_str("---\n\n");
    index.push_str(&format!("# {display} Schemas\n\n"));

    let mut sorted: Vec<&SchemaPage> = pages.iter().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    for page in sorted {
        index.push_str(&format!("- [{}](./{}/)\n", page.title, page.slug));
    }

    let out_path = if dir.is_empty() {
        pages_dir.join("all.md")
    } else {
        pages_dir.join(dir).join("index.md")
    };
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&out_path, index)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(out_path)
}

fn write_main_index(
    pages_dir: &Path,
    directories: &BTreeMap<String, Vec<SchemaPage>>,
) -> anyhow::Result<()> {
    let mut index = String::new();
    index.push_str("---\n");
    index.push_str("title: JSON Schemas\n");
    index.push_str("description: JSON schema definitions for the Cyoda platform APIs\n");
    index.push_str("---\n\n");
    index.push_str("# JSON Schemas\n\n");
    index.push_str(
        "These schemas describe the request and response shapes of the platform APIs. \
         The complete set is available as a [downloadable archive](/schemas.zip).\n\n",
    );
    index.push_str("## Categories\n\n");

    let mut categories: Vec<&str> = directories
        .keys()
        .filter(|d| !d.is_empty())
        .map(|d| d.split('/').next().unwrap_or(d))
        .collect();
    categories.sort_unstable();
    categories.dedup();
    for category in categories {
        index.push_str(&format!(
            "- [{}](/schemas/{category}/)\n",
            crate::config::capitalize(category)
        ));
    }

    index.push_str(
        "\n## Usage\n\nEach page documents one schema: its properties, required fields, \
         and cross-references to related schemas. Validate documents against the raw \
         `.json` sources from the archive.\n",
    );

    let out_path = pages_dir.join("index.md");
    fs::create_dir_all(pages_dir)
        .with_context(|| format!("Failed to create {}", pages_dir.display()))?;
    fs::write(&out_path, index)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(())
}

/// Quote a frontmatter value when it would break YAML parsing.
fn escape_frontmatter(value: &str) -> String {
    if value.contains(':') || value.contains('"') || value.contains('\'') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
