//! `llms.txt` index generation.
//!
//! The index lists every documentation page grouped by its top-level
//! section, one markdown link per page with the page description
//! appended. Configured sections come first in their configured order;
//! remaining sections follow alphabetically.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use crate::config::SiteConfig;
use crate::ctx::AppContext;

use super::frontmatter;

/// One page entry of the index.
#[derive(Debug, Clone)]
pub struct PageEntry {
    /// Page title from frontmatter, file stem as fallback.
    pub title: String,
    /// Page description from frontmatter, possibly empty.
    pub description: String,
    /// Exported markdown path relative to the markdown root.
    pub url_path: String,
    /// Section display name; `None` for root-level pages.
    pub section: Option<String>,
}

/// Generate the llms.txt content for the site.
///
/// # Errors
///
/// Returns an error when a content file cannot be read.
pub fn generate_llms_txt(ctx: &AppContext) -> anyhow::Result<String> {
    let pages = collect_pages(&ctx.paths.content_dir(), &ctx.site)?;
    info!("indexed {} documentation pages", pages.len());
    Ok(render_llms(&ctx.site, &pages))
}

/// Generate and write `dist/llms.txt`.
///
/// # Errors
///
/// Returns an error when generation fails or the file cannot be written.
pub fn export_llms_txt(ctx: &AppContext) -> anyhow::Result<PathBuf> {
    let content = generate_llms_txt(ctx)?;
    let dist = ctx.paths.dist_dir();
    fs::create_dir_all(&dist).with_context(|| format!("Failed to create {}", dist.display()))?;
    let out_path = dist.join("llms.txt");
    fs::write(&out_path, content)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(out_path)
}

fn collect_pages(content_dir: &Path, site: &SiteConfig) -> anyhow::Result<Vec<PageEntry>> {
    let mut pages = Vec::new();
    for file in super::content_files(content_dir) {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let (front, _) = frontmatter::parse(&content);

        let url_path = super::markdown_url_path(content_dir, &file);
        if url_path == "index.md" {
            // the main index does not list itself
            continue;
        }

        let rel = super::relative_url_path(content_dir, &file);
        let section = match rel.split_once('/') {
            Some((dir, _)) => Some(site.section_name(dir)),
            None => None,
        };

        let title = front.title.unwrap_or_else(|| {
            file.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        pages.push(PageEntry {
            title,
            description: front.description.unwrap_or_default(),
            url_path,
            section,
        });
    }
    Ok(pages)
}

/// Render collected pages into the llms.txt format.
pub fn render_llms(site: &SiteConfig, pages: &[PageEntry]) -> String {
    let mut root_pages: Vec<&PageEntry> = pages.iter().filter(|p| p.section.is_none()).collect();
    root_pages.sort_by(|a, b| a.title.cmp(&b.title));

    let mut sections: BTreeMap<&str, Vec<&PageEntry>> = BTreeMap::new();
    for page in pages {
        if let Some(section) = &page.section {
            sections.entry(section).or_default().push(page);
        }
    }
    for entries in sections.values_mut() {
        entries.sort_by(|a, b| a.title.cmp(&b.title));
    }

    let mut content = format!("# {}\n\n", site.site_title);

    if !root_pages.is_empty() {
        content.push_str("## Documentation\n\n");
        for page in &root_pages {
            content.push_str(&page_line(site, page));
        }
        content.push('\n');
    }

    for name in &site.section_order {
        if let Some(entries) = sections.remove(name.as_str()) {
            push_section(site, &mut content, name, &entries);
        }
    }
    let remaining: Vec<(&str, Vec<&PageEntry>)> = sections.into_iter().collect();
    for (name, entries) in remaining {
        push_section(site, &mut content, name, &entries);
    }

    content.trim_end().to_string()
}

fn push_section(site: &SiteConfig, content: &mut String, name: &str, entries: &[&PageEntry]) {
    if entries.is_empty() {
        return;
    }
    content.push_str(&format!("## {name}\n\n"));
    for page in entries {
        content.push_str(&page_line(site, page));
    }
    content.push('\n');
}

fn page_line(site: &SiteConfig, page: &PageEntry) -> String {
    let description = if page.description.is_empty() {
        String::new()
    } else {
        format!(": {}", page.description)
    };
    format!(
        "- [{}]({}/markdown/{}){}\n",
        page.title, site.site_url, page.url_path, description
    )
}
