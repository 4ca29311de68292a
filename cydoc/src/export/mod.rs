//! Build-time artifact exporters.
//!
//! Each submodule implements one export step of the site build:
//!
//! - [`markdown`] - Processed markdown copies of all documentation pages
//! - [`llms`] - The `llms.txt` page index
//! - [`pages`] - Generated documentation pages for JSON schemas
//! - [`archive`] - The downloadable ZIP of schema sources
//! - [`frontmatter`] - Shared frontmatter parsing
//!
//! Exporters are synchronous file-system transformations; file-system
//! errors carry context and surface to the CLI.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Schema archive packaging.
pub mod archive;

/// Frontmatter parsing for content documents.
pub mod frontmatter;

/// `llms.txt` index generation.
pub mod llms;

/// Per-document markdown export.
pub mod markdown;

/// Schema documentation page generation.
pub mod pages;

/// Markdown/MDX content files under a directory, sorted for determinism.
pub(crate) fn content_files(content_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(content_dir, &["md", "mdx"])
}

/// JSON schema files under a directory, sorted for determinism.
pub(crate) fn schema_files(schemas_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(schemas_dir, &["json"])
}

fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .collect();
    files.sort();
    files
}

/// Path relative to `base`, joined with forward slashes.
pub(crate) fn relative_url_path(base: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(base).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Map a content source path to its exported markdown path.
///
/// `.mdx` becomes `.md` and `<dir>/index.md` collapses to `<dir>.md`;
/// the root index keeps its name.
pub(crate) fn markdown_url_path(content_dir: &Path, file: &Path) -> String {
    let mut url = relative_url_path(content_dir, file);
    if let Some(stripped) = url.strip_suffix(".mdx") {
        url = format!("{stripped}.md");
    }
    if let Some(stripped) = url.strip_suffix("/index.md") {
        if !stripped.is_empty() {
            url = format!("{stripped}.md");
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_url_path() {
        let base = Path::new("/docs");
        let cases = [
            ("/docs/guides/setup.mdx", "guides/setup.md"),
            ("/docs/guides/index.md", "guides.md"),
            ("/docs/guides/deep/index.mdx", "guides/deep.md"),
            ("/docs/index.md", "index.md"),
            ("/docs/page.md", "page.md"),
        ];
        for (input, expected) in cases {
            assert_eq!(markdown_url_path(base, Path::new(input)), expected, "{input}");
        }
    }
}
