//! Schema archive packaging.
//!
//! All JSON schema sources are packaged into `dist/schemas.zip` with
//! their directory layout preserved, plus a generated README describing
//! the archive contents.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ctx::AppContext;

/// Package all schema sources into `dist/schemas.zip`.
///
/// Returns the path of the written archive.
///
/// # Errors
///
/// Returns an error when a schema file cannot be read or the archive
/// cannot be written.
pub fn package_schemas(ctx: &AppContext) -> anyhow::Result<PathBuf> {
    let schemas_dir = ctx.paths.schemas_dir();
    let dist = ctx.paths.dist_dir();
    fs::create_dir_all(&dist).with_context(|| format!("Failed to create {}", dist.display()))?;

    let out_path = dist.join("schemas.zip");
    let file = File::create(&out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let files = super::schema_files(&schemas_dir);
    info!("packaging {} schema files", files.len());

    for path in &files {
        let rel = super::relative_url_path(&schemas_dir, path);
        zip.start_file(&rel, options)
            .with_context(|| format!("Failed to add {rel} to archive"))?;
        let mut source = File::open(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        io::copy(&mut source, &mut zip)
            .with_context(|| format!("Failed to write {rel} to archive"))?;
        debug!("packaged {rel}");
    }

    zip.start_file("README.md", options)
        .context("Failed to add README.md to archive")?;
    zip.write_all(readme(files.len()).as_bytes())
        .context("Failed to write README.md to archive")?;

    zip.finish().context("Failed to finalize archive")?;
    Ok(out_path)
}

fn readme(count: usize) -> String {
    format!(
        "# Cyoda JSON Schemas\n\n\
         This archive contains {count} JSON Schema definitions for the Cyoda platform APIs.\n\n\
         ## Structure\n\n\
         - `common/` - Shared building blocks, conditions, and state machine configuration\n\
         - `entity/` - Entity request and response shapes\n\
         - `model/` - Entity model definitions\n\
         - `processing/` - Processing node configuration\n\
         - `search/` - Search query shapes\n\n\
         ## Usage\n\n\
         Schemas reference each other with relative `$ref` paths, so keep the directory\n\
         layout intact when validating documents against them. Rendered documentation\n\
         for each schema is published under `/schemas/` on the documentation site.\n\n\
         Generated: {timestamp}\n",
        timestamp = chrono::Utc::now().to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::path::Path;

    fn write_schema(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_archive_layout_and_readme() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(dir.path());
        write_schema(
            &ctx.paths.schemas_dir(),
            "entity/EntityRequest.json",
            r#"{ "title": "Entity Request" }"#,
        );
        write_schema(&ctx.paths.schemas_dir(), "common/Tag.json", r#"{}"#);

        let out_path = package_schemas(&ctx).unwrap();
        assert_eq!(out_path, ctx.paths.dist_dir().join("schemas.zip"));

        let mut archive = zip::ZipArchive::new(File::open(&out_path).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(names.contains(&"entity/EntityRequest.json".to_string()));
        assert!(names.contains(&"common/Tag.json".to_string()));
        assert!(names.contains(&"README.md".to_string()));

        let mut entry = archive.by_name("entity/EntityRequest.json").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, r#"{ "title": "Entity Request" }"#);
        drop(entry);

        let mut readme = String::new();
        archive
            .by_name("README.md")
            .unwrap()
            .read_to_string(&mut readme)
            .unwrap();
        assert!(readme.contains("2 JSON Schema definitions"));
        assert!(readme.contains("Generated: "));
    }
}
