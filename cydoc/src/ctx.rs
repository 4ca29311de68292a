//! Application context and path management.
//!
//! This module provides the [`AppContext`] type holding the state shared
//! by the exporters: resolved paths, site configuration, and the user
//! preference store for the current session.

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::settings::storage::{FileCookieJar, FileStorage};
use crate::settings::{PageEnv, SettingsStore};

/// Path configuration grouping all path-related fields.
///
/// Every directory has a default relative to the project root and can be
/// overridden individually.
#[derive(Debug, Default, Clone)]
pub struct PathConfig {
    /// Project root directory.
    pub root: PathBuf,
    /// Custom content directory (overrides `src/content/docs`).
    pub content_dir: Option<PathBuf>,
    /// Custom schema source directory (overrides `src/schemas`).
    pub schemas_dir: Option<PathBuf>,
    /// Custom output directory (overrides `dist`).
    pub dist_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Path configuration rooted at `root` with default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Directory holding the markdown/MDX documentation sources.
    pub fn content_dir(&self) -> PathBuf {
        self.content_dir
            .clone()
            .unwrap_or_else(|| self.root.join("src").join("content").join("docs"))
    }

    /// Directory holding the JSON schema sources.
    pub fn schemas_dir(&self) -> PathBuf {
        self.schemas_dir
            .clone()
            .unwrap_or_else(|| self.root.join("src").join("schemas"))
    }

    /// Build output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.dist_dir.clone().unwrap_or_else(|| self.root.join("dist"))
    }

    /// Output directory for exported markdown documents.
    pub fn markdown_dir(&self) -> PathBuf {
        self.dist_dir().join("markdown")
    }

    /// Directory for tool state such as persisted settings.
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(".docsite")
    }
}

/// The main application context holding all state.
///
/// Constructed explicitly by `main` and passed to the exporters; the
/// settings store starts detached and is attached to a persistent
/// environment on demand.
pub struct AppContext {
    /// Path configuration.
    pub paths: PathConfig,
    /// Site configuration.
    pub site: SiteConfig,
    /// User preference store for this session.
    pub settings: SettingsStore,
}

impl AppContext {
    /// Context rooted at `root` with default configuration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig::new(root),
            site: SiteConfig::default(),
            settings: SettingsStore::detached(),
        }
    }

    /// Context with site configuration loaded from disk.
    ///
    /// `config_path` defaults to `docsite.toml` under the root; a missing
    /// file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing configuration file cannot be
    /// read or parsed.
    pub fn load(root: impl Into<PathBuf>, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let paths = PathConfig::new(root);
        let config_path = config_path.unwrap_or_else(|| paths.root.join("docsite.toml"));
        let site = SiteConfig::load(&config_path)?;
        Ok(Self {
            paths,
            site,
            settings: SettingsStore::detached(),
        })
    }

    /// Attach the settings store to file-backed persistence channels
    /// under the state directory.
    pub fn attach_settings_env(&mut self) {
        let state_dir = self.paths.state_dir();
        let storage = FileStorage::open(state_dir.join("settings.toml"));
        let cookies = FileCookieJar::open(state_dir.join("cookies.toml"));
        self.settings =
            SettingsStore::attached(PageEnv::new(Box::new(storage), Box::new(cookies), false));
    }
}
