//! # cydoc
//!
//! Build tooling for the Cyoda documentation site.
//!
//! `cydoc` packages and exports the site's build-time artifacts and owns
//! the user preference store consumed by page pre-rendering:
//!
//! - **Markdown export**: processed per-document markdown copies for LLM
//!   consumption
//! - **llms.txt**: a sectioned page index with links and descriptions
//! - **Schema pages**: generated documentation pages for every JSON schema
//! - **Schema archive**: a downloadable ZIP of all schema sources
//! - **Settings**: theme and API renderer preferences with redundant
//!   persistence and change notification
//!
//! ## Modules
//!
//! - [`config`] - Site configuration loaded from `docsite.toml`
//! - [`ctx`] - Application context and path management
//! - [`export`] - Build-time artifact exporters
//! - [`settings`] - User preference store

/// Site configuration loaded from `docsite.toml`.
pub mod config;

/// Application context and path management.
pub mod ctx;

/// Build-time artifact exporters.
pub mod export;

/// User preference store.
pub mod settings;

pub use ctx::AppContext;
