//! Persistence channels for user settings.
//!
//! Two independent channels back the preference store: a durable
//! key-value storage and a cookie jar. Both come in an in-memory flavour
//! (tests, pre-render contexts) and a TOML-file-backed flavour (CLI).
//! Writes are best-effort: a failing file write is logged, never
//! surfaced, matching the browser storage contract.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

/// Durable key-value storage channel.
pub trait KeyValueStorage {
    /// Read a stored value.
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value under a key.
    fn set(&mut self, key: &str, value: &str);
}

/// Cookie `SameSite` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    /// Sent on top-level navigations.
    Lax,
    /// Never sent cross-site.
    Strict,
    /// Always sent; requires `Secure`.
    None,
}

/// One cookie with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Cookie path.
    pub path: String,
    /// Expiry in days from the time of writing.
    pub max_age_days: u32,
    /// Same-site policy.
    pub same_site: SameSite,
    /// Whether the cookie is restricted to secure transports.
    pub secure: bool,
}

/// Cookie storage channel.
pub trait CookieStorage {
    /// Value of a cookie by name.
    fn get(&self, name: &str) -> Option<String>;
    /// Store a cookie, replacing any existing cookie of the same name.
    fn set(&mut self, cookie: Cookie);
}

/// In-memory key-value storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// In-memory cookie jar.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieJar {
    cookies: HashMap<String, Cookie>,
}

impl MemoryCookieJar {
    /// Empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar seeded from a request `Cookie` header (`a=1; b=2`).
    ///
    /// Attributes are not transmitted in the header; seeded cookies get
    /// session defaults.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            jar.set(Cookie {
                name: name.to_string(),
                value: value.trim().to_string(),
                path: "/".to_string(),
                max_age_days: 0,
                same_site: SameSite::Lax,
                secure: false,
            });
        }
        jar
    }

    /// Full cookie by name, including attributes.
    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }
}

impl CookieStorage for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|c| c.value.clone())
    }

    fn set(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }
}

/// Key-value storage persisted to a TOML file.
///
/// The file is loaded once at construction; every write rewrites it.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Storage backed by `path`; an unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("ignoring malformed settings file {}: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) {
        let content = match toml::to_string_pretty(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to serialize settings: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("failed to create {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, content) {
            warn!("failed to write {}: {e}", self.path.display());
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// Cookie jar persisted to a TOML file.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    cookies: HashMap<String, Cookie>,
}

impl FileCookieJar {
    /// Jar backed by `path`; an unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cookies = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(cookies) => cookies,
                Err(e) => {
                    warn!("ignoring malformed cookie file {}: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, cookies }
    }

    fn persist(&self) {
        let content = match toml::to_string_pretty(&self.cookies) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to serialize cookies: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("failed to create {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, content) {
            warn!("failed to write {}: {e}", self.path.display());
        }
    }
}

impl CookieStorage for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|c| c.value.clone())
    }

    fn set(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_jar_from_header() {
        let jar = MemoryCookieJar::from_header("cyoda-theme=dark; cyoda-api-renderer=stoplight");
        assert_eq!(jar.get("cyoda-theme").as_deref(), Some("dark"));
        assert_eq!(jar.get("cyoda-api-renderer").as_deref(), Some("stoplight"));
        assert_eq!(jar.get("missing"), None);
    }

    #[test]
    fn test_memory_jar_ignores_malformed_pairs() {
        let jar = MemoryCookieJar::from_header("broken; =empty; ok=1");
        assert_eq!(jar.get("ok").as_deref(), Some("1"));
        assert_eq!(jar.get("broken"), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut storage = FileStorage::open(&path);
        storage.set("starlight-theme", "dark");

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get("starlight-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_cookie_jar_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.toml");

        let mut jar = FileCookieJar::open(&path);
        jar.set(Cookie {
            name: "cyoda-api-renderer".to_string(),
            value: "stoplight".to_string(),
            path: "/".to_string(),
            max_age_days: 365,
            same_site: SameSite::Lax,
            secure: true,
        });

        let reopened = FileCookieJar::open(&path);
        assert_eq!(reopened.get("cyoda-api-renderer").as_deref(), Some("stoplight"));
    }
}
