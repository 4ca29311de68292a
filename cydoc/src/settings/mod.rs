//! User preference store.
//!
//! A single store per page-rendering session owns the user's theme and
//! API-documentation-renderer choices. Preferences persist across sessions
//! through two redundant channels (durable key-value storage and cookies)
//! and every change fans out synchronously to registered observers.
//!
//! The store also operates without any page environment at all
//! (pre-render contexts): getters return defaults and setters no-op.
//! That is a valid mode, not an error.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::storage::{Cookie, CookieStorage, KeyValueStorage, SameSite};

/// Persistence channels for user settings.
pub mod storage;

/// Name of the in-page change notification event.
pub const SETTINGS_CHANGE_EVENT: &str = "cyoda:settings-change";

/// Durable storage key for the theme, shared with the hosting
/// documentation framework.
pub const THEME_STORAGE_KEY: &str = "starlight-theme";

/// Cookie name for the theme.
pub const THEME_COOKIE: &str = "cyoda-theme";

/// Cookie name for the API renderer.
pub const API_RENDERER_COOKIE: &str = "cyoda-api-renderer";

/// Presentation attribute applied to the document root.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// URL of the API reference page.
pub const API_REFERENCE_URL: &str = "/api-reference/";

const COOKIE_MAX_AGE_DAYS: u32 = 365;

/// Visual theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the system preference.
    #[default]
    Auto,
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse_valid(raw: &str) -> Option<Theme> {
        match raw {
            "auto" => Some(Theme::Auto),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse_valid(s).ok_or_else(|| ParseSettingError {
            kind: "theme",
            value: s.to_string(),
        })
    }
}

/// API documentation renderer preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRenderer {
    /// Scalar renderer.
    #[default]
    Scalar,
    /// Stoplight Elements renderer.
    Stoplight,
}

impl ApiRenderer {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiRenderer::Scalar => "scalar",
            ApiRenderer::Stoplight => "stoplight",
        }
    }

    fn parse_valid(raw: &str) -> Option<ApiRenderer> {
        match raw {
            "scalar" => Some(ApiRenderer::Scalar),
            "stoplight" => Some(ApiRenderer::Stoplight),
            _ => None,
        }
    }
}

impl fmt::Display for ApiRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiRenderer {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiRenderer::parse_valid(s).ok_or_else(|| ParseSettingError {
            kind: "API renderer",
            value: s.to_string(),
        })
    }
}

/// Error for parsing a setting value from a string.
#[derive(Debug, Clone, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

/// The pair of current user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    /// Visual theme.
    pub theme: Theme,
    /// API documentation renderer.
    pub api_renderer: ApiRenderer,
}

/// Partial settings update; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsUpdate {
    /// New theme, if any.
    pub theme: Option<Theme>,
    /// New API renderer, if any.
    pub api_renderer: Option<ApiRenderer>,
}

/// Which setting a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// The theme setting.
    Theme,
    /// The API renderer setting.
    ApiRenderer,
}

impl SettingKind {
    /// Payload field value, matching the in-page event contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Theme => "theme",
            SettingKind::ApiRenderer => "apiRenderer",
        }
    }
}

/// Payload of a change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    /// Which setting changed.
    pub setting: SettingKind,
    /// New value in canonical string form.
    pub value: String,
}

/// Callback invoked on every successful setting change.
pub type SettingsObserver = Arc<dyn Fn(&SettingsChange) + Send + Sync>;

/// Root element of the rendered page, holding presentation attributes.
#[derive(Debug, Clone, Default)]
pub struct DocumentRoot {
    attributes: HashMap<String, String>,
}

impl DocumentRoot {
    /// Set a presentation attribute.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Read a presentation attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// The page environment the store persists into.
///
/// Absent entirely in pre-render contexts.
pub struct PageEnv {
    /// Durable key-value storage channel.
    pub storage: Box<dyn KeyValueStorage>,
    /// Cookie channel.
    pub cookies: Box<dyn CookieStorage>,
    /// Document root receiving presentation attributes.
    pub document: DocumentRoot,
    /// Whether the page is served over a secure transport; controls the
    /// `Secure` cookie flag.
    pub secure_transport: bool,
}

impl PageEnv {
    /// Environment over the given channels.
    pub fn new(
        storage: Box<dyn KeyValueStorage>,
        cookies: Box<dyn CookieStorage>,
        secure_transport: bool,
    ) -> Self {
        Self {
            storage,
            cookies,
            document: DocumentRoot::default(),
            secure_transport,
        }
    }
}

/// Single authoritative source for the user's preferences.
///
/// One instance per page-rendering session, constructed explicitly and
/// passed to whatever owns the session. All operations are infallible:
/// invalid values are replaced by defaults with a warning diagnostic.
pub struct SettingsStore {
    env: Option<PageEnv>,
    observers: Vec<SettingsObserver>,
}

impl SettingsStore {
    /// Store without a page environment; getters return defaults and
    /// setters no-op.
    pub fn detached() -> Self {
        Self {
            env: None,
            observers: Vec::new(),
        }
    }

    /// Store over a page environment.
    pub fn attached(env: PageEnv) -> Self {
        Self {
            env: Some(env),
            observers: Vec::new(),
        }
    }

    /// Whether a page environment is present.
    pub fn is_attached(&self) -> bool {
        self.env.is_some()
    }

    /// Register a change observer.
    ///
    /// Observers are invoked synchronously, in registration order.
    pub fn observe(&mut self, observer: SettingsObserver) {
        self.observers.push(observer);
    }

    /// Current theme.
    ///
    /// The durable storage tier is authoritative; the cookie is the
    /// secondary channel consulted when storage has no valid value.
    pub fn theme(&self) -> Theme {
        let Some(env) = &self.env else {
            return Theme::default();
        };
        if let Some(raw) = env.storage.get(THEME_STORAGE_KEY) {
            match Theme::parse_valid(&raw) {
                Some(theme) => return theme,
                None => warn!("invalid stored theme {raw:?}, ignoring"),
            }
        }
        if let Some(raw) = env.cookies.get(THEME_COOKIE) {
            match Theme::parse_valid(&raw) {
                Some(theme) => return theme,
                None => warn!("invalid theme cookie {raw:?}, ignoring"),
            }
        }
        Theme::default()
    }

    /// Set the theme and persist it to both channels.
    ///
    /// Applies the `data-theme` attribute to the document root so the
    /// visual theme takes effect immediately, then notifies observers.
    pub fn set_theme(&mut self, theme: Theme) {
        let Some(env) = &mut self.env else {
            return;
        };
        env.document.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        env.storage.set(THEME_STORAGE_KEY, theme.as_str());
        let secure = env.secure_transport;
        env.cookies.set(Cookie {
            name: THEME_COOKIE.to_string(),
            value: theme.as_str().to_string(),
            path: "/".to_string(),
            max_age_days: COOKIE_MAX_AGE_DAYS,
            same_site: SameSite::Lax,
            secure,
        });
        self.notify(SettingKind::Theme, theme.as_str());
    }

    /// Set the theme from a raw string.
    ///
    /// An invalid value is replaced by the default with a warning; the
    /// operation always succeeds.
    pub fn set_theme_str(&mut self, raw: &str) {
        let theme = Theme::parse_valid(raw).unwrap_or_else(|| {
            warn!("invalid theme {raw:?}, using default");
            Theme::default()
        });
        self.set_theme(theme);
    }

    /// Current API renderer, persisted via the cookie channel only.
    pub fn api_renderer(&self) -> ApiRenderer {
        let Some(env) = &self.env else {
            return ApiRenderer::default();
        };
        if let Some(raw) = env.cookies.get(API_RENDERER_COOKIE) {
            match ApiRenderer::parse_valid(&raw) {
                Some(renderer) => return renderer,
                None => warn!("invalid API renderer cookie {raw:?}, ignoring"),
            }
        }
        ApiRenderer::default()
    }

    /// Set the API renderer and persist it to the cookie channel.
    pub fn set_api_renderer(&mut self, renderer: ApiRenderer) {
        let Some(env) = &mut self.env else {
            return;
        };
        let secure = env.secure_transport;
        env.cookies.set(Cookie {
            name: API_RENDERER_COOKIE.to_string(),
            value: renderer.as_str().to_string(),
            path: "/".to_string(),
            max_age_days: COOKIE_MAX_AGE_DAYS,
            same_site: SameSite::Lax,
            secure,
        });
        self.notify(SettingKind::ApiRenderer, renderer.as_str());
    }

    /// Set the API renderer from a raw string, defaulting on invalid input.
    pub fn set_api_renderer_str(&mut self, raw: &str) {
        let renderer = ApiRenderer::parse_valid(raw).unwrap_or_else(|| {
            warn!("invalid API renderer {raw:?}, using default");
            ApiRenderer::default()
        });
        self.set_api_renderer(renderer);
    }

    /// Both current settings.
    pub fn settings(&self) -> UserSettings {
        UserSettings {
            theme: self.theme(),
            api_renderer: self.api_renderer(),
        }
    }

    /// Apply whichever fields are present in a partial update.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        if let Some(theme) = update.theme {
            self.set_theme(theme);
        }
        if let Some(renderer) = update.api_renderer {
            self.set_api_renderer(renderer);
        }
    }

    /// URL of the API reference page.
    pub fn api_reference_url(&self) -> &'static str {
        API_REFERENCE_URL
    }

    /// Synchronize the document with the stored theme at page load.
    ///
    /// When the stored preference differs from the initial render
    /// assumption, it is re-applied through [`Self::set_theme`] to force
    /// the document attribute and re-broadcast the change.
    pub fn initialize(&mut self) {
        let theme = self.theme();
        if theme != Theme::Auto {
            self.set_theme(theme);
        }
    }

    /// Reset both preferences to their defaults.
    ///
    /// Goes through the normal setters so persistence and notification
    /// happen exactly as for a user-driven change.
    pub fn reset(&mut self) {
        self.set_theme(Theme::default());
        self.set_api_renderer(ApiRenderer::default());
    }

    /// Presentation attribute currently applied to the document root.
    pub fn document_attribute(&self, name: &str) -> Option<&str> {
        self.env.as_ref().and_then(|env| env.document.attribute(name))
    }

    fn notify(&self, setting: SettingKind, value: &str) {
        let change = SettingsChange {
            setting,
            value: value.to_string(),
        };
        for observer in &self.observers {
            observer(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::storage::{MemoryCookieJar, MemoryStorage};
    use super::*;
    use std::sync::Mutex;

    fn memory_store() -> SettingsStore {
        SettingsStore::attached(PageEnv::new(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryCookieJar::new()),
            true,
        ))
    }

    #[test]
    fn test_theme_round_trip() {
        for theme in [Theme::Auto, Theme::Light, Theme::Dark] {
            let mut store = memory_store();
            store.set_theme(theme);
            assert_eq!(store.theme(), theme);
            assert_eq!(
                store.document_attribute(THEME_ATTRIBUTE),
                Some(theme.as_str())
            );
        }
    }

    #[test]
    fn test_invalid_theme_string_falls_back_to_default() {
        let mut store = memory_store();
        store.set_theme_str("bogus");
        assert_eq!(store.theme(), Theme::Auto);
    }

    #[test]
    fn test_storage_tier_is_authoritative() {
        let mut storage = MemoryStorage::new();
        storage.set(THEME_STORAGE_KEY, "light");
        let jar = MemoryCookieJar::from_header("cyoda-theme=dark");
        let store = SettingsStore::attached(PageEnv::new(
            Box::new(storage),
            Box::new(jar),
            false,
        ));
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_invalid_storage_value_falls_through_to_cookie() {
        let mut storage = MemoryStorage::new();
        storage.set(THEME_STORAGE_KEY, "sepia");
        let jar = MemoryCookieJar::from_header("cyoda-theme=dark");
        let store = SettingsStore::attached(PageEnv::new(
            Box::new(storage),
            Box::new(jar),
            false,
        ));
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_api_renderer_uses_cookie_channel_only() {
        let mut store = memory_store();
        store.set_api_renderer(ApiRenderer::Stoplight);
        assert_eq!(store.api_renderer(), ApiRenderer::Stoplight);
        // nothing must land in durable storage for the renderer
        let env = store.env.as_ref().unwrap();
        assert_eq!(env.storage.get(API_RENDERER_COOKIE), None);
    }

    #[test]
    fn test_detached_store_defaults_and_no_ops() {
        let mut store = SettingsStore::detached();
        store.set_theme(Theme::Dark);
        store.set_api_renderer(ApiRenderer::Stoplight);
        assert_eq!(
            store.settings(),
            UserSettings {
                theme: Theme::Auto,
                api_renderer: ApiRenderer::Scalar
            }
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = memory_store();
        store.update_settings(SettingsUpdate {
            theme: Some(Theme::Dark),
            api_renderer: Some(ApiRenderer::Stoplight),
        });
        store.reset();
        assert_eq!(store.settings(), UserSettings::default());
    }

    #[test]
    fn test_observers_fire_in_registration_order() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let mut store = memory_store();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            store.observe(Arc::new(move |change: &SettingsChange| {
                seen.lock().unwrap().push(format!(
                    "{tag}:{}={}",
                    change.setting.as_str(),
                    change.value
                ));
            }));
        }
        store.set_theme(Theme::Dark);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:theme=dark", "second:theme=dark"]
        );
    }

    #[test]
    fn test_initialize_reapplies_stored_theme() {
        let mut storage = MemoryStorage::new();
        storage.set(THEME_STORAGE_KEY, "dark");
        let mut store = SettingsStore::attached(PageEnv::new(
            Box::new(storage),
            Box::new(MemoryCookieJar::new()),
            false,
        ));
        assert_eq!(store.document_attribute(THEME_ATTRIBUTE), None);
        store.initialize();
        assert_eq!(store.document_attribute(THEME_ATTRIBUTE), Some("dark"));
    }

    #[derive(Clone, Default)]
    struct SharedJar(Arc<Mutex<MemoryCookieJar>>);

    impl CookieStorage for SharedJar {
        fn get(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().get(name)
        }

        fn set(&mut self, cookie: Cookie) {
            self.0.lock().unwrap().set(cookie);
        }
    }

    #[test]
    fn test_theme_cookie_attributes() {
        let jar = SharedJar::default();
        let mut store = SettingsStore::attached(PageEnv::new(
            Box::new(MemoryStorage::new()),
            Box::new(jar.clone()),
            true,
        ));
        store.set_theme(Theme::Light);

        let inner = jar.0.lock().unwrap();
        let cookie = inner.cookie(THEME_COOKIE).unwrap();
        assert_eq!(cookie.value, "light");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.max_age_days, 365);
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert!(cookie.secure);
    }
}
