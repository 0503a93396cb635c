//! # Preference Store
//!
//! Store name, color theme and camera-scanning toggle, persisted
//! automatically and applied to the visual environment.
//!
//! ## Change Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Preference Change                                │
//! │                                                                         │
//! │  set_theme(theme)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. in-memory value updated (RwLock<Preferences>)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. listeners run in order with PreferenceChange::Theme(..)             │
//! │       │                                                                 │
//! │       ├──► PersistHook ──► blob.set("izzymart_theme", "{json}")         │
//! │       ├──► ThemeHook   ──► env.set_property("--color-primary", ..) ×3   │
//! │       └──► subscribe()d listeners                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Keys
//! | key                         | value                                    |
//! |-----------------------------|------------------------------------------|
//! | `izzymart_store_name`       | raw string                               |
//! | `izzymart_theme`            | `{"name","primary","secondary","accent"}`|
//! | `izzymart_camera_scanning`  | `"true"` / `"false"`                     |

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use izzymart_core::{ThemeColor, DEFAULT_STORE_NAME, THEME_PALETTE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::blob::BlobStore;
use crate::error::StoreResult;

/// Blob key for the store name.
pub const STORE_NAME_KEY: &str = "izzymart_store_name";
/// Blob key for the JSON-encoded theme.
pub const THEME_KEY: &str = "izzymart_theme";
/// Blob key for the camera-scanning flag.
pub const CAMERA_SCANNING_KEY: &str = "izzymart_camera_scanning";

// =============================================================================
// Visual Environment
// =============================================================================

/// Wherever theme colors end up (a terminal palette, a style sheet, ...).
pub trait VisualEnvironment: Send + Sync {
    /// Sets one named style variable.
    fn set_property(&self, name: &str, value: &str);
}

/// Environment that discards every property.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEnvironment;

impl VisualEnvironment for NoOpEnvironment {
    fn set_property(&self, _name: &str, _value: &str) {}
}

/// Environment that remembers the last value of each property.
#[derive(Debug, Default)]
pub struct RecordingEnvironment {
    properties: RwLock<BTreeMap<String, String>>,
}

impl RecordingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value pushed for `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl VisualEnvironment for RecordingEnvironment {
    fn set_property(&self, name: &str, value: &str) {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }
}

// =============================================================================
// Changes & Listeners
// =============================================================================

/// A single preference that just changed, carrying its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "preference", content = "value", rename_all = "snake_case")]
pub enum PreferenceChange {
    StoreName(String),
    Theme(ThemeColor),
    CameraScanning(bool),
}

/// On-change hook.
///
/// Listeners run synchronously, in registration order, after the in-memory
/// value has been updated.
pub trait PreferenceListener: Send + Sync {
    fn on_change(&self, change: &PreferenceChange) -> StoreResult<()>;
}

/// Writes each changed value to the blob store under its fixed key.
struct PersistHook {
    blob: Arc<dyn BlobStore>,
}

impl PreferenceListener for PersistHook {
    fn on_change(&self, change: &PreferenceChange) -> StoreResult<()> {
        match change {
            PreferenceChange::StoreName(name) => self.blob.set(STORE_NAME_KEY, name),
            PreferenceChange::Theme(theme) => {
                let json = serde_json::to_string(theme)?;
                self.blob.set(THEME_KEY, &json)
            }
            PreferenceChange::CameraScanning(enabled) => self
                .blob
                .set(CAMERA_SCANNING_KEY, if *enabled { "true" } else { "false" }),
        }
    }
}

/// Pushes the three theme variables into the visual environment.
struct ThemeHook {
    env: Arc<dyn VisualEnvironment>,
}

impl ThemeHook {
    fn apply(&self, theme: &ThemeColor) {
        for (name, value) in theme.variables() {
            self.env.set_property(name, value);
        }
        debug!(theme = %theme.name, "Theme applied");
    }
}

impl PreferenceListener for ThemeHook {
    fn on_change(&self, change: &PreferenceChange) -> StoreResult<()> {
        if let PreferenceChange::Theme(theme) = change {
            self.apply(theme);
        }
        Ok(())
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Snapshot of all preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub store_name: String,
    pub theme: ThemeColor,
    pub camera_scanning: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            store_name: DEFAULT_STORE_NAME.to_string(),
            theme: ThemeColor::default_theme(),
            camera_scanning: false,
        }
    }
}

impl Preferences {
    /// Reads every preference from the blob store, defaulting what is absent.
    fn read_from(blob: &dyn BlobStore) -> StoreResult<Self> {
        let defaults = Preferences::default();

        let store_name = blob
            .get(STORE_NAME_KEY)?
            .filter(|name| !name.is_empty())
            .unwrap_or(defaults.store_name);

        let theme = match blob.get(THEME_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "Stored theme is unreadable, using default");
                defaults.theme
            }),
            None => defaults.theme,
        };

        let camera_scanning = blob
            .get(CAMERA_SCANNING_KEY)?
            .map(|v| v == "true")
            .unwrap_or(defaults.camera_scanning);

        Ok(Preferences {
            store_name,
            theme,
            camera_scanning,
        })
    }
}

// =============================================================================
// Store
// =============================================================================

/// Reactive preference container.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use izzymart_store::{MemoryBlobStore, NoOpEnvironment, PreferenceStore};
///
/// let store = PreferenceStore::load(
///     Arc::new(MemoryBlobStore::new()),
///     Arc::new(NoOpEnvironment),
/// ).unwrap();
///
/// assert_eq!(store.store_name(), "IzzyMart");
/// assert_eq!(store.theme().name, "Blue");
/// assert!(!store.camera_scanning());
/// ```
pub struct PreferenceStore {
    state: RwLock<Preferences>,
    listeners: RwLock<Vec<Arc<dyn PreferenceListener>>>,
}

impl PreferenceStore {
    /// Initializes from the blob store and applies the current theme once.
    ///
    /// The built-in hooks (persistence, theme) are registered before any
    /// caller listener.
    pub fn load(
        blob: Arc<dyn BlobStore>,
        env: Arc<dyn VisualEnvironment>,
    ) -> StoreResult<Self> {
        let prefs = Preferences::read_from(blob.as_ref())?;

        let theme_hook = ThemeHook { env };
        theme_hook.apply(&prefs.theme);

        debug!(
            store_name = %prefs.store_name,
            theme = %prefs.theme.name,
            camera_scanning = prefs.camera_scanning,
            "Preferences loaded"
        );

        let listeners: Vec<Arc<dyn PreferenceListener>> =
            vec![Arc::new(PersistHook { blob }), Arc::new(theme_hook)];

        Ok(PreferenceStore {
            state: RwLock::new(prefs),
            listeners: RwLock::new(listeners),
        })
    }

    /// Attaches an additional on-change hook.
    pub fn subscribe(&self, listener: Arc<dyn PreferenceListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    pub fn store_name(&self) -> String {
        self.read().store_name.clone()
    }

    pub fn theme(&self) -> ThemeColor {
        self.read().theme.clone()
    }

    pub fn camera_scanning(&self) -> bool {
        self.read().camera_scanning
    }

    /// Copy of all current values.
    pub fn snapshot(&self) -> Preferences {
        self.read().clone()
    }

    /// The six selectable themes.
    pub fn theme_palette(&self) -> &'static [ThemeColor] {
        &THEME_PALETTE
    }

    /// Sets the store name and notifies listeners.
    pub fn set_store_name(&self, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        self.write().store_name = name.clone();
        self.notify(PreferenceChange::StoreName(name))
    }

    /// Sets the theme and notifies listeners, even if it did not change.
    pub fn set_theme(&self, theme: ThemeColor) -> StoreResult<()> {
        self.write().theme = theme.clone();
        self.notify(PreferenceChange::Theme(theme))
    }

    /// Selects a palette entry by name, ignoring case.
    ///
    /// Unknown names leave the preference untouched.
    pub fn set_theme_by_name(&self, name: &str) -> StoreResult<ThemeColor> {
        let theme = ThemeColor::by_name(name)?;
        self.set_theme(theme.clone())?;
        Ok(theme)
    }

    /// Sets the camera-scanning flag and notifies listeners.
    pub fn set_camera_scanning(&self, enabled: bool) -> StoreResult<()> {
        self.write().camera_scanning = enabled;
        self.notify(PreferenceChange::CameraScanning(enabled))
    }

    /// Runs every listener; the first failure is returned after all ran.
    fn notify(&self, change: PreferenceChange) -> StoreResult<()> {
        debug!(?change, "Preference changed");

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut first_error = None;
        for listener in listeners {
            if let Err(e) = listener.on_change(&change) {
                warn!(error = %e, "Preference hook failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Preferences> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Preferences> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::error::StoreError;
    use std::sync::Mutex;

    fn load_with(blob: Arc<MemoryBlobStore>) -> (PreferenceStore, Arc<RecordingEnvironment>) {
        let env = Arc::new(RecordingEnvironment::new());
        let store = PreferenceStore::load(blob, env.clone()).unwrap();
        (store, env)
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<PreferenceChange>>);

    impl PreferenceListener for Collect {
        fn on_change(&self, change: &PreferenceChange) -> StoreResult<()> {
            self.0.lock().unwrap().push(change.clone());
            Ok(())
        }
    }

    struct Reject;

    impl PreferenceListener for Reject {
        fn on_change(&self, _change: &PreferenceChange) -> StoreResult<()> {
            Err(StoreError::hook("rejected"))
        }
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let (store, env) = load_with(Arc::new(MemoryBlobStore::new()));

        assert_eq!(store.snapshot(), Preferences::default());
        assert_eq!(store.store_name(), "IzzyMart");
        assert_eq!(store.theme(), THEME_PALETTE[1]);
        assert!(!store.camera_scanning());

        // Applied eagerly at construction.
        assert_eq!(env.get("--color-primary").as_deref(), Some("#1976D2"));
        assert_eq!(env.get("--color-secondary").as_deref(), Some("#2196F3"));
        assert_eq!(env.get("--color-accent").as_deref(), Some("#82B1FF"));
    }

    #[test]
    fn test_set_store_name_persists_raw_string() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (store, _) = load_with(blob.clone());

        store.set_store_name("Corner Shop").unwrap();

        assert_eq!(store.store_name(), "Corner Shop");
        assert_eq!(blob.get(STORE_NAME_KEY).unwrap().as_deref(), Some("Corner Shop"));
    }

    #[test]
    fn test_set_theme_persists_json_and_applies() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (store, env) = load_with(blob.clone());

        store.set_theme(THEME_PALETTE[4].clone()).unwrap();

        assert_eq!(
            blob.get(THEME_KEY).unwrap().as_deref(),
            Some(r##"{"name":"Red","primary":"#eb3349","secondary":"#f45c43","accent":"#ff6a6a"}"##)
        );
        assert_eq!(env.get("--color-primary").as_deref(), Some("#eb3349"));
        assert_eq!(env.get("--color-secondary").as_deref(), Some("#f45c43"));
        assert_eq!(env.get("--color-accent").as_deref(), Some("#ff6a6a"));
    }

    #[test]
    fn test_set_camera_scanning_persists_flag() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (store, _) = load_with(blob.clone());

        store.set_camera_scanning(true).unwrap();
        assert_eq!(blob.get(CAMERA_SCANNING_KEY).unwrap().as_deref(), Some("true"));

        store.set_camera_scanning(false).unwrap();
        assert_eq!(blob.get(CAMERA_SCANNING_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_reload_restores_persisted_values() {
        let blob = Arc::new(MemoryBlobStore::new());
        {
            let (store, _) = load_with(blob.clone());
            store.set_store_name("Night Owl").unwrap();
            store.set_theme(THEME_PALETTE[5].clone()).unwrap();
            store.set_camera_scanning(true).unwrap();
        }

        let (reloaded, env) = load_with(blob);
        assert_eq!(reloaded.store_name(), "Night Owl");
        assert_eq!(reloaded.theme().name, "Teal");
        assert!(reloaded.camera_scanning());
        assert_eq!(env.get("--color-primary").as_deref(), Some("#2dd4bf"));
    }

    #[test]
    fn test_unreadable_theme_falls_back_to_default() {
        let blob = Arc::new(MemoryBlobStore::with_entries([
            (THEME_KEY, "{not json"),
            (STORE_NAME_KEY, ""),
            (CAMERA_SCANNING_KEY, "yes"),
        ]));

        let (store, _) = load_with(blob);

        assert_eq!(store.theme(), ThemeColor::default_theme());
        assert_eq!(store.store_name(), DEFAULT_STORE_NAME);
        assert!(!store.camera_scanning());
    }

    #[test]
    fn test_set_theme_by_name() {
        let (store, _) = load_with(Arc::new(MemoryBlobStore::new()));

        let theme = store.set_theme_by_name("orange").unwrap();
        assert_eq!(theme.name, "Orange");
        assert_eq!(store.theme().name, "Orange");

        let err = store.set_theme_by_name("magenta").unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
        assert_eq!(store.theme().name, "Orange");
    }

    #[test]
    fn test_subscribers_see_every_change_including_same_theme() {
        let (store, _) = load_with(Arc::new(MemoryBlobStore::new()));
        let collect = Arc::new(Collect::default());
        store.subscribe(collect.clone());

        store.set_theme(ThemeColor::default_theme()).unwrap();
        store.set_camera_scanning(true).unwrap();

        let seen = collect.0.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                PreferenceChange::Theme(ThemeColor::default_theme()),
                PreferenceChange::CameraScanning(true),
            ]
        );
    }

    #[test]
    fn test_hook_error_propagates_but_value_is_kept() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (store, _) = load_with(blob.clone());
        store.subscribe(Arc::new(Reject));

        let err = store.set_store_name("Kept").unwrap_err();

        assert!(matches!(err, StoreError::Hook(_)));
        assert_eq!(store.store_name(), "Kept");
        // Earlier hooks still ran.
        assert_eq!(blob.get(STORE_NAME_KEY).unwrap().as_deref(), Some("Kept"));
    }

    #[test]
    fn test_palette_has_six_entries() {
        let (store, _) = load_with(Arc::new(MemoryBlobStore::new()));
        let names: Vec<&str> = store.theme_palette().iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ["Purple", "Blue", "Green", "Orange", "Red", "Teal"]);
    }
}
