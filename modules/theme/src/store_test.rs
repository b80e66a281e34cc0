#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use blog_api_sdk::{ApiError, ColorToken, SiteSettings, SiteSettingsApi, ThemeColors};
use inkpost_security::AdminPermissions;

use super::{MODE_KEY, ThemeStore};
use crate::defaults::default_colors;
use crate::error::ThemeError;
use crate::mode::Mode;
use crate::storage::{FileStorage, LocalStorage, MemoryStorage};

/// Settings endpoints with canned answers for the color calls.
struct CannedSettings {
    settings: Result<SiteSettings, ApiError>,
    save: Result<Option<String>, ApiError>,
    reset: Result<ThemeColors, ApiError>,
    saved: std::sync::Mutex<Vec<ThemeColors>>,
    calls: AtomicUsize,
}

impl Default for CannedSettings {
    fn default() -> Self {
        Self {
            settings: Ok(SiteSettings::default()),
            save: Ok(None),
            reset: Ok(server_defaults()),
            saved: std::sync::Mutex::default(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SiteSettingsApi for CannedSettings {
    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.settings.clone()
    }

    async fn save_settings(&self, _settings: &SiteSettings) -> Result<SiteSettings, ApiError> {
        unimplemented!("not used by the theme store")
    }

    async fn reset_settings(&self) -> Result<SiteSettings, ApiError> {
        unimplemented!("not used by the theme store")
    }

    async fn save_colors(&self, colors: &ThemeColors) -> Result<Option<String>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saved.lock().unwrap().push(colors.clone());
        self.save.clone()
    }

    async fn reset_colors(&self) -> Result<ThemeColors, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reset.clone()
    }

    async fn update_admin_permissions(
        &self,
        _permissions: &AdminPermissions,
    ) -> Result<SiteSettings, ApiError> {
        unimplemented!("not used by the theme store")
    }
}

fn server_defaults() -> ThemeColors {
    let mut colors = default_colors();
    for token in ColorToken::ALL {
        colors.light.set(token, "#fafafa".to_owned());
        colors.dark.set(token, "#0a0a0a".to_owned());
    }
    colors
}

fn store_with(api: CannedSettings) -> (ThemeStore, Arc<CannedSettings>, Arc<MemoryStorage>) {
    let api = Arc::new(api);
    let storage = Arc::new(MemoryStorage::new());
    let store = ThemeStore::new(api.clone(), storage.clone());
    (store, api, storage)
}

#[test]
fn fresh_store_is_light_without_network() {
    let (store, api, _) = store_with(CannedSettings::default());

    assert_eq!(store.active_mode(), Mode::Light);
    assert!(!store.is_dark());
    assert_eq!(store.colors(), default_colors());
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn stored_mode_is_restored_and_garbage_ignored() {
    let api = Arc::new(CannedSettings::default());

    let dark = Arc::new(MemoryStorage::new());
    dark.set_item(MODE_KEY, "DARK").unwrap();
    assert_eq!(ThemeStore::new(api.clone(), dark).active_mode(), Mode::Dark);

    let garbage = Arc::new(MemoryStorage::new());
    garbage.set_item(MODE_KEY, "purple").unwrap();
    assert_eq!(ThemeStore::new(api, garbage).active_mode(), Mode::Light);
}

#[test]
fn cached_colors_seed_the_store() {
    let api = Arc::new(CannedSettings::default());
    let store = ThemeStore::with_colors(
        api,
        Arc::new(MemoryStorage::new()),
        Some(server_defaults()),
    );
    assert_eq!(store.colors(), server_defaults());
}

#[test]
fn last_write_wins_and_other_palette_untouched() {
    let (store, _, _) = store_with(CannedSettings::default());
    let dark_before = store.colors().dark;

    store
        .update_colors(Mode::Light, ColorToken::PrimaryBtn, "#123456")
        .unwrap();
    store
        .update_colors(Mode::Light, ColorToken::GrayColor, "#abc")
        .unwrap();
    store
        .update_colors(Mode::Light, ColorToken::PrimaryBtn, "#654321")
        .unwrap();

    let colors = store.colors();
    assert_eq!(colors.light.get(ColorToken::PrimaryBtn), "#654321");
    assert_eq!(colors.light.get(ColorToken::GrayColor), "#abc");
    assert_eq!(colors.dark, dark_before);
}

#[test]
fn invalid_color_changes_nothing() {
    let (store, _, _) = store_with(CannedSettings::default());
    let before = store.snapshot();

    let err = store
        .update_colors(Mode::Dark, ColorToken::PrimaryColor, "red")
        .unwrap_err();

    assert!(matches!(err, ThemeError::InvalidColor { .. }));
    assert_eq!(*store.snapshot(), *before);
}

#[test]
fn double_toggle_restores_mode_and_persists_it() {
    let (store, _, storage) = store_with(CannedSettings::default());

    assert_eq!(store.toggle_mode(), Mode::Dark);
    assert_eq!(storage.get_item(MODE_KEY).as_deref(), Some("dark"));
    assert!(store.is_dark());

    assert_eq!(store.toggle_mode(), Mode::Light);
    assert_eq!(storage.get_item(MODE_KEY).as_deref(), Some("light"));
    assert_eq!(store.active_mode(), Mode::Light);
}

#[test]
fn color_reads_follow_active_mode() {
    let (store, _, _) = store_with(CannedSettings::default());
    let colors = default_colors();

    assert_eq!(
        store.color(ColorToken::PrimaryBackground),
        colors.light.get(ColorToken::PrimaryBackground)
    );
    store.set_mode(Mode::Dark);
    assert_eq!(store.active_palette(), colors.dark);
}

#[test]
fn mode_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");
    let api = Arc::new(CannedSettings::default());

    let first = ThemeStore::new(api.clone(), Arc::new(FileStorage::new(&path)));
    first.set_mode(Mode::Dark);

    let second = ThemeStore::new(api, Arc::new(FileStorage::new(&path)));
    assert_eq!(second.active_mode(), Mode::Dark);
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl LocalStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), crate::storage::StorageError> {
        Err(serde_json::from_str::<serde_json::Value>("{").unwrap_err().into())
    }
}

#[test]
fn toggle_never_fails_when_storage_does() {
    let store = ThemeStore::new(Arc::new(CannedSettings::default()), Arc::new(ReadOnlyStorage));
    assert_eq!(store.toggle_mode(), Mode::Dark);
    assert!(store.is_dark());
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let (store, api, _) = store_with(CannedSettings {
        save: Err(ApiError::network("connection reset")),
        ..CannedSettings::default()
    });
    store
        .update_colors(Mode::Dark, ColorToken::TertiaryBtn, "#ff0000")
        .unwrap();
    let before = store.snapshot();

    let err = store.save_colors_to_db().await.unwrap_err();

    assert!(matches!(err, ThemeError::Api(ApiError::Network { .. })));
    assert_eq!(*store.snapshot(), *before);
    assert_eq!(api.saved.lock().unwrap()[0], before.colors);
}

#[tokio::test]
async fn save_reports_server_message_or_default() {
    let (store, _, _) = store_with(CannedSettings {
        save: Ok(Some("Website colors updated".to_owned())),
        ..CannedSettings::default()
    });
    assert_eq!(store.save_colors_to_db().await.unwrap(), "Website colors updated");

    let (quiet, _, _) = store_with(CannedSettings::default());
    assert_eq!(quiet.save_colors_to_db().await.unwrap(), "Colors saved successfully");
}

#[tokio::test]
async fn permission_denied_save_has_inline_message() {
    let (store, _, _) = store_with(CannedSettings {
        save: Err(ApiError::forbidden("Not allowed to change colors")),
        ..CannedSettings::default()
    });
    let err = store.save_colors_to_db().await.unwrap_err();
    assert_eq!(err.user_message(), "Not allowed to change colors");
}

#[tokio::test]
async fn reset_replaces_both_palettes_exactly() {
    let (store, _, _) = store_with(CannedSettings::default());
    store
        .update_colors(Mode::Light, ColorToken::PrimaryBtn, "#123456")
        .unwrap();
    store.set_mode(Mode::Dark);

    store.reset_colors().await.unwrap();

    assert_eq!(store.colors(), server_defaults());
    assert_eq!(store.active_mode(), Mode::Dark);
}

#[tokio::test]
async fn failed_reset_keeps_state() {
    let (store, _, _) = store_with(CannedSettings {
        reset: Err(ApiError::malformed("missing field `dark`")),
        ..CannedSettings::default()
    });
    store
        .update_colors(Mode::Light, ColorToken::PrimaryBtn, "#123456")
        .unwrap();
    let before = store.snapshot();

    assert!(store.reset_colors().await.is_err());
    assert_eq!(*store.snapshot(), *before);
}

#[tokio::test]
async fn refresh_uses_server_palettes_when_present() {
    let (store, _, _) = store_with(CannedSettings {
        settings: Ok(SiteSettings {
            colors: Some(server_defaults()),
            ..SiteSettings::default()
        }),
        ..CannedSettings::default()
    });
    assert!(store.refresh().await.unwrap());
    assert_eq!(store.colors(), server_defaults());
}

#[tokio::test]
async fn refresh_failure_keeps_local_palettes() {
    let (store, _, _) = store_with(CannedSettings {
        settings: Err(ApiError::network("offline")),
        ..CannedSettings::default()
    });
    assert!(store.refresh().await.is_err());
    assert_eq!(store.colors(), default_colors());

    let (bare, _, _) = store_with(CannedSettings::default());
    assert!(!bare.refresh().await.unwrap());
    assert_eq!(bare.colors(), default_colors());
}
