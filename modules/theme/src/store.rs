use std::sync::Arc;

use arc_swap::ArcSwap;
use blog_api_sdk::{ColorToken, Palette, SiteSettingsApi, ThemeColors};
use inkpost_utils::is_hex_color;
use tracing::{debug, info, instrument, warn};

use crate::defaults::default_colors;
use crate::error::ThemeError;
use crate::mode::Mode;
use crate::storage::LocalStorage;

/// Local storage key holding the active mode.
pub const MODE_KEY: &str = "themeMode";

const SAVED: &str = "Colors saved successfully";
const RESET: &str = "Colors reset to defaults";

/// Both palettes plus the active mode, replaced as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    pub colors: ThemeColors,
    pub active_mode: Mode,
}

impl ThemeState {
    #[must_use]
    pub fn palette(&self, mode: Mode) -> &Palette {
        match mode {
            Mode::Light => &self.colors.light,
            Mode::Dark => &self.colors.dark,
        }
    }

    fn palette_mut(&mut self, mode: Mode) -> &mut Palette {
        match mode {
            Mode::Light => &mut self.colors.light,
            Mode::Dark => &mut self.colors.dark,
        }
    }
}

pub struct ThemeStore {
    api: Arc<dyn SiteSettingsApi>,
    storage: Arc<dyn LocalStorage>,
    state: ArcSwap<ThemeState>,
}

impl ThemeStore {
    /// Start from the built-in palettes and the stored mode.
    #[must_use]
    pub fn new(api: Arc<dyn SiteSettingsApi>, storage: Arc<dyn LocalStorage>) -> Self {
        Self::with_colors(api, storage, None)
    }

    /// Start from previously fetched palettes when available.
    ///
    /// No network access happens here; call [`ThemeStore::refresh`] to pull
    /// the server's current colors.
    #[must_use]
    pub fn with_colors(
        api: Arc<dyn SiteSettingsApi>,
        storage: Arc<dyn LocalStorage>,
        cached: Option<ThemeColors>,
    ) -> Self {
        let active_mode = storage
            .get_item(MODE_KEY)
            .and_then(|raw| raw.parse::<Mode>().ok())
            .unwrap_or_default();
        let state = ThemeState {
            colors: cached.unwrap_or_else(default_colors),
            active_mode,
        };
        Self {
            api,
            storage,
            state: ArcSwap::from_pointee(state),
        }
    }

    /// Current state as one consistent snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ThemeState> {
        self.state.load_full()
    }

    #[must_use]
    pub fn active_mode(&self) -> Mode {
        self.state.load().active_mode
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.active_mode() == Mode::Dark
    }

    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        self.state.load().colors.clone()
    }

    #[must_use]
    pub fn active_palette(&self) -> Palette {
        let state = self.state.load();
        state.palette(state.active_mode).clone()
    }

    /// Value of `token` in the active palette.
    #[must_use]
    pub fn color(&self, token: ColorToken) -> String {
        let state = self.state.load();
        state.palette(state.active_mode).get(token).to_owned()
    }

    /// Edit one token of one palette in memory. Nothing is sent anywhere.
    ///
    /// # Errors
    /// [`ThemeError::InvalidColor`] if `value` is not a hex color.
    pub fn update_colors(
        &self,
        mode: Mode,
        token: ColorToken,
        value: &str,
    ) -> Result<(), ThemeError> {
        let value = value.trim();
        if !is_hex_color(value) {
            return Err(ThemeError::InvalidColor {
                value: value.to_owned(),
            });
        }
        self.state.rcu(|state| {
            let mut next = ThemeState::clone(state);
            next.palette_mut(mode).set(token, value.to_owned());
            next
        });
        debug!(%mode, %token, value, "color updated");
        Ok(())
    }

    /// Flip light/dark and remember the choice locally. Returns the new mode.
    pub fn toggle_mode(&self) -> Mode {
        let previous = self.state.rcu(|state| ThemeState {
            colors: state.colors.clone(),
            active_mode: state.active_mode.toggled(),
        });
        let mode = previous.active_mode.toggled();
        self.persist_mode(mode);
        mode
    }

    pub fn set_mode(&self, mode: Mode) {
        self.state.rcu(|state| ThemeState {
            colors: state.colors.clone(),
            active_mode: mode,
        });
        self.persist_mode(mode);
    }

    fn persist_mode(&self, mode: Mode) {
        if let Err(e) = self.storage.set_item(MODE_KEY, mode.as_str()) {
            warn!(error = %e, %mode, "failed to persist theme mode");
        }
    }

    fn replace_colors(&self, colors: &ThemeColors) {
        self.state.rcu(|state| ThemeState {
            colors: colors.clone(),
            active_mode: state.active_mode,
        });
    }

    /// Pull the server's palettes, if the site settings carry any.
    ///
    /// Returns whether the palettes were replaced. On failure the current
    /// palettes stay in place.
    ///
    /// # Errors
    /// The settings fetch failure, for logging.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<bool, ThemeError> {
        match self.api.fetch_settings().await {
            Ok(settings) => {
                let Some(colors) = settings.colors else {
                    debug!("site settings carry no palettes; keeping current colors");
                    return Ok(false);
                };
                self.replace_colors(&colors);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "failed to load site colors; keeping local palettes");
                Err(e.into())
            }
        }
    }

    /// Send both palettes to the server as they are now.
    ///
    /// # Errors
    /// The API failure. Local edits are kept so the save can be retried.
    #[instrument(skip_all)]
    pub async fn save_colors_to_db(&self) -> Result<String, ThemeError> {
        let colors = self.colors();
        match self.api.save_colors(&colors).await {
            Ok(message) => {
                info!("site colors saved");
                Ok(message.unwrap_or_else(|| SAVED.to_owned()))
            }
            Err(e) => {
                warn!(error = %e, "failed to save site colors");
                Err(e.into())
            }
        }
    }

    /// Restore the server's default palettes, discarding local edits.
    ///
    /// # Errors
    /// The API failure; current palettes are left untouched.
    #[instrument(skip_all)]
    pub async fn reset_colors(&self) -> Result<String, ThemeError> {
        match self.api.reset_colors().await {
            Ok(colors) => {
                self.replace_colors(&colors);
                info!("site colors reset");
                Ok(RESET.to_owned())
            }
            Err(e) => {
                warn!(error = %e, "failed to reset site colors");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
