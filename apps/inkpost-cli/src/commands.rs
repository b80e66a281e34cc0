use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use blog_api::HttpBlogApi;
use blog_api_sdk::ColorToken;
use clap::Subcommand;
use inkpost_security::{Action, Role};
use session::{AuthActions, SessionError, SessionStore};
use site_admin::{AdminConsole, AdminError};
use theme::{FileStorage, LocalStorage, Mode, Palette, StorageError, ThemeError, ThemeStore};
use tracing::{debug, warn};

use crate::config::AppConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the signed-in account, if any
    Whoami,
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Inspect or edit the site palettes and the local light/dark mode
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Inspect site settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Check whether the current account may perform an action
    Can {
        /// e.g. update-site-colors, manage-admins, publish-blog
        action: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Print the active mode and both palettes
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set one color token and save both palettes to the server
    Set {
        /// light or dark
        mode: String,
        /// e.g. primaryBackground
        token: String,
        /// #rgb or #rrggbb
        value: String,
    },
    /// Restore the server's default palettes
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the site settings as JSON
    Show,
}

/// Local storage key holding the session cookies between runs.
pub const COOKIES_KEY: &str = "sessionCookies";

/// Everything one command run needs, built once from the configuration.
pub struct App {
    api: Arc<HttpBlogApi>,
    storage: Arc<FileStorage>,
    session: Arc<SessionStore>,
    actions: AuthActions,
    theme: ThemeStore,
    console: AdminConsole,
}

impl App {
    /// Build the stores. A session saved by an earlier run is picked up
    /// here, before any request is made.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api = Arc::new(HttpBlogApi::new(&config.api).context("invalid API configuration")?);
        let storage = Arc::new(FileStorage::new(&config.storage.path));
        restore_cookies(&api, &*storage);

        let session = Arc::new(SessionStore::new(api.clone()));
        Ok(Self {
            actions: AuthActions::new(session.clone(), api.clone()),
            theme: ThemeStore::new(api.clone(), storage.clone()),
            console: AdminConsole::new(session.clone(), api.clone()),
            session,
            api,
            storage,
        })
    }

    /// Resolve the session and pull the site colors before any command.
    pub async fn start(&self) {
        self.session.bootstrap().await;
        if let Err(e) = self.theme.refresh().await {
            debug!(error = %e, "using built-in palettes");
        }
    }

    /// Write the session cookies back so the next run starts signed in.
    pub fn save_session(&self) {
        let saved = serde_json::to_string(&self.api.export_cookies())
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.set_item(COOKIES_KEY, &raw));
        if let Err(e) = saved {
            warn!(error = %e, "failed to save the session");
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Whoami => {
                self.whoami();
                Ok(())
            }
            Command::Login { email, password } => {
                let user = self
                    .actions
                    .login(&email, &password)
                    .await
                    .map_err(inline)?;
                println!("Signed in as {} ({})", user.username, user.role);
                Ok(())
            }
            Command::Logout => {
                let outcome = self.actions.logout().await;
                self.api.clear_cookies();
                outcome.map_err(inline)?;
                println!("Signed out");
                Ok(())
            }
            Command::Theme(cmd) => self.theme(cmd).await,
            Command::Settings(SettingsCommand::Show) => {
                let settings = self.console.load_settings().await.map_err(inline)?;
                println!("{}", serde_json::to_string_pretty(&*settings)?);
                Ok(())
            }
            Command::Can { action } => self.can(&action).await,
        }
    }

    fn whoami(&self) {
        match self.session.get() {
            Some(user) => println!("{} <{}> ({})", user.username, user.email, user.role),
            None => println!("anonymous"),
        }
    }

    async fn theme(&self, cmd: ThemeCommand) -> Result<()> {
        match cmd {
            ThemeCommand::Show => {
                let state = self.theme.snapshot();
                println!("mode: {}", state.active_mode);
                print_palette("light", &state.colors.light);
                print_palette("dark", &state.colors.dark);
            }
            ThemeCommand::Toggle => {
                println!("mode: {}", self.theme.toggle_mode());
            }
            ThemeCommand::Set { mode, token, value } => {
                let mode = mode.parse::<Mode>().map_err(inline)?;
                let token: ColorToken = token.parse()?;
                self.require_site_colors().await?;
                self.theme
                    .update_colors(mode, token, &value)
                    .map_err(inline)?;
                println!("{}", self.theme.save_colors_to_db().await.map_err(inline)?);
            }
            ThemeCommand::Reset => {
                self.require_site_colors().await?;
                println!("{}", self.theme.reset_colors().await.map_err(inline)?);
            }
        }
        Ok(())
    }

    /// Refuse a palette change before anything is edited or sent.
    async fn require_site_colors(&self) -> Result<()> {
        self.load_site_flags().await;
        self.console
            .require(Action::UpdateSiteColors)
            .map_err(inline)
    }

    /// Only plain admins depend on the site flags; without them they get
    /// the fail-closed answer.
    async fn load_site_flags(&self) {
        if self.session.role() != Some(Role::Admin) {
            return;
        }
        if let Err(e) = self.console.load_settings().await {
            warn!(error = %e, "site settings unavailable");
        }
    }

    async fn can(&self, action: &str) -> Result<()> {
        let action: Action = action.parse().map_err(anyhow::Error::msg)?;
        self.load_site_flags().await;
        let verdict = if self.console.can(action) { "allow" } else { "deny" };
        println!("{action}: {verdict}");
        Ok(())
    }
}

fn restore_cookies(api: &HttpBlogApi, storage: &dyn LocalStorage) {
    let Some(raw) = storage.get_item(COOKIES_KEY) else {
        return;
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(lines) => api.import_cookies(lines),
        Err(e) => warn!(error = %e, "ignoring unreadable saved session"),
    }
}

/// Errors that carry the short text a user should see.
trait UserFacing: fmt::Display {
    fn into_user_text(self) -> String;
}

impl UserFacing for SessionError {
    fn into_user_text(self) -> String {
        self.user_message().to_owned()
    }
}

impl UserFacing for AdminError {
    fn into_user_text(self) -> String {
        self.user_message().to_owned()
    }
}

impl UserFacing for ThemeError {
    fn into_user_text(self) -> String {
        self.user_message()
    }
}

/// Report the inline message; the full error goes to the debug log.
fn inline<E: UserFacing>(err: E) -> anyhow::Error {
    debug!(error = %err, "command failed");
    anyhow::Error::msg(err.into_user_text())
}

fn print_palette(name: &str, palette: &Palette) {
    println!("{name}:");
    for (token, value) in palette.iter() {
        println!("  {:<20} {value}  ({})", token.key(), token.label());
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;
