//! Marquee: a Zellij plugin for searching movies as you type.
//!
//! Keystrokes are debounced into settled queries, each settled query starts a
//! search tagged with a generation token, and only the response for the newest
//! generation is ever shown. Picking a result opens a detail pane.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Debouncer, generation tokens, selection          │
//! │  - Event handling → Actions                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ TMDB          │   │ Worker        │
//! │ (ui/)         │   │ (tmdb/)       │   │ (worker/)     │
//! │ - Rendering   │   │ - Requests    │   │ - Offline     │
//! │ - Theming     │   │ - Decoding    │   │   catalog     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Movie model, search error categories             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/marquee.wasm" {
//!         access_token "eyJhbGciOi..."
//!         language "en-US"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!     }
//! }
//! ```
//!
//! Without credentials the plugin searches a built-in offline catalog.
//!
//! # Example
//!
//! ```rust
//! use marquee::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::QueryChanged("alien".into()))?;
//! assert!(matches!(actions[0], Action::ScheduleDebounce { .. }));
//!
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed)?;
//! assert!(matches!(actions[0], Action::StartSearch { .. }));
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod tmdb;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Generation, SearchResultState};
pub use domain::{MarqueeError, Movie, MovieId, Result, SearchError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;
use tmdb::{Credentials, TmdbClient};

/// Which transport answers searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Tmdb,
    Offline,
}

/// A configured search transport.
#[derive(Debug, Clone)]
pub enum SearchBackend {
    /// Requests go to TMDB through the host's `web_request`.
    Tmdb(TmdbClient),
    /// Requests go to the background worker's fixture catalog.
    Offline { latency: Duration },
}

/// Plugin configuration parsed from the Zellij layout.
///
/// Parsing is lenient: unknown or malformed values fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit `backend`; `None` picks TMDB when credentials exist.
    pub backend: Option<BackendKind>,

    /// TMDB v3 API key.
    pub api_key: Option<String>,

    /// TMDB v4 read access token. Preferred over `api_key` when both are set.
    pub access_token: Option<String>,

    pub base_url: String,

    /// ISO 639-1 language with optional region, e.g. `en-US`.
    pub language: String,

    pub include_adult: bool,

    /// Quiet period before a query settles.
    pub debounce_ms: u64,

    /// Simulated latency of the offline backend.
    pub offline_latency_ms: u64,

    /// Built-in theme name; ignored when `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme, `~` allowed.
    pub theme_file: Option<String>,

    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `info`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            api_key: None,
            access_token: None,
            base_url: tmdb::DEFAULT_BASE_URL.to_string(),
            language: "en-US".to_string(),
            include_adult: false,
            debounce_ms: 500,
            offline_latency_ms: 500,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's plugin configuration map.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use marquee::{BackendKind, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_kind(), BackendKind::Tmdb);
    /// assert_eq!(config.debounce_ms, 250);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let backend = text("backend").and_then(|s| match s.to_ascii_lowercase().as_str() {
            "tmdb" => Some(BackendKind::Tmdb),
            "offline" => Some(BackendKind::Offline),
            other => {
                tracing::debug!(backend = %other, "unknown backend, choosing automatically");
                None
            }
        });

        let include_adult = text("include_adult")
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(defaults.include_adult);

        let debounce_ms = text("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let offline_latency_ms = text("offline_latency_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.offline_latency_ms);

        Self {
            backend,
            api_key: text("api_key"),
            access_token: text("access_token"),
            base_url: text("base_url").unwrap_or(defaults.base_url),
            language: text("language").unwrap_or(defaults.language),
            include_adult,
            debounce_ms,
            offline_latency_ms,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn credentials(&self) -> Option<Credentials> {
        self.access_token
            .clone()
            .map(Credentials::AccessToken)
            .or_else(|| self.api_key.clone().map(Credentials::ApiKey))
    }

    /// The backend that will serve searches.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.unwrap_or_else(|| {
            if self.credentials().is_some() {
                BackendKind::Tmdb
            } else {
                BackendKind::Offline
            }
        })
    }

    /// Builds the configured search backend.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] when TMDB is selected without usable
    /// credentials or with an invalid `base_url`.
    pub fn search_backend(&self) -> Result<SearchBackend> {
        match self.backend_kind() {
            BackendKind::Offline => Ok(SearchBackend::Offline {
                latency: Duration::from_millis(self.offline_latency_ms),
            }),
            BackendKind::Tmdb => {
                let credentials = self.credentials().ok_or_else(|| {
                    MarqueeError::Config("backend \"tmdb\" needs api_key or access_token".to_string())
                })?;
                let client = TmdbClient::new(&self.base_url, credentials)?
                    .with_language(self.language.clone())
                    .with_include_adult(self.include_adult);
                Ok(SearchBackend::Tmdb(client))
            }
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::paths::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default"),
            }
        } else if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

/// Creates the coordinator state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(debounce_ms = config.debounce_ms, "initializing marquee plugin");
    AppState::new(config.theme(), config.quiet_period())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_without_configuration() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.backend_kind(), BackendKind::Offline);
        assert_eq!(config.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.language, "en-US");
        assert!(!config.include_adult);
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
        assert_eq!(config.offline_latency_ms, 500);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("debounce_ms", "soon"),
            ("include_adult", "maybe"),
            ("backend", "carrier-pigeon"),
            ("language", "   "),
        ]));
        assert_eq!(config.debounce_ms, 500);
        assert!(!config.include_adult);
        assert_eq!(config.backend, None);
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn access_token_wins_over_api_key() {
        let config = Config::from_zellij(&map(&[("api_key", "key"), ("access_token", "token")]));
        assert_eq!(config.credentials(), Some(Credentials::AccessToken("token".into())));
        assert!(matches!(config.search_backend(), Ok(SearchBackend::Tmdb(_))));
    }

    #[test]
    fn explicit_offline_ignores_credentials() {
        let config = Config::from_zellij(&map(&[
            ("api_key", "key"),
            ("backend", "Offline"),
            ("offline_latency_ms", "0"),
        ]));
        assert!(matches!(
            config.search_backend(),
            Ok(SearchBackend::Offline { latency }) if latency.is_zero()
        ));
    }

    #[test]
    fn tmdb_without_credentials_is_a_config_error() {
        let config = Config::from_zellij(&map(&[("backend", "tmdb")]));
        assert!(matches!(config.search_backend(), Err(MarqueeError::Config(_))));
    }

    #[test]
    fn theme_resolution_prefers_file_then_name() {
        let config = Config::from_zellij(&map(&[("theme", "catppuccin-latte")]));
        assert_eq!(config.theme().name, "catppuccin-latte");

        let config = Config::from_zellij(&map(&[("theme", "nope")]));
        assert_eq!(config.theme().name, "catppuccin-mocha");

        let config = Config::from_zellij(&map(&[("theme", "catppuccin-latte"), ("theme_file", "/missing.toml")]));
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_applies_quiet_period() {
        let config = Config::from_zellij(&map(&[("debounce_ms", "120")]));
        let state = initialize(&config);
        assert_eq!(state.debouncer.quiet_period(), Duration::from_millis(120));
    }
}
