//! Service configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw layered input (CLI flags, `MENU_VIEWER_*`
//! environment variables). [`AppConfig::from_settings`] validates it into the
//! typed values injected into adapters at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{AppLinks, DiagnosticsMode, Locale};
use crate::inbound::http::cors::CorsPolicy;

const DEFAULT_DEEPLINK_SCHEME: &str = "cellarium";
const DEFAULT_IOS_STORE_URL: &str = "https://apps.apple.com/";
const DEFAULT_ANDROID_STORE_URL: &str = "https://play.google.com/store";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MENU_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MENU_CACHE_TTL_SECS: u64 = 30;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENU_VIEWER")]
pub struct AppSettings {
    /// Menu endpoint called with `?token=`.
    pub menu_api_url: Option<String>,
    /// Base URL of the authorization backend.
    pub supabase_url: Option<String>,
    /// Public service credential sent to both backends.
    pub anon_key: Option<String>,
    /// Custom URI scheme of the companion app.
    pub deeplink_scheme: Option<String>,
    pub ios_store_url: Option<String>,
    pub android_store_url: Option<String>,
    pub bind_addr: Option<String>,
    /// `*` or a comma-separated origin list for the public menu endpoint.
    pub allow_origin: Option<String>,
    /// Append raw backend text to user-facing errors.
    #[ortho_config(default = false)]
    pub diagnostics: bool,
    /// JSON fixture seeding the in-process catalogue.
    pub catalogue_path: Option<PathBuf>,
    pub menu_timeout_ms: Option<u64>,
    pub menu_cache_ttl_secs: Option<u64>,
    /// `es` or `en`.
    pub default_locale: Option<String>,
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{field} is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("bind_addr is not a socket address: {0}")]
    InvalidBindAddr(#[from] std::net::AddrParseError),
    #[error("default_locale `{0}` is not supported")]
    InvalidLocale(String),
    #[error("deeplink_scheme must not be blank")]
    BlankScheme,
    #[error("menu_timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Validated configuration.
///
/// Not `Debug`: it holds the service credential.
#[derive(Clone)]
pub struct AppConfig {
    pub menu_api_url: Url,
    pub supabase_url: Url,
    pub anon_key: Zeroizing<String>,
    pub app_links: AppLinks,
    pub bind_addr: SocketAddr,
    pub cors: CorsPolicy,
    pub diagnostics: DiagnosticsMode,
    pub catalogue_path: Option<PathBuf>,
    pub menu_timeout: Duration,
    pub menu_cache_ttl: Duration,
    pub default_locale: Locale,
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(field))
}

fn parse_url(raw: &str, field: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { field, source })
}

impl AppConfig {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the menu endpoint, the auth backend or
    /// the credential is missing, or when any value fails to parse.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        let menu_api_url = parse_url(
            required(settings.menu_api_url.as_deref(), "menu_api_url")?,
            "menu_api_url",
        )?;
        let supabase_url = parse_url(
            required(settings.supabase_url.as_deref(), "supabase_url")?,
            "supabase_url",
        )?;
        let anon_key = Zeroizing::new(required(settings.anon_key.as_deref(), "anon_key")?.to_owned());

        let scheme = settings
            .deeplink_scheme
            .as_deref()
            .unwrap_or(DEFAULT_DEEPLINK_SCHEME)
            .trim();
        if scheme.is_empty() {
            return Err(ConfigError::BlankScheme);
        }
        let ios = parse_url(
            settings.ios_store_url.as_deref().unwrap_or(DEFAULT_IOS_STORE_URL),
            "ios_store_url",
        )?;
        let android = parse_url(
            settings
                .android_store_url
                .as_deref()
                .unwrap_or(DEFAULT_ANDROID_STORE_URL),
            "android_store_url",
        )?;

        let menu_timeout_ms = settings.menu_timeout_ms.unwrap_or(DEFAULT_MENU_TIMEOUT_MS);
        if menu_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let bind_addr = settings
            .bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse::<SocketAddr>()?;

        let default_locale = match settings.default_locale.as_deref() {
            None => Locale::default(),
            Some(tag) => {
                Locale::from_tag(tag).ok_or_else(|| ConfigError::InvalidLocale(tag.to_owned()))?
            }
        };

        Ok(Self {
            menu_api_url,
            supabase_url,
            anon_key,
            app_links: AppLinks::new(scheme, ios, android),
            bind_addr,
            cors: CorsPolicy::parse(settings.allow_origin.as_deref().unwrap_or("*")),
            diagnostics: DiagnosticsMode::from_enabled(settings.diagnostics),
            catalogue_path: settings.catalogue_path.clone(),
            menu_timeout: Duration::from_millis(menu_timeout_ms),
            menu_cache_ttl: Duration::from_secs(
                settings
                    .menu_cache_ttl_secs
                    .unwrap_or(DEFAULT_MENU_CACHE_TTL_SECS),
            ),
            default_locale,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Configuration loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    const VARS: [&str; 13] = [
        "MENU_VIEWER_MENU_API_URL",
        "MENU_VIEWER_SUPABASE_URL",
        "MENU_VIEWER_ANON_KEY",
        "MENU_VIEWER_DEEPLINK_SCHEME",
        "MENU_VIEWER_IOS_STORE_URL",
        "MENU_VIEWER_ANDROID_STORE_URL",
        "MENU_VIEWER_BIND_ADDR",
        "MENU_VIEWER_ALLOW_ORIGIN",
        "MENU_VIEWER_DIAGNOSTICS",
        "MENU_VIEWER_CATALOGUE_PATH",
        "MENU_VIEWER_MENU_TIMEOUT_MS",
        "MENU_VIEWER_MENU_CACHE_TTL_SECS",
        "MENU_VIEWER_DEFAULT_LOCALE",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        let vars: Vec<(&str, Option<String>)> = VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect();
        let _guard = lock_env(vars);
        AppSettings::load_from_iter([OsString::from("menu-viewer")]).expect("config should load")
    }

    #[fixture]
    fn minimal() -> AppSettings {
        load_with(&[
            (
                "MENU_VIEWER_MENU_API_URL",
                "https://db.example/functions/v1/public-menu",
            ),
            ("MENU_VIEWER_SUPABASE_URL", "https://db.example"),
            ("MENU_VIEWER_ANON_KEY", "anon"),
        ])
    }

    #[rstest]
    fn defaults_fill_optional_values(minimal: AppSettings) {
        let config = AppConfig::from_settings(&minimal).expect("valid config");
        assert_eq!(config.app_links.deep_link("x"), "cellarium://qr/x");
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.cors, CorsPolicy::Any);
        assert_eq!(config.diagnostics, DiagnosticsMode::Production);
        assert_eq!(config.menu_timeout, Duration::from_secs(10));
        assert_eq!(config.menu_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.default_locale, Locale::Es);
        assert_eq!(config.anon_key.as_str(), "anon");
        assert!(config.catalogue_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("MENU_VIEWER_MENU_API_URL", "https://db.example/menu"),
            ("MENU_VIEWER_SUPABASE_URL", "https://db.example"),
            ("MENU_VIEWER_ANON_KEY", "anon"),
            ("MENU_VIEWER_DEEPLINK_SCHEME", "winebar"),
            ("MENU_VIEWER_ALLOW_ORIGIN", "https://a.example"),
            ("MENU_VIEWER_DIAGNOSTICS", "true"),
            ("MENU_VIEWER_MENU_TIMEOUT_MS", "2500"),
            ("MENU_VIEWER_DEFAULT_LOCALE", "en"),
            ("MENU_VIEWER_CATALOGUE_PATH", "/tmp/catalogue.json"),
        ]);
        let config = AppConfig::from_settings(&settings).expect("valid config");
        assert_eq!(config.app_links.deep_link("x"), "winebar://qr/x");
        assert_eq!(
            config.cors,
            CorsPolicy::List(vec!["https://a.example".to_owned()])
        );
        assert_eq!(config.diagnostics, DiagnosticsMode::Development);
        assert_eq!(config.menu_timeout, Duration::from_millis(2500));
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(
            config.catalogue_path,
            Some(PathBuf::from("/tmp/catalogue.json"))
        );
    }

    #[rstest]
    #[case::menu_api_url("MENU_VIEWER_MENU_API_URL")]
    #[case::supabase_url("MENU_VIEWER_SUPABASE_URL")]
    #[case::anon_key("MENU_VIEWER_ANON_KEY")]
    fn missing_backend_settings_fail_startup(#[case] unset: &str) {
        let all = [
            ("MENU_VIEWER_MENU_API_URL", "https://db.example/menu"),
            ("MENU_VIEWER_SUPABASE_URL", "https://db.example"),
            ("MENU_VIEWER_ANON_KEY", "anon"),
        ];
        let present: Vec<(&str, &str)> =
            all.into_iter().filter(|(name, _)| *name != unset).collect();
        let settings = load_with(&present);
        assert!(matches!(
            AppConfig::from_settings(&settings),
            Err(ConfigError::Missing(_))
        ));
    }

    #[rstest]
    fn invalid_values_are_reported(mut minimal: AppSettings) {
        minimal.default_locale = Some("fr".to_owned());
        assert!(matches!(
            AppConfig::from_settings(&minimal),
            Err(ConfigError::InvalidLocale(tag)) if tag == "fr"
        ));

        minimal.default_locale = None;
        minimal.bind_addr = Some("not-an-address".to_owned());
        assert!(matches!(
            AppConfig::from_settings(&minimal),
            Err(ConfigError::InvalidBindAddr(_))
        ));

        minimal.bind_addr = None;
        minimal.menu_api_url = Some("no scheme".to_owned());
        assert!(matches!(
            AppConfig::from_settings(&minimal),
            Err(ConfigError::InvalidUrl {
                field: "menu_api_url",
                ..
            })
        ));
    }

    #[rstest]
    fn unusable_link_and_timeout_values_are_rejected(mut minimal: AppSettings) {
        minimal.menu_timeout_ms = Some(0);
        assert!(matches!(
            AppConfig::from_settings(&minimal),
            Err(ConfigError::ZeroTimeout)
        ));

        minimal.menu_timeout_ms = Some(1);
        minimal.deeplink_scheme = Some("  ".to_owned());
        assert!(matches!(
            AppConfig::from_settings(&minimal),
            Err(ConfigError::BlankScheme)
        ));
    }
}
