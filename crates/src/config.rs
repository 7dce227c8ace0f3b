use crate::catalog::query::DEFAULT_FETCH_RETRIES;
use crate::error::ConfigError;
use crate::i18n::Locale;
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::theme::Theme;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "shopdesk.json";
pub const DEFAULT_MOBILE_BREAKPOINT: usize = 80;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub locale: Locale,
    pub theme: Theme,
    pub page_size: usize,
    /// Terminals narrower than this get the mobile layout.
    pub mobile_breakpoint: usize,
    pub fetch_retries: u32,
    pub latency_ms: u64,
    pub data_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub start_route: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "App Template".into(),
            locale: Locale::Pt,
            theme: Theme::Light,
            page_size: DEFAULT_PAGE_SIZE,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            fetch_retries: DEFAULT_FETCH_RETRIES,
            latency_ms: 0,
            data_file: None,
            log_file: None,
            start_route: "/".into(),
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `SHOPDESK_*` overrides from `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SHOPDESK_APP_NAME") {
            self.app_name = v;
        }
        if let Some(v) = lookup("SHOPDESK_LOCALE") {
            self.locale = Locale::parse(&v).ok_or_else(|| ConfigError::Invalid {
                key: "locale",
                reason: format!("unsupported locale `{v}`"),
            })?;
        }
        if let Some(v) = lookup("SHOPDESK_DARK_MODE") {
            self.theme = if parse_bool("dark_mode", &v)? {
                Theme::Dark
            } else {
                Theme::Light
            };
        }
        if let Some(v) = lookup("SHOPDESK_PAGE_SIZE") {
            self.page_size = parse_num("page_size", &v)?;
        }
        if let Some(v) = lookup("SHOPDESK_MOBILE_BREAKPOINT") {
            self.mobile_breakpoint = parse_num("mobile_breakpoint", &v)?;
        }
        if let Some(v) = lookup("SHOPDESK_FETCH_RETRIES") {
            self.fetch_retries = parse_num("fetch_retries", &v)?;
        }
        if let Some(v) = lookup("SHOPDESK_LATENCY_MS") {
            self.latency_ms = parse_num("latency_ms", &v)?;
        }
        if let Some(v) = lookup("SHOPDESK_DATA_FILE") {
            self.data_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SHOPDESK_LOG_FILE") {
            self.log_file = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "page_size",
                reason: "must be greater than zero".into(),
            });
        }
        if !self.start_route.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "start_route",
                reason: format!("`{}` must start with '/'", self.start_route),
            });
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, v: &str) -> Result<T, ConfigError> {
    v.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("`{v}` is not a number"),
    })
}

fn parse_bool(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            reason: format!("`{v}` is not a boolean"),
        }),
    }
}

/// Resolve settings: explicit file (must exist) or `shopdesk.json` in the
/// working directory (optional), then the environment.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match explicit {
        Some(path) => Settings::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Settings::from_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };
    settings.apply_env(|k| std::env::var(k).ok())?;
    settings.validate()?;
    Ok(settings)
}
