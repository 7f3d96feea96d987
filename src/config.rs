use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;
use tracing::debug;

use crate::models::CustomerInfo;

const DEFAULT_MENU_URL: &str = "https://functions.poehali.dev/9f6e51f9-0e03-4a02-be62-73cc026c8c6e";
const DEFAULT_CREATE_ORDER_URL: &str =
    "https://functions.poehali.dev/1add3bb7-0b10-47d4-9cc9-0dc3c8040250";
const DEFAULT_GET_ORDER_URL: &str =
    "https://functions.poehali.dev/1018dbd4-c305-4042-8dfa-c3b9d7f36aad";

pub const ENV_MENU_URL: &str = "RESTAURANT_MENU_URL";
pub const ENV_CREATE_ORDER_URL: &str = "RESTAURANT_CREATE_ORDER_URL";
pub const ENV_GET_ORDER_URL: &str = "RESTAURANT_GET_ORDER_URL";
pub const ENV_CUSTOMER_NAME: &str = "RESTAURANT_CUSTOMER_NAME";
pub const ENV_CUSTOMER_PHONE: &str = "RESTAURANT_CUSTOMER_PHONE";
pub const ENV_CUSTOMER_EMAIL: &str = "RESTAURANT_CUSTOMER_EMAIL";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// URLs of the three backend functions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub menu: String,
    pub create_order: String,
    pub get_order: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            menu: DEFAULT_MENU_URL.to_string(),
            create_order: DEFAULT_CREATE_ORDER_URL.to_string(),
            get_order: DEFAULT_GET_ORDER_URL.to_string(),
        }
    }
}

impl Endpoints {
    // All three endpoints under one base URL, used against local backends
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            menu: format!("{base}/menu"),
            create_order: format!("{base}/orders"),
            get_order: format!("{base}/order"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub customer: CustomerInfo,
}

impl Settings {
    /// Defaults, then the YAML file, then environment variables.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// read only when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        settings.apply_overrides(|key| env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "reading config file");
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(ENV_MENU_URL) {
            self.endpoints.menu = url;
        }
        if let Some(url) = value(ENV_CREATE_ORDER_URL) {
            self.endpoints.create_order = url;
        }
        if let Some(url) = value(ENV_GET_ORDER_URL) {
            self.endpoints.get_order = url;
        }
        if let Some(name) = value(ENV_CUSTOMER_NAME) {
            self.customer.name = name;
        }
        if let Some(phone) = value(ENV_CUSTOMER_PHONE) {
            self.customer.phone = phone;
        }
        if let Some(email) = value(ENV_CUSTOMER_EMAIL) {
            self.customer.email = Some(email);
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("restaurant-order");
    path.push("config.yml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.customer.name, "Guest");
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let raw = "endpoints:\n  menu: http://localhost:9000/menu\ncustomer:\n  name: Ann\n  phone: \"+353\"\n";
        let settings = Settings::from_yaml(raw).unwrap();
        assert_eq!(settings.endpoints.menu, "http://localhost:9000/menu");
        assert_eq!(settings.endpoints.get_order, DEFAULT_GET_ORDER_URL);
        assert_eq!(settings.customer.phone, "+353");
        assert_eq!(settings.customer.email, None);
    }

    #[test]
    fn environment_wins_over_file_and_ignores_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CREATE_ORDER_URL, "http://override/orders"),
            (ENV_CUSTOMER_EMAIL, "ann@example.com"),
            (ENV_CUSTOMER_NAME, "   "),
        ]);
        let mut settings = Settings::default();
        settings.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.endpoints.create_order, "http://override/orders");
        assert_eq!(settings.customer.email.as_deref(), Some("ann@example.com"));
        assert_eq!(settings.customer.name, "Guest");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.yml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn base_url_expands_to_three_endpoints() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:8080/");
        assert_eq!(endpoints.menu, "http://127.0.0.1:8080/menu");
        assert_eq!(endpoints.create_order, "http://127.0.0.1:8080/orders");
        assert_eq!(endpoints.get_order, "http://127.0.0.1:8080/order");
    }
}
