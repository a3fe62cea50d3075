use std::env;
use std::fmt;

use crate::ClientError;

/// Base URL of the public strain data service.
pub const DEFAULT_BASE_URL: &str = "http://data.leafly.com";

/// Environment variable holding the application id.
pub const APP_ID_ENV: &str = "STRAIN_APP_ID";
/// Environment variable holding the application key.
pub const APP_KEY_ENV: &str = "STRAIN_APP_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "STRAIN_BASE_URL";

/// Credentials and endpoint used by every request a client sends.
///
/// A `Config` is moved into a client at construction and is never mutated
/// afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    app_id: String,
    app_key: String,
    base_url: String,
}

impl Config {
    /// Creates a configuration pointing at [`DEFAULT_BASE_URL`].
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Reads credentials from [`APP_ID_ENV`] and [`APP_KEY_ENV`].
    ///
    /// [`BASE_URL_ENV`] overrides the base URL when set.
    pub fn from_env() -> Result<Self, ClientError> {
        let app_id = env::var(APP_ID_ENV).map_err(|_| ClientError::MissingCredential(APP_ID_ENV))?;
        let app_key =
            env::var(APP_KEY_ENV).map_err(|_| ClientError::MissingCredential(APP_KEY_ENV))?;
        let config = Self::new(app_id, app_key);

        Ok(match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    /// Returns a copy pointing at a different service root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Keep the key out of debug output and logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
