//! Test harness configuration management.

use serde::Deserialize;

/// Environment file read before any configuration source.
pub const ENV_FILE: &str = ".env.test";

/// Prefix for environment overrides, e.g. `TALLYGUARD__STORE__URL`.
pub const ENV_PREFIX: &str = "TALLYGUARD";

/// Top-level test configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    /// Hosted store configuration.
    pub store: StoreConfig,
}

/// Connection settings for the hosted store REST surface.
#[derive(Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, without the `/rest/v1` suffix.
    pub url: String,
    /// Public (anonymous) API key.
    pub anon_key: String,
    /// Privileged API key that bypasses row-level security.
    #[serde(default)]
    pub service_key: Option<String>,
    /// Database schema exposed through the REST surface.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"[hidden]")
            .field(
                "service_key",
                &self.service_key.as_ref().map(|_| "[hidden]"),
            )
            .field("schema", &self.schema)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    /// Creates a configuration with default schema and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            service_key: None,
            schema: default_schema(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Sets the privileged key.
    #[must_use]
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = Some(key.into());
        self
    }

    /// Returns the REST root, e.g. `https://example.test/rest/v1`.
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}

impl TestConfig {
    /// Loads configuration from `.env.test`, config files, and environment.
    ///
    /// Sources, later ones winning:
    /// 1. `config/default.toml`
    /// 2. `config/{RUN_MODE}.toml` (`RUN_MODE` defaults to `test`)
    /// 3. `TALLYGUARD__*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a required
    /// field is missing.
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Err(e) = dotenvy::from_filename(ENV_FILE) {
            tracing::trace!(error = %e, "no {ENV_FILE} loaded");
        }

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "test".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
