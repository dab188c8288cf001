//! Runtime settings for the plugin.
//!
//! Munin hands plugin settings over as environment variables (`env.*` lines in
//! `plugin-conf.d`), so settings are layered as: built-in defaults, then
//! `MUNIN_JMX_*` environment variables, then command-line flags.
//!
//! ```text
//! [munin-jmx]
//! env.MUNIN_JMX_CONFIG /etc/munin/wildfly.yml
//! env.MUNIN_JMX_TIMEOUT 5
//! env.MUNIN_JMX_LOG debug
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Configuration file read when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/munin/jmx.yml";

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "MUNIN_JMX";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path to the YAML plugin configuration.
    pub config: PathBuf,
    /// Default request timeout in seconds.
    pub timeout: u64,
    /// Log filter directive, e.g. `warn` or `munin_jmx=debug`.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            timeout: 10,
            log: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults and the process environment.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let defaults = Settings::default();

        let config = Config::builder()
            .set_default("config", defaults.config.to_string_lossy().to_string())?
            .set_default("timeout", defaults.timeout as i64)?
            .set_default("log", defaults.log)?
            .add_source(environment.try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, config: Option<PathBuf>, timeout: Option<u64>) -> Self {
        if let Some(config) = config {
            self.config = config;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        self
    }

    /// The default request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
