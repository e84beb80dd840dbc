//! # Application State
//!
//! Shared state handed to every handler: the record stores, the template
//! compiler, and the service configuration.
//!
//! The stores and the compiler are trait objects so tests and embedders
//! can swap implementations without touching the router.

use std::sync::Arc;

use thiserror::Error;

use cms_compile::{LayoutMerger, TemplateCompiler};
use cms_entity::{InMemoryLayoutStore, InMemoryTemplateStore, LayoutStore, TemplateStore};

/// Environment variable for the listen port.
pub const PORT_ENV: &str = "CMS_PORT";
/// Environment variable for the static bearer token.
pub const AUTH_TOKEN_ENV: &str = "CMS_AUTH_TOKEN";
/// Environment variable toggling `/metrics` and request metrics.
pub const METRICS_ENABLED_ENV: &str = "CMS_METRICS_ENABLED";

/// Errors loading [`AppConfig`] from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Service configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    /// Whether `/metrics` is mounted and requests are counted.
    pub metrics_enabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An empty `CMS_AUTH_TOKEN` counts as unset. `CMS_METRICS_ENABLED`
    /// disables metrics only when it is `false` (case-insensitive).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    var: PORT_ENV,
                    value,
                    source,
                })?,
            None => defaults.port,
        };

        let auth_token = lookup(AUTH_TOKEN_ENV).filter(|t| !t.is_empty());

        let metrics_enabled = lookup(METRICS_ENABLED_ENV)
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(defaults.metrics_enabled);

        Ok(Self {
            port,
            auth_token,
            metrics_enabled,
        })
    }
}

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<dyn TemplateStore>,
    pub layouts: Arc<dyn LayoutStore>,
    pub compiler: Arc<dyn TemplateCompiler>,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("templates", &self.templates.list().len())
            .field("layouts", &self.layouts.list().len())
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// In-memory stores, the default merger, default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// In-memory stores and the default merger with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            templates: Arc::new(InMemoryTemplateStore::new()),
            layouts: Arc::new(InMemoryLayoutStore::new()),
            compiler: Arc::new(LayoutMerger),
            config,
        }
    }

    /// Replace the template compiler.
    pub fn with_compiler(mut self, compiler: Arc<dyn TemplateCompiler>) -> Self {
        self.compiler = compiler;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
