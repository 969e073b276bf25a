//! # fix-config
//!
//! Layered configuration loading for FixPoint using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FIXPOINT_*` prefix, `__` as separator)
//! 2. Project-level `.fixpoint/config.toml`
//! 3. User-level `~/.config/fixpoint/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FIXPOINT_STORE__PATH` -> `store.path`,
//! `FIXPOINT_WORKFLOW__MARK_ASSIGNED_ON_ASSIGN` -> `workflow.mark_assigned_on_assign`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use fix_config::FixConfig;
//!
//! let config = FixConfig::load_with_dotenv().expect("config");
//! println!("store: {}", config.store.path);
//! ```

mod auth;
mod error;
mod general;
mod store;
mod workflow;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FixConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FixConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.auth.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".fixpoint/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FIXPOINT_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fixpoint").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = FixConfig::default();
        assert_eq!(config.store.path, ".fixpoint/fixpoint.db");
        assert!(!config.workflow.mark_assigned_on_assign);
        assert_eq!(config.auth.min_password_len, 6);
        assert_eq!(config.general.default_limit, 50);
    }

    #[test]
    fn project_toml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_dir(".fixpoint")?;
            jail.create_file(
                ".fixpoint/config.toml",
                r#"
                [store]
                path = "incidents.db"

                [workflow]
                mark_assigned_on_assign = true
                "#,
            )?;
            let config = FixConfig::load().expect("should load");
            assert_eq!(config.store.path, "incidents.db");
            assert!(config.workflow.mark_assigned_on_assign);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_dir(".fixpoint")?;
            jail.create_file(".fixpoint/config.toml", "[store]\npath = \"from-toml.db\"\n")?;
            jail.set_env("FIXPOINT_STORE__PATH", ":memory:");
            jail.set_env("FIXPOINT_AUTH__MIN_PASSWORD_LEN", "10");
            let config = FixConfig::load().expect("should load");
            assert_eq!(config.store.path, ":memory:");
            assert_eq!(config.auth.min_password_len, 10);
            Ok(())
        });
    }

    #[test]
    fn invalid_hash_params_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FIXPOINT_AUTH__HASH_MEMORY_KIB", "4");
            let err = FixConfig::load().expect_err("memory below minimum");
            assert!(matches!(err, ConfigError::InvalidValue { .. }));
            Ok(())
        });
    }
}
