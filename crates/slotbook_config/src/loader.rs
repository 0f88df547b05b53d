// --- File: crates/slotbook_config/src/loader.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::env_vars::{config_path_to_env_var, get_config_prefix, CONFIG_SEPARATOR};
use crate::models::AppConfig;

/// Directory holding `default.*` and `{RUN_ENV}.*` when nothing else is set.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Errors raised while assembling the configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Loads the configuration for the current process.
///
/// Sources, lowest precedence first: `{dir}/default.*`, `{dir}/{RUN_ENV}.*`,
/// then `SLOTBOOK__*` environment variables. `dir` comes from
/// `SLOTBOOK_CONFIG_DIR` and defaults to [`DEFAULT_CONFIG_DIR`].
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let dir = env::var("SLOTBOOK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    load_config_from_dir(&dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from_dir(dir: &Path, run_env: &str) -> Result<AppConfig, ConfigLoadError> {
    let default_path = dir.join("default");
    let env_path = dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(&get_config_prefix()).separator(CONFIG_SEPARATOR));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(config)
}

fn validate(config: AppConfig) -> Result<AppConfig, ConfigLoadError> {
    if config.api.normalized_base_url().is_empty() {
        return Err(ConfigLoadError::Invalid(format!(
            "api.base_url is empty; set it in the config file or via {}",
            config_path_to_env_var("api.base_url")
        )));
    }
    if let Some(mini_app) = &config.mini_app {
        if mini_app.url.trim().is_empty() {
            return Err(ConfigLoadError::Invalid(format!(
                "mini_app.url is empty; set it or remove the [mini_app] section ({})",
                config_path_to_env_var("mini_app.url")
            )));
        }
    }
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set and `.env` otherwise; a missing
/// file is not an error. Loading happens once per process.
///
/// # Return
///
/// The path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingLookup, BookingPayload, IdentitySource};
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[api]\nbase_url = \"https://booking.example.dev/\"\n",
        );

        let config = load_config_from_dir(dir.path(), "debug").unwrap();
        assert_eq!(config.api.normalized_base_url(), "https://booking.example.dev");
        assert_eq!(config.identity_source, IdentitySource::Url);
        assert!(!config.admin_mode);
        assert_eq!(config.booking.payload, BookingPayload::UserId);
        assert_eq!(config.booking.lookup, BookingLookup::Query);
        assert!(config.mini_app.is_none());
    }

    #[test]
    fn test_run_env_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[api]\nbase_url = \"https://a.example.dev\"\n[booking]\npayload = \"user_id\"\n",
        );
        write(
            dir.path(),
            "admin.toml",
            "admin_mode = true\nidentity_source = \"host\"\n[booking]\npayload = \"contact\"\nlookup = \"path\"\n",
        );

        let config = load_config_from_dir(dir.path(), "admin").unwrap();
        assert!(config.admin_mode);
        assert_eq!(config.identity_source, IdentitySource::Host);
        assert_eq!(config.booking.payload, BookingPayload::Contact);
        assert_eq!(config.booking.lookup, BookingLookup::Path);
        assert_eq!(config.api.base_url, "https://a.example.dev");
    }

    #[test]
    fn test_empty_base_url_names_env_var() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "[api]\nbase_url = \"  \"\n");

        let err = load_config_from_dir(dir.path(), "debug").unwrap_err();
        assert!(err.to_string().contains("SLOTBOOK__API__BASE_URL"));
    }

    #[test]
    fn test_missing_api_section_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "admin_mode = true\n");

        let err = load_config_from_dir(dir.path(), "debug").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Source(_)));
    }
}
