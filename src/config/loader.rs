//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required in layered mode)
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `CATALOG_*` environment variables (`CATALOG_SERVER__PORT` -> `server.port`)

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "CATALOG_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "CATALOG_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "CATALOG";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, only this file (plus env vars) is read
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Builds a loader from `CATALOG_CONFIG_DIR`, `CATALOG_CONFIG_FILE` and
    /// `CATALOG_APP_ENV`. The first two are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let file_var = std::env::var(CONFIG_FILE_ENV).ok();

        if dir_var.is_some() && file_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file: file_var.map(PathBuf::from),
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader for a single explicit file, as given by `--config`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Overrides the environment layer (the CLI `--env` flag).
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Loads and validates the merged settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the merged settings without running `Settings::validate`.
    ///
    /// The CLI uses this so that flag overrides can repair values before validation.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        builder = match &self.config_file {
            Some(file) => Self::add_file(builder, file, true)?,
            None => {
                let builder = Self::add_file(builder, &self.config_dir.join("default.toml"), true)?;
                let env_file = self
                    .config_dir
                    .join(format!("{}.toml", self.environment.as_str()));
                let builder = Self::add_file(builder, &env_file, false)?;
                Self::add_file(builder, &self.config_dir.join("local.toml"), false)?
            }
        };

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn add_file(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let path_str = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(path_str, FileFormat::Toml).required(required)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests below touch process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const BASE: &str = r#"
[server]
port = 3000

[database]
url = "postgres://localhost/catalog"

[jwt]
secret = "0123456789abcdef0123456789abcdef"
"#;

    struct EnvGuard(Vec<(&'static str, Option<String>)>);

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self(Vec::new());
            for key in [CONFIG_DIR_ENV, CONFIG_FILE_ENV, AppEnvironment::ENV_VAR, "CATALOG_SERVER__PORT"] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &'static str, value: &str) {
            self.0.push((key, std::env::var(key).ok()));
            unsafe { std::env::set_var(key, value) };
        }

        fn remove(&mut self, key: &'static str) {
            self.0.push((key, std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.0.iter().rev() {
                unsafe {
                    match value {
                        Some(v) => std::env::set_var(key, v),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        for (name, body) in files {
            fs::write(dir.path().join(name), body).expect("write config");
        }
        dir
    }

    #[test]
    fn test_rejects_dir_and_file_together() {
        let _lock = ENV_LOCK.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/etc/catalog");
        env.set(CONFIG_FILE_ENV, "/etc/catalog/catalog.toml");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::MutualExclusivityError(_))
        ));
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = ENV_LOCK.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        match err {
            ConfigError::FileNotFound(msg) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_layers_apply_in_order() {
        let _lock = ENV_LOCK.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[
            ("default.toml", BASE),
            ("production.toml", "[server]\nport = 8080\nhost = \"0.0.0.0\"\n"),
            ("local.toml", "[server]\nport = 8081\n"),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new().unwrap().load().expect("settings");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.database.url, "postgres://localhost/catalog");
    }

    #[test]
    fn test_env_var_beats_files() {
        let _lock = ENV_LOCK.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[("default.toml", BASE)]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set("CATALOG_SERVER__PORT", "9191");

        let settings = ConfigLoader::new().unwrap().load().expect("settings");
        assert_eq!(settings.server.port, 9191);
    }

    #[test]
    fn test_single_file_mode() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::new();
        let dir = config_dir(&[("catalog.toml", BASE)]);

        let settings = ConfigLoader::from_file(dir.path().join("catalog.toml"))
            .load()
            .expect("settings");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_invalid_settings_fail_validation() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::new();
        let dir = config_dir(&[("catalog.toml", "[server]\nport = 3000\n")]);

        let loader = ConfigLoader::from_file(dir.path().join("catalog.toml"));
        assert!(loader.load().is_err());
        assert!(loader.load_unvalidated().is_ok());
    }
}
