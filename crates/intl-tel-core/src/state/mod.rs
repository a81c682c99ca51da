//! Application scoped state.

use crate::{LazyLock, error::Error, extension::TomlTableExt};
use std::path::{Path, PathBuf};
use toml::value::Table;

mod config;
mod env;

pub use self::env::Env;

/// A state is a record of the env and the config.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Environment.
    env: Env,
    /// Configuration.
    config: Table,
}

impl State {
    /// Creates a new instance with an empty config.
    #[inline]
    pub fn new(env: Env) -> Self {
        Self {
            env,
            config: Table::new(),
        }
    }

    /// Creates a new instance with the config.
    #[inline]
    pub fn with_config(env: Env, config: Table) -> Self {
        Self { env, config }
    }

    /// Parses the TOML source as the config.
    pub fn from_toml_str(env: Env, source: &str) -> Result<Self, Error> {
        let config = source
            .parse::<Table>()
            .map_err(|err| Error::with_source("fail to parse the TOML config", err))?;
        Ok(Self { env, config })
    }

    /// Loads the config file in the directory according to the specific env.
    /// Both `config.{env}.toml` and `config.{env}.json` are supported.
    pub fn load_config(&mut self, config_dir: &Path) -> Result<(), Error> {
        let env = self.env.as_str();
        let toml_file = config_dir.join(format!("config.{env}.toml"));
        let config_file = if toml_file.exists() {
            toml_file
        } else {
            config_dir.join(format!("config.{env}.json"))
        };
        self.config = config::read_config_file(&config_file, env).map_err(|err| {
            let config_file = config_file.display();
            err.wrap(format!("fail to read the config file `{config_file}`"))
        })?;
        Ok(())
    }

    /// Returns the env.
    #[inline]
    pub fn env(&self) -> Env {
        self.env
    }

    /// Returns a reference to the config.
    #[inline]
    pub fn config(&self) -> &Table {
        &self.config
    }

    /// Returns a reference to the config table corresponding to the key.
    #[inline]
    pub fn get_config(&self, key: &str) -> Option<&Table> {
        self.config.get_table(key)
    }

    /// Returns the config directory.
    /// It can be specified by the `INTL_TEL_CONFIG_DIR` environment variable.
    #[inline]
    pub fn config_dir() -> &'static Path {
        CONFIG_DIR.as_path()
    }

    /// Returns a reference to the shared state.
    #[inline]
    pub fn shared() -> &'static State {
        LazyLock::force(&SHARED_STATE)
    }
}

/// Config directory.
static CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    std::env::var("INTL_TEL_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
});

/// Shared state.
static SHARED_STATE: LazyLock<State> = LazyLock::new(|| {
    let app_env = Env::from_var();
    let mut state = State::new(app_env);
    if let Err(err) = state.load_config(State::config_dir()) {
        tracing::warn!(env = app_env.as_str(), "{err}; the default settings are used");
    }
    state
});
