use crate::error::Error;
use std::str::FromStr;

/// Running environment, which selects the `config.{env}.toml` file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    /// Development, with pretty logs on stdout.
    #[default]
    Dev,
    /// Production, with JSON logs.
    Prod,
}

impl Env {
    /// Reads the env from the `INTL_TEL_ENV` environment variable.
    /// An unset or unsupported value falls back to `dev` with a warning.
    pub fn from_var() -> Self {
        match std::env::var("INTL_TEL_ENV") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("{err}; the `dev` env is used");
                Self::Dev
            }),
            Err(_) => Self::Dev,
        }
    }

    /// Returns `true` if `self` is the `dev` env.
    #[inline]
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    /// Returns the env name used in config and log file names.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl FromStr for Env {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(Error::new(format!("unsupported env `{value}`"))),
        }
    }
}
