use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "QUICKNOTES_PORT";
    /// Older deployments set the port under this name; read when `PORT` is unset.
    pub const LEGACY_PORT: &str = "GOPHERSS_PORT";
    pub const HOST: &str = "QUICKNOTES_HOST";
    /// Flat directory holding one `<identifier>.md` file per note.
    pub const NOTES_DIR: &str = "QUICKNOTES_NOTES_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const HOST: &str = "0.0.0.0";
    pub const NOTES_DIR: &str = "/data";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub notes_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source (empty values count as unset)
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port_var = [env_vars::PORT, env_vars::LEGACY_PORT]
            .into_iter()
            .find_map(|var| get(var).map(|value| (var, value)));
        let port = match port_var {
            Some((var, value)) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { var, value })?,
            None => defaults::PORT,
        };

        Ok(Self {
            host: get(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            notes_dir: PathBuf::from(
                get(env_vars::NOTES_DIR).unwrap_or_else(|| defaults::NOTES_DIR.to_string()),
            ),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
