use std::{env, net::IpAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_FRONTEND_DIR: &str = "frontend";
const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing MONGODB_URI. Create a .env file or export it before starting the server.")]
    MissingMongoUri,
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("Invalid HOST value: {0}")]
    InvalidHost(String),
}

/// Server settings read from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: Option<String>,
    pub frontend_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_uri = non_empty_var("MONGODB_URI").ok_or(ConfigError::MissingMongoUri)?;

        let port = match non_empty_var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host_raw = non_empty_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_raw))?;

        Ok(AppConfig {
            host,
            port,
            mongodb_uri,
            mongodb_database: non_empty_var("MONGODB_DATABASE"),
            frontend_dir: dir_var("FRONTEND_DIR", DEFAULT_FRONTEND_DIR),
            images_dir: dir_var("IMAGES_DIR", DEFAULT_IMAGES_DIR),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn dir_var(key: &str, default: &str) -> PathBuf {
    PathBuf::from(non_empty_var(key).unwrap_or_else(|| default.to_string()))
}
