use std::{
    io::ErrorKind,
    net::{IpAddr, SocketAddr},
    path::Path,
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Web {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub uri: String,
    #[serde(default = "pool_size_default")]
    pub pool_size: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Metadata {
    /// Total time allowed for one page fetch, redirects included
    #[serde(default = "timeout_secs_default")]
    pub timeout_secs: u64,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            host: host_default(),
            port: port_default(),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Database {
            uri: String::new(),
            pool_size: pool_size_default(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            timeout_secs: timeout_secs_default(),
        }
    }
}

fn host_default() -> String {
    String::from("0.0.0.0")
}

fn port_default() -> u16 {
    8000
}

fn pool_size_default() -> usize {
    16
}

fn timeout_secs_default() -> u64 {
    10
}

impl Config {
    /// Reads a TOML file; a missing file yields the defaults. `database_url`
    /// (normally `DATABASE_URL`) wins over `[database] uri`.
    pub fn load(path: impl AsRef<Path>, database_url: Option<String>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", path.display());
                Config::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        if let Some(uri) = database_url.filter(|uri| !uri.is_empty()) {
            config.database.uri = uri;
        }
        if config.database.uri.is_empty() {
            bail!("database uri is not set, use DATABASE_URL or [database] uri");
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let host: IpAddr = self
            .web
            .host
            .parse()
            .with_context(|| format!("invalid host {}", self.web.host))?;
        Ok(SocketAddr::new(host, self.web.port))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata.timeout_secs)
    }
}
