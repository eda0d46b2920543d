use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::http::reader::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_REQUEST_BYTES};
use crate::server::ServerOptions;

pub const DEFAULT_PORT: u16 = 18427;

/// Names a YAML file to load before applying overrides.
pub const CONFIG_ENV: &str = "TICKET_NOTES_CONFIG";
pub const PORT_ENV: &str = "TICKET_NOTES_PORT";
pub const DIR_ENV: &str = "TICKET_NOTES_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub notes: NotesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub max_request_bytes: usize,
    pub read_chunk_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            read_chunk_bytes: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Loads from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads using `lookup` in place of the environment: the YAML file named
    /// by [`CONFIG_ENV`] if any, then [`PORT_ENV`] and [`DIR_ENV`] on top.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(port) = lookup(PORT_ENV) {
            match port.trim().parse() {
                Ok(port) => cfg.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid {}", PORT_ENV),
            }
        }

        if let Some(dir) = lookup(DIR_ENV).filter(|d| !d.is_empty()) {
            cfg.notes.dir = Some(PathBuf::from(dir));
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            port: self.server.port,
            read_chunk_bytes: self.server.read_chunk_bytes,
            max_request_bytes: self.server.max_request_bytes,
        }
    }
}
