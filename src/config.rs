use anyhow::Context;
use serde::Deserialize;

/// Server configuration.
///
/// All fields default, so an empty (or absent) config file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// Listen backlog passed to the kernel.
    pub backlog: i32,
    /// Connection-table capacity; accepts beyond it are shed.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            backlog: 128,
            max_connections: 64,
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// Reads the YAML file named by `PALISADE_CONFIG` when set, defaults
    /// otherwise. `LISTEN` overrides the listen address either way.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("PALISADE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(listen) = std::env::var("LISTEN") {
            cfg.listen_addr = listen;
        }
        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parsing config file {}", path))
    }
}
