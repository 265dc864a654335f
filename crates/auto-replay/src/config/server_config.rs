use crate::config::{default_bind, default_port};

use serde::{Deserialize, Serialize};

/// Control-surface listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the control surface binds to. Loopback by default: this API
    /// synthesizes input, so exposing it beyond the machine must be a
    /// deliberate configuration choice.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port for the control surface.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// The listen address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}
