#[allow(clippy::module_inception)]
mod config;
mod server_config;

pub(crate) use {config::Config, server_config::ServerConfig};

pub(crate) const DEFAULT_BIND: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 7890;

pub(crate) fn default_bind() -> String {
    DEFAULT_BIND.to_owned()
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}
