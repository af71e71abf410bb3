use std::net::SocketAddr;

use envconfig::Envconfig;
use tracing::Level;

use crate::router::RouterConfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(default = "LogMessage")]
    pub selected_events: String,

    #[envconfig(default = "")]
    pub extra_fields: String, // "key:value, key:value"

    pub app_metadata_path: Option<String>, // JSON array of application records

    #[envconfig(default = "0.0.0.0:3302")]
    pub bind: SocketAddr,

    #[envconfig(default = "true")]
    pub export_prometheus: bool,

    #[envconfig(default = "info")]
    pub log_level: Level,
}

impl Config {
    pub fn router(&self) -> RouterConfig {
        RouterConfig {
            selected_events: self.selected_events.clone(),
            extra_fields: self.extra_fields.clone(),
        }
    }
}
