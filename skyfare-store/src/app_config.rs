use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub deals: DealsConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DealsConfig {
    /// Deals generated per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for DealsConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Idle time after which a booking session is dropped
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_port() -> u16 { 3000 }
fn default_batch_size() -> usize { 30 }
fn default_ttl() -> u64 { 1800 }
fn default_sweep_interval() -> u64 { 60 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYFARE__SESSIONS__TTL_SECONDS=600`
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str("[deals]\nbatch_size = 12\n", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.deals.batch_size, 12);
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.sessions.ttl_seconds, 1800);
        assert_eq!(cfg.sessions.sweep_interval_seconds, 60);
    }
}
