//! Bot configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pacing::PacingPolicy;
use crate::types::DEFAULT_PACING_MS;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_PORT: u16 = 7878;

/// Where the TCP gateway listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    /// Bound on events waiting for the bot.
    pub max_pending_events: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            protocol_version: "1.0.0".to_string(),
            max_pending_events: 64,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("GAMECORD_HOST").unwrap_or(defaults.host),
            port: parse_var("GAMECORD_PORT").unwrap_or(defaults.port),
            max_pending_events: parse_var("GAMECORD_MAX_PENDING")
                .unwrap_or(defaults.max_pending_events),
            ..defaults
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid gateway address {}:{}", self.host, self.port))
    }
}

/// Embedding-level settings of a bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Prefix every command starts with.
    pub prefix: String,
    /// Command name that starts the game; also the display name.
    pub name: String,
    pub pacing: PacingPolicy,
    pub gateway: GatewayConfig,
}

impl BotConfig {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            pacing: PacingPolicy::default(),
            gateway: GatewayConfig::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Read `GAMECORD_*` variables, falling back to `default_name` for the
    /// command name.
    pub fn from_env(default_name: &str) -> Self {
        let prefix = env::var("GAMECORD_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let name = env::var("GAMECORD_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_name.to_string());
        let pacing_ms = parse_var("GAMECORD_PACING_MS").unwrap_or(DEFAULT_PACING_MS);

        Self {
            prefix,
            name,
            pacing: PacingPolicy::uniform(Duration::from_millis(pacing_ms)),
            gateway: GatewayConfig::from_env(),
        }
    }

    /// Presence activity, e.g. `!wander`.
    pub fn activity(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

fn parse_var<V: std::str::FromStr>(key: &str) -> Option<V> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_and_defaults() {
        let config = BotConfig::new("wander", "?");
        assert_eq!(config.activity(), "?wander");
        assert_eq!(config.pacing, PacingPolicy::courteous());
        assert_eq!(config.gateway.port, DEFAULT_PORT);
    }

    #[test]
    fn test_socket_addr() {
        let gw = GatewayConfig {
            port: 0,
            ..GatewayConfig::default()
        };
        assert_eq!(gw.socket_addr().unwrap().to_string(), "127.0.0.1:0");

        let bad = GatewayConfig {
            host: "not a host".to_string(),
            ..GatewayConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_from_env_reads_overrides() {
        env::set_var("GAMECORD_PREFIX", "$");
        env::set_var("GAMECORD_PACING_MS", "0");
        let config = BotConfig::from_env("snake");
        env::remove_var("GAMECORD_PREFIX");
        env::remove_var("GAMECORD_PACING_MS");

        assert_eq!(config.prefix, "$");
        assert_eq!(config.pacing, PacingPolicy::none());
        assert_eq!(config.name, "snake");
    }
}
