use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    /// Where agent decisions are requested from. None leaves agents idle.
    pub decision_endpoint: Option<String>,
    pub decision_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    pub agent_delay_min_ms: u64,
    pub agent_delay_max_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            decision_endpoint: None,
            decision_timeout_secs: 20,
            idle_timeout_secs: 1800,
            sweep_interval_secs: 60,
            agent_delay_min_ms: 1500,
            agent_delay_max_ms: 6000,
        }
    }
}

/// Cap on the env-supplied idle timeout; the sweeper turns it into i64
/// second arithmetic.
const MAX_IDLE_TIMEOUT_SECS: u64 = 31_536_000;

impl ServerConfig {
    /// Reads the environment, falling back to defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        let default = ServerConfig::default();
        ServerConfig {
            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.bind_addr),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.allowed_origins),
            decision_endpoint: env::var("DECISION_ENDPOINT").ok().filter(|v| !v.is_empty()),
            decision_timeout_secs: env_u64("DECISION_TIMEOUT_SECS", default.decision_timeout_secs),
            idle_timeout_secs: env_u64("IDLE_TIMEOUT_SECS", default.idle_timeout_secs)
                .min(MAX_IDLE_TIMEOUT_SECS),
            sweep_interval_secs: env_u64("SWEEP_INTERVAL_SECS", default.sweep_interval_secs),
            agent_delay_min_ms: env_u64("AGENT_DELAY_MIN_MS", default.agent_delay_min_ms),
            agent_delay_max_ms: env_u64("AGENT_DELAY_MAX_MS", default.agent_delay_max_ms),
        }
    }

    /// Stagger bounds for agent turns, normalized so max never undercuts min.
    pub fn agent_delay_range(&self) -> (u64, u64) {
        (
            self.agent_delay_min_ms,
            self.agent_delay_max_ms.max(self.agent_delay_min_ms),
        )
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
