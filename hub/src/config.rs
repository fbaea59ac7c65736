use std::env;

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,
    /// Fixed RNG seed for the mock generator. `None` ⇒ seeded from the OS.
    pub mock_seed: Option<u64>,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_opt_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("HUB_BIND", "127.0.0.1"),
            port: env_u16("HUB_PORT", 3000),
            mock_seed: env_opt_u64("HUB_MOCK_SEED"),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            mock_seed: None,
        }
    }
}
