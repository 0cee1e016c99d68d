use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Store endpoint and persistence settings, shared by the game and the server.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of the game-side persistence queue.
    pub max_pending: usize,
    /// Per-request deadline of the remote client.
    pub io_timeout_ms: u64,
    /// Server only: persist collections here instead of in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending: 16,
            io_timeout_ms: 5_000,
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Create from `LANE_DODGE_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("LANE_DODGE_STORE_HOST").unwrap_or(defaults.host);
        let port = env::var("LANE_DODGE_STORE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let max_pending = env::var("LANE_DODGE_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_pending);

        let data_dir = env::var("LANE_DODGE_STORE_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            host,
            port,
            max_pending,
            io_timeout_ms: defaults.io_timeout_ms,
            data_dir,
        }
    }

    /// `host:port`, resolvable by tokio's `connect`/`bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }

    /// Offline play requested via `LANE_DODGE_STORE_DISABLED`.
    pub fn is_disabled() -> bool {
        env::var("LANE_DODGE_STORE_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}
