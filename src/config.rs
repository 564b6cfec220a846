use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "clinic-text";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address. Loopback only; put a reverse proxy in front for LAN access.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Default request body limit (1 MiB of clinical text is generous).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

pub const DEFAULT_RATE_PER_MINUTE: u32 = 120;
pub const DEFAULT_RATE_PER_HOUR: u32 = 2000;

const ENV_ADDR: &str = "CLINIC_TEXT_ADDR";
const ENV_MAX_BODY_BYTES: &str = "CLINIC_TEXT_MAX_BODY_BYTES";
const ENV_RATE_PER_MINUTE: &str = "CLINIC_TEXT_RATE_PER_MINUTE";
const ENV_RATE_PER_HOUR: &str = "CLINIC_TEXT_RATE_PER_HOUR";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinic_text_lib=info,tower_http=warn"
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Server settings, resolved from the environment with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
    pub rate_per_minute: u32,
    pub rate_per_hour: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            rate_per_minute: DEFAULT_RATE_PER_MINUTE,
            rate_per_hour: DEFAULT_RATE_PER_HOUR,
        }
    }
}

impl ServerConfig {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = match lookup(ENV_ADDR) {
            Some(value) => value.trim().parse::<SocketAddr>().map_err(|_| ConfigError::InvalidAddr {
                var: ENV_ADDR,
                value,
            })?,
            None => defaults.addr,
        };

        Ok(Self {
            addr,
            max_body_bytes: positive(&lookup, ENV_MAX_BODY_BYTES)?
                .unwrap_or(defaults.max_body_bytes),
            rate_per_minute: positive(&lookup, ENV_RATE_PER_MINUTE)?
                .unwrap_or(defaults.rate_per_minute),
            rate_per_hour: positive(&lookup, ENV_RATE_PER_HOUR)?
                .unwrap_or(defaults.rate_per_hour),
        })
    }
}

/// Parse an optional positive integer variable. Zero is rejected.
fn positive<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(n) if n != T::default() => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}
