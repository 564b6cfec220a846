//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::ServerConfig;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router and middleware
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            rate_limiter: Arc::new(Mutex::new(RateLimiter::with_limits(
                config.rate_per_minute,
                config.rate_per_hour,
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter — per-client sliding window
// ═══════════════════════════════════════════════════════════

/// Every this many checks, clients with no requests in the last hour are
/// dropped from the map.
const SWEEP_INTERVAL: u64 = 256;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);

/// Per-client rate limiter with per-minute and per-hour limits.
pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    per_minute: u32,
    per_hour: u32,
    checks: u64,
}

impl RateLimiter {
    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            windows: HashMap::new(),
            per_minute,
            per_hour,
            checks: 0,
        }
    }

    /// Check if a client is within rate limits. Returns `Ok(())` or
    /// `Err(retry_after_secs)` if exceeded.
    pub fn check(&mut self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&mut self, client: &str, now: Instant) -> Result<(), u64> {
        self.checks = self.checks.wrapping_add(1);
        if self.checks % SWEEP_INTERVAL == 0 {
            self.evict_idle(now);
        }

        let entries = self.windows.entry(client.to_string()).or_default();

        // Clean entries older than 1 hour
        entries.retain(|ts| now.duration_since(*ts) < HOUR);

        let last_minute = entries
            .iter()
            .filter(|ts| now.duration_since(**ts) < MINUTE)
            .count() as u32;
        let verdict = if last_minute >= self.per_minute {
            Err(60)
        } else if entries.len() as u32 >= self.per_hour {
            Err(3600)
        } else {
            entries.push(now);
            Ok(())
        };

        if entries.is_empty() {
            self.windows.remove(client);
        }
        verdict
    }

    /// Drop every client whose window holds nothing from the last hour.
    fn evict_idle(&mut self, now: Instant) {
        let before = self.windows.len();
        self.windows.retain(|_, entries| {
            entries.retain(|ts| now.duration_since(*ts) < HOUR);
            !entries.is_empty()
        });
        let evicted = before - self.windows.len();
        if evicted > 0 {
            tracing::debug!(
                evicted,
                tracked = self.windows.len(),
                "Evicted idle rate-limit clients"
            );
        }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_limits(
            crate::config::DEFAULT_RATE_PER_MINUTE,
            crate::config::DEFAULT_RATE_PER_HOUR,
        )
    }
}
