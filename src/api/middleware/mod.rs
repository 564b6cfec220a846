//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Panic guard (`tower_http::catch_panic`, installed by the router)
//! 2. Rate limiter — reject early, save resources
//! 3. Access logger — method, path, status, latency

pub mod audit;
pub mod rate;
