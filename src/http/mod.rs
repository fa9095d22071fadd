//! HTTP client module
//!
//! Thin wrapper over reqwest used for probing and downloading reports.
//!
//! # Features
//!
//! - **Basic Auth**: Report user credentials on every request
//! - **Rate Limiting**: Optional token bucket limiter using governor
//! - **Timeouts**: One client wide request timeout
//!
//! Status codes are returned to the caller untouched; deciding what a 404
//! means is the locator's job, not the client's.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
