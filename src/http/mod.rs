//! HTTP client module
//!
//! Provides the single-shot GET client used by discovery.
//!
//! # Features
//!
//! - **Per-request timeout**: Every outbound call carries its own deadline
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Default headers/params**: Auth material injected into every request

mod client;
mod rate_limit;

pub use client::{join_url, FetchedResponse, HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
