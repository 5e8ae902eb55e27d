// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # restscout
//!
//! Automatic endpoint discovery for REST APIs.
//!
//! Given a base URL and optional credentials, restscout determines what
//! collection endpoints an unfamiliar API exposes, what fields they return,
//! and how they paginate, without a human writing an endpoint
//! configuration by hand. It works against APIs with a machine-readable
//! contract (OpenAPI 3.x or Swagger 2.0), with a contract that disagrees
//! with the live responses, or with no contract at all.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restscout::{discover_api, StringMap};
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = discover_api(
//!         "https://api.example.com",
//!         StringMap::new(), // auth headers
//!         StringMap::new(), // auth query params
//!         2.0,              // requests per second
//!     )
//!     .await;
//!
//!     for endpoint in &result.endpoints {
//!         println!("{} {} ({} fields)", endpoint.method, endpoint.path, endpoint.fields.len());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DiscoveryEngine                         │
//! │   discover() → DiscoveryResult (endpoints + pagination)      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴─────────────┬─────────────────┐
//! │ SpecLocator  │        SpecParser          │  ResponseProber │
//! ├──────────────┼────────────────────────────┼─────────────────┤
//! │ well-known   │ OpenAPI 3.x / Swagger 2.0  │ heuristic GETs  │
//! │ spec paths   │ $ref resolution            │ schema inference│
//! │ JSON + YAML  │ pagination from params     │ pagination from │
//! │              │                            │ live responses  │
//! └──────────────┴────────────────────────────┴─────────────────┘
//! ```
//!
//! The three stages form a strict fallback chain: a parsed spec is
//! authoritative and short-circuits probing; probing only runs when no
//! usable spec exists. Discovery never raises past the top-level call;
//! every failure is folded into the result's error list.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document the individual error enum variants

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with rate limiting
pub mod http;

/// Schema inference from live JSON responses
pub mod schema;

/// OpenAPI/Swagger document location, resolution, and parsing
pub mod spec;

/// Pagination detection
pub mod pagination;

/// Heuristic endpoint probing
pub mod probe;

/// Discovery orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use engine::{discover_api, DiscoveryEngine, DiscoveryResult, DiscoveryStrategy};
pub use pagination::{detect_pagination, DiscoveredPagination, PaginationType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
