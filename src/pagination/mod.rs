//! Pagination detection module
//!
//! Classifies how an API paginates: cursor token, numeric offset, a
//! `Link` response header, or not at all.
//!
//! # Overview
//!
//! Detection works from a single observation: either the pooled query
//! parameter names of a spec document (see [`crate::spec`]) or one live
//! HTTP response ([`detect_pagination`]). Only *detection* lives here;
//! following pages is the consuming connector's job.

mod detector;
mod types;

pub use detector::{detect_pagination, parse_link_header, CURSOR_KEYS, DATA_WRAPPER_KEYS, HAS_MORE_KEYS};
pub use types::{DiscoveredPagination, PaginationType, DEFAULT_PAGE_SIZE};
