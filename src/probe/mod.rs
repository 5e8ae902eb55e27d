//! Heuristic endpoint probing
//!
//! Fallback discovery stage used when no spec document exists: issue
//! GETs against the base URL and a fixed list of common collection
//! paths, and infer endpoints from whatever JSON comes back.

mod prober;

pub use prober::{ProbeOutcome, ResponseProber, PROBE_PATHS};
