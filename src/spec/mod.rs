//! OpenAPI/Swagger document handling
//!
//! Locates a machine-readable API contract at well-known paths, resolves
//! `$ref` pointers inside it, and walks its path items into discovered
//! endpoints, fields, query parameters, and pagination signals.
//!
//! Both OpenAPI 3.x and Swagger 2.0 layouts are supported; the two place
//! response schemas and parameter types at different JSON paths.

mod locator;
mod parser;
mod refs;

pub use locator::{SpecLocator, WELL_KNOWN_SPEC_PATHS};
pub use parser::{ParsedSpec, SpecParser};
pub use refs::resolve_ref;

#[cfg(test)]
mod tests;
