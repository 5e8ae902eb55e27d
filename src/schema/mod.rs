//! Schema inference module
//!
//! Infers a field→type map from a sample of live JSON response objects.
//!
//! # Features
//!
//! - **Type Inference**: Maps runtime JSON values to the 4-value SQL type set
//! - **Sample Accumulation**: Merges fields across non-uniform sample rows
//! - **Nested Flattening**: Joins nested object keys with `_`
//! - **Asymmetric Promotion**: VARCHAR placeholders promote to concrete types,
//!   never the reverse

mod inference;

pub use inference::{infer_schema, SchemaInferencer};
