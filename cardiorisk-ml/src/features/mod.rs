//! Feature schema and encoding.

pub mod encoder;
pub mod schema;

pub use encoder::{FeatureEncoder, encode};
pub use schema::{FEATURE_COUNT, FeatureColumn, FeatureVector, SCHEMA, check_schema, schema_names};
