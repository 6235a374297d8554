//! `schema` publishes schemas and credential definitions for an issuer agent.
pub mod types;

mod publisher;
pub use publisher::SchemaPublisher;
