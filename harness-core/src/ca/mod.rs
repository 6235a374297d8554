//! `ca` wraps the `fabric-ca-client` tool.
//!
//! Only command construction and invocation live here, enrollment and registration
//! themselves are done by the tool.
pub mod types;

mod client;
pub use client::{FabricCaClient, ProcessRunner};
