//! `admin` holds the boundary contract with the agent admin API.
//!
//! Every other sub-domain talks to the agent only through [`types::AdminAPI`], so the
//! HTTP client lives in the adapter crate and tests can swap it with a mock.
pub mod response;
pub mod types;
