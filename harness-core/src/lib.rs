//! `identity-harness-core` provides the controller side logic used to drive external
//! identity agents through their admin API.
//!
//! The external agent owns every protocol state machine. This crate only owns the
//! discipline around it:
//!
//! - `agent`, arming readiness signals, sending admin requests, routing webhook events
//!   back to suspended waiters and polling mediation grants
//! - `ca`, building and running `fabric-ca-client` commands
pub mod agent;
pub mod ca;
