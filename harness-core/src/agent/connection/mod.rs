//! `connection` creates or receives invitations through the admin API and pairs every
//! attempt with a fresh readiness signal on the relationship.
pub mod types;

mod initiator;
pub use initiator::{build_request, Initiator};
