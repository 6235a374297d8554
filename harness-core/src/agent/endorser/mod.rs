//! `endorser` prepares an endorser agent: a multi-use invitation for transaction
//! authors and the role assignment run once an author connection becomes active.
pub mod types;

mod usecase;
pub use usecase::{EndorserRoleHook, EndorserSetup};
