//! `mediation` waits for a mediator to grant a wallet's mediation request.
//!
//! The grant is not signalled through a webhook the controller can rely on, so it is
//! observed by polling the wallet's mediation record with a bounded attempt budget.
pub mod types;

mod poller;
mod usecase;

pub use poller::GrantPoller;
pub use usecase::MediationSetup;
