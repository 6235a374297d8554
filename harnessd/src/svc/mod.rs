pub mod endorser;
pub mod logging;
pub mod mediation;
pub mod webhooks;

mod receiver;
