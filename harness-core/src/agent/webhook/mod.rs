//! `webhook` turns agent notifications into readiness signal resolutions.
//!
//! Events arrive as `(topic, payload)`. The [`Dispatcher`] looks up the handler of the
//! topic, connection events are matched against the tracked relationships and terminal
//! labels settle the armed signal.
pub mod handlers;
pub mod types;

mod dispatcher;
pub use dispatcher::Dispatcher;
