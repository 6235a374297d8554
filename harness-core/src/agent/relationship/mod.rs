//! `relationship` owns the per-peer records of a controller and their readiness signals.
//!
//! A controller tracks at most one record per [`types::RelationshipKind`]. Each record
//! keeps the connection id reported by the agent and, while an attempt is in flight,
//! a [`ReadinessSignal`].
pub mod types;

mod signal;
pub use signal::ReadinessSignal;

mod relationship;
pub use relationship::Relationship;

mod registry;
pub use registry::Relationships;
