pub mod agents;
pub mod ca;
pub mod connections;
pub mod handler;
pub mod invitation;
pub mod mediation;
pub mod schema;
