mod webhook;
pub use webhook::Webhook;

mod agent;
pub use agent::Agent;

mod mediation;
pub use mediation::{Ledger, Mediation};

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
