mod client;
pub use client::AdminClient;
