mod server;
pub use server::{parse_topic_path, WebhookServer};
