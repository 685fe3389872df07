//! Typed HTTP client for the Rookery REST API.
//!
//! Read requests retry with exponential backoff on server and transport
//! failures; client errors (4xx) are returned immediately. Writes are sent
//! exactly once.

pub mod api;
pub mod error;
pub mod retry;

pub use api::{ApiClient, ImageAttachment};
pub use error::ClientError;
pub use retry::RetryConfig;
