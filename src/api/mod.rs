//! HTTP client adapter for the backend answering service.

mod client;
mod progress;
/// Wire types for requests and responses.
pub mod types;

pub use client::ApiClient;
pub use progress::progress_body;
