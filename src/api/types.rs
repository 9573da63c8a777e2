//! Wire types for the backend answering service.
//!
//! The service has no formal schema; these mirror the JSON bodies it
//! actually produces. Unknown fields are ignored and every field is
//! optional-tolerant, matching how loosely the server is allowed to answer.

use serde::{Deserialize, Serialize};

// ============= Requests =============

/// Body for the ask endpoint.
#[derive(Debug, Serialize)]
pub struct AskRequest {
    /// The user's question, verbatim.
    pub query: String,
}

/// Body for the link-ingestion endpoint.
#[derive(Debug, Serialize)]
pub struct LinkRequest {
    /// URL of the page to ingest (Notion, Google Docs, Confluence, ...).
    pub link: String,
}

// ============= Responses =============

/// Response from the document-list endpoint.
#[derive(Debug, Deserialize)]
pub struct DocumentListResponse {
    /// Filenames of every indexed document, in server order.
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Response from the ask endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AskResponse {
    /// Answer text; absent when the service had nothing to say.
    pub answer: Option<String>,
}

/// Response shape shared by upload, link and delete endpoints.
///
/// Exactly one of `message`/`filename` or `error` is expected, but none is
/// required; `error` wins when present.
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    /// Human-readable confirmation.
    pub message: Option<String>,
    /// Filename assigned by the server (link-ingestion variant).
    pub filename: Option<String>,
    /// Failure description; its presence marks the call as failed.
    pub error: Option<String>,
}
