//! Events consumed by the UI loop and commands it issues.
//!
//! The `App` state machine is pure: key events and API outcomes go in,
//! optional [`Command`]s come out. The runtime in `app` turns commands into
//! spawned API calls and feeds their outcomes back as [`Event::Api`].

use crossterm::event::KeyEvent;
use std::path::PathBuf;

/// Everything that can wake the UI loop.
#[derive(Debug)]
pub enum Event {
    /// Key press from the terminal.
    Key(KeyEvent),
    /// Periodic refresh tick (drives the spinner).
    Tick,
    /// A spawned API call settled, or reported upload progress.
    Api(ApiOutcome),
}

/// Result of a backend call, carried across the task boundary.
///
/// Errors are pre-rendered to strings here; the app only ever displays them.
#[derive(Debug)]
pub enum ApiOutcome {
    /// A document-list fetch settled.
    Documents {
        /// Generation stamped on the request when it was issued. Responses
        /// older than the newest applied generation are discarded.
        generation: u64,
        /// Server's document sequence, or the rendered error.
        result: Result<Vec<String>, String>,
    },
    /// An ask call settled. `Ok(None)` means the server gave no answer text.
    Answer {
        /// Answer text, or the rendered error.
        result: Result<Option<String>, String>,
    },
    /// A file upload settled.
    Uploaded {
        /// Server confirmation message, or the rendered error.
        result: Result<String, String>,
    },
    /// A link submission settled.
    LinkAdded {
        /// Server confirmation message, or the rendered error.
        result: Result<String, String>,
    },
    /// A delete call settled.
    Deleted {
        /// The document the delete targeted.
        name: String,
        /// Server confirmation message, or the rendered error.
        result: Result<String, String>,
    },
    /// Upload progress update in 0..=100.
    Progress(u8),
}

/// A backend call the app wants the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Refetch the document list.
    FetchDocuments {
        /// Generation stamped on this request for stale-response guarding.
        generation: u64,
    },
    /// Ask a question.
    Ask {
        /// The question text, already appended to the transcript.
        question: String,
    },
    /// Upload the selected file.
    UploadFile {
        /// Path of the file to upload.
        path: PathBuf,
    },
    /// Submit a link for ingestion.
    UploadLink {
        /// The pasted URL.
        url: String,
    },
    /// Delete a document (confirmation already given).
    DeleteDocument {
        /// Filename to delete.
        name: String,
    },
}
