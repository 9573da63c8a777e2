//! # askdocs
//!
//! A terminal chat client for a document-ingestion and question-answering
//! service. The backend is an opaque HTTP API that indexes uploaded files
//! and pasted links and answers questions about them; this crate is the
//! view layer plus a thin client over that API.
//!
//! ## Overview
//!
//! One screen, two panels:
//!
//! - **Documents** (left): upload a file through an in-terminal file picker,
//!   submit a link, and manage the list of indexed documents.
//! - **Chat** (right): an append-only transcript of user/assistant turns
//!   with an input bar.
//!
//! ## Quick Start
//!
//! ```text
//! askdocs init     # scaffold askdocs.toml
//! askdocs          # start the TUI
//! ```
//!
//! ## Architecture
//!
//! The [`app::App`] state machine is free of I/O: key events and API
//! outcomes go in, [`app::Command`]s come out. The runtime in [`app::run`]
//! fans keyboard input, a tick timer and completed API calls into a single
//! event channel and performs commands on spawned tasks via
//! [`api::ApiClient`]. Document-list refreshes carry a generation token so a
//! stale response can never overwrite newer state.
//!
//! ## Modules
//!
//! - [`api`] - HTTP client adapter for the backend endpoints
//! - [`app`] - application state machine, event loop, file picker
//! - [`cli`] - argument parsing and the init/config subcommands
//! - [`config`] - TOML configuration with an endpoint path table
//! - [`logging`] - rolling file logs (the terminal belongs to the UI)
//! - [`types`] - chat transcript types and error handling
//! - [`ui`] - ratatui rendering

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP client adapter for the backend answering service.
pub mod api;
/// Application state machine and event loop.
pub mod app;
/// Command-line interface.
pub mod cli;
/// TOML-based configuration.
pub mod config;
/// Rolling file logging setup.
pub mod logging;
/// Common types and error handling.
pub mod types;
/// Terminal UI rendering.
pub mod ui;

// Re-export commonly used types
pub use api::ApiClient;
pub use app::{App, Command, Event, UploadState};
pub use config::Config;
pub use types::{AppError, ChatMessage, Result, Sender};
