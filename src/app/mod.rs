//! Application state machine and event loop.
//!
//! [`App`] holds all component state (documents, transcript, upload) and is
//! deliberately free of I/O: key events and API outcomes go in, optional
//! [`Command`]s come out. [`run`] owns the terminal, fans keyboard events, a
//! tick timer and API completions into one channel, and turns commands into
//! spawned [`ApiClient`] calls.

/// Events, outcomes and commands exchanged with the runtime.
pub mod event;
/// In-terminal file picker.
pub mod picker;

pub use event::{ApiOutcome, Command, Event};
pub use picker::FilePicker;

use crate::api::ApiClient;
use crate::config::Config;
use crate::types::{ChatMessage, Result};
use crossterm::event::{EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

// ============= Component State =============

/// Which panel owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Document list (left panel).
    Documents,
    /// Link input box (left panel).
    Link,
    /// Chat input and transcript (right panel).
    Chat,
    /// File picker overlay.
    Picker,
}

impl Pane {
    /// Next pane in the Tab cycle. The picker is reached with `o`, not Tab.
    fn next(self) -> Self {
        match self {
            Pane::Documents => Pane::Link,
            Pane::Link => Pane::Chat,
            Pane::Chat => Pane::Documents,
            Pane::Picker => Pane::Picker,
        }
    }
}

/// Lifecycle of a single upload.
///
/// `Idle -> Selected -> InFlight(0..=100) -> Idle` on success or error; a
/// failed transfer discards the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// No file chosen.
    Idle,
    /// A file is chosen but not yet submitted. Choosing another file
    /// replaces it.
    Selected(PathBuf),
    /// The transfer is running.
    InFlight {
        /// Percent of bytes handed to the transport, in 0..=100.
        progress: u8,
    },
}

impl UploadState {
    /// Current progress percentage; 0 whenever no upload is in flight.
    pub fn progress(&self) -> u8 {
        match self {
            UploadState::InFlight { progress } => *progress,
            _ => 0,
        }
    }
}

/// Status-line message shown in the footer.
#[derive(Debug, Clone)]
pub struct Status {
    /// Message text.
    pub text: String,
    /// Whether to render it as an error.
    pub error: bool,
}

/// Spinner frames shown while a question is in flight.
pub const THROBBER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

// ============= App =============

/// All component-local state for the single screen.
#[derive(Debug)]
pub struct App {
    /// Server-confirmed document list, in server order.
    pub documents: Vec<String>,
    /// Highlighted row in the document list.
    pub doc_cursor: usize,
    /// Append-only chat transcript.
    pub transcript: Vec<ChatMessage>,
    /// Chat input buffer.
    pub chat_input: String,
    /// Link input buffer.
    pub link_input: String,
    /// Upload state machine.
    pub upload: UploadState,
    /// Panel that owns keyboard input.
    pub focus: Pane,
    /// Document awaiting delete confirmation, if any.
    pub confirm_delete: Option<String>,
    /// Footer status message.
    pub status: Option<Status>,
    /// File picker state; kept across opens so the directory is remembered.
    pub picker: Option<FilePicker>,
    /// Whether an ask call is in flight (drives the spinner).
    pub waiting_answer: bool,
    /// Current spinner frame index.
    pub throbber_frame: usize,
    /// How many lines the user has scrolled up from the transcript bottom.
    pub chat_scrollback: u16,
    /// Cleared to stop the event loop.
    pub running: bool,
    /// Server base URL, shown in the header.
    pub server_label: String,

    // Stale-response guard for list refreshes: each fetch is stamped with
    // the next generation and responses older than the last applied one are
    // dropped.
    list_generation: u64,
    applied_generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Fresh state: empty transcript, empty document list, chat focused.
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            doc_cursor: 0,
            transcript: Vec::new(),
            chat_input: String::new(),
            link_input: String::new(),
            upload: UploadState::Idle,
            focus: Pane::Chat,
            confirm_delete: None,
            status: None,
            picker: None,
            waiting_answer: false,
            throbber_frame: 0,
            chat_scrollback: 0,
            running: true,
            server_label: String::new(),
            list_generation: 0,
            applied_generation: 0,
        }
    }

    /// Build the next document-list refresh command.
    pub fn refresh_command(&mut self) -> Command {
        self.list_generation += 1;
        Command::FetchDocuments {
            generation: self.list_generation,
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: true,
        });
    }

    // ============= Key Handling =============

    /// Handle one key press, returning a backend command when the action
    /// needs one.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return None;
        }

        if self.confirm_delete.is_some() {
            return self.on_confirm_key(key);
        }
        if self.focus == Pane::Picker {
            return self.on_picker_key(key);
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return None;
        }

        match self.focus {
            Pane::Documents => self.on_documents_key(key),
            Pane::Link => self.on_link_key(key),
            Pane::Chat => self.on_chat_key(key),
            Pane::Picker => None,
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let name = self.confirm_delete.take()?;
                self.set_status(format!("Deleting {}...", name));
                Some(Command::DeleteDocument { name })
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_delete = None;
                None
            }
            _ => None,
        }
    }

    fn on_documents_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Up => {
                self.doc_cursor = self.doc_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.doc_cursor + 1 < self.documents.len() {
                    self.doc_cursor += 1;
                }
                None
            }
            KeyCode::Char('r') => Some(self.refresh_command()),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(name) = self.documents.get(self.doc_cursor) {
                    self.confirm_delete = Some(name.clone());
                }
                None
            }
            KeyCode::Char('o') => {
                if self.picker.is_none() {
                    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                    match FilePicker::new(cwd) {
                        Ok(picker) => self.picker = Some(picker),
                        Err(e) => {
                            self.set_error(format!("Cannot open file picker: {}", e));
                            return None;
                        }
                    }
                }
                self.focus = Pane::Picker;
                None
            }
            KeyCode::Char('u') => self.start_upload(),
            KeyCode::Char('q') => {
                self.running = false;
                None
            }
            _ => None,
        }
    }

    fn start_upload(&mut self) -> Option<Command> {
        match &self.upload {
            UploadState::Selected(path) => {
                let path = path.clone();
                self.set_status(format!("Uploading {}...", file_label(&path)));
                self.upload = UploadState::InFlight { progress: 0 };
                Some(Command::UploadFile { path })
            }
            UploadState::InFlight { .. } => {
                self.set_error("An upload is already in progress");
                None
            }
            UploadState::Idle => {
                self.set_error("No file selected - press o to browse");
                None
            }
        }
    }

    fn on_picker_key(&mut self, key: KeyEvent) -> Option<Command> {
        let Some(picker) = self.picker.as_mut() else {
            self.focus = Pane::Documents;
            return None;
        };
        match key.code {
            KeyCode::Up => picker.move_up(),
            KeyCode::Down => picker.move_down(),
            KeyCode::Enter => match picker.enter() {
                Ok(Some(path)) => {
                    self.set_status(format!(
                        "Selected {} - press u to upload",
                        file_label(&path)
                    ));
                    // Selecting a new file replaces any previous selection.
                    self.upload = UploadState::Selected(path);
                    self.focus = Pane::Documents;
                }
                Ok(None) => {}
                Err(e) => self.set_error(format!("File picker: {}", e)),
            },
            KeyCode::Backspace => {
                if let Err(e) = picker.ascend() {
                    self.set_error(format!("File picker: {}", e));
                }
            }
            KeyCode::Esc => self.focus = Pane::Documents,
            _ => {}
        }
        None
    }

    fn on_link_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char(c) => {
                self.link_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.link_input.pop();
                None
            }
            KeyCode::Enter => {
                let url = self.link_input.trim().to_string();
                if url.is_empty() {
                    self.set_error("Paste a link first");
                    return None;
                }
                self.set_status("Submitting link...");
                Some(Command::UploadLink { url })
            }
            _ => None,
        }
    }

    fn on_chat_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char(c) => {
                self.chat_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
                None
            }
            KeyCode::PageUp => {
                self.chat_scrollback = self.chat_scrollback.saturating_add(5);
                None
            }
            KeyCode::PageDown => {
                self.chat_scrollback = self.chat_scrollback.saturating_sub(5);
                None
            }
            KeyCode::Enter => {
                let question = self.chat_input.trim().to_string();
                if question.is_empty() {
                    return None;
                }
                // Optimistic append: the user turn shows up immediately,
                // the assistant turn arrives with the outcome.
                self.transcript.push(ChatMessage::user(question.clone()));
                self.chat_input.clear();
                self.chat_scrollback = 0;
                self.waiting_answer = true;
                Some(Command::Ask { question })
            }
            _ => None,
        }
    }

    // ============= Outcome Handling =============

    /// Apply a settled API call, returning a follow-up command when the
    /// mutation warrants a list refresh.
    pub fn apply(&mut self, outcome: ApiOutcome) -> Option<Command> {
        match outcome {
            ApiOutcome::Documents { generation, result } => {
                match result {
                    Ok(docs) => {
                        if generation < self.applied_generation {
                            tracing::debug!(generation, "discarding stale document list");
                        } else {
                            self.applied_generation = generation;
                            self.documents = docs;
                            if self.doc_cursor >= self.documents.len() {
                                self.doc_cursor = self.documents.len().saturating_sub(1);
                            }
                        }
                    }
                    Err(e) => self.set_error(format!("Failed to fetch documents: {}", e)),
                }
                None
            }
            ApiOutcome::Answer { result } => {
                self.waiting_answer = false;
                let text = match result {
                    Ok(Some(answer)) => answer,
                    Ok(None) => "No response.".to_string(),
                    Err(e) => {
                        tracing::warn!(error = %e, "ask request failed");
                        "Error talking to AI.".to_string()
                    }
                };
                self.transcript.push(ChatMessage::assistant(text));
                self.chat_scrollback = 0;
                None
            }
            ApiOutcome::Uploaded { result } => {
                // Either way the transfer has settled: selection discarded,
                // progress back to 0.
                self.upload = UploadState::Idle;
                match result {
                    Ok(message) => {
                        self.set_status(message);
                        Some(self.refresh_command())
                    }
                    Err(e) => {
                        self.set_error(format!("Upload failed: {}", e));
                        None
                    }
                }
            }
            ApiOutcome::LinkAdded { result } => match result {
                Ok(message) => {
                    self.link_input.clear();
                    self.set_status(message);
                    Some(self.refresh_command())
                }
                Err(e) => {
                    self.set_error(format!("Link upload failed: {}", e));
                    None
                }
            },
            ApiOutcome::Deleted { name, result } => match result {
                Ok(message) => {
                    self.set_status(message);
                    Some(self.refresh_command())
                }
                Err(e) => {
                    // List left as-is; the refetch after a later mutation
                    // will reconcile.
                    self.set_error(format!("Failed to delete {}: {}", name, e));
                    None
                }
            },
            ApiOutcome::Progress(percent) => {
                if let UploadState::InFlight { progress } = &mut self.upload {
                    *progress = percent.min(100);
                }
                None
            }
        }
    }

    /// Advance animations on the UI tick.
    pub fn on_tick(&mut self) {
        if self.waiting_answer || matches!(self.upload, UploadState::InFlight { .. }) {
            self.throbber_frame = (self.throbber_frame + 1) % THROBBER_FRAMES.len();
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============= Runtime =============

/// Run the TUI against the configured server until the user quits.
pub async fn run(config: Config) -> Result<()> {
    let api = Arc::new(ApiClient::new(&config)?);
    let mut app = App::new();
    app.server_label = config.server.base_url.clone();
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Keyboard listener.
    let key_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(event) = reader.next().await {
            match event {
                Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if key_tx.send(Event::Key(key)).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "keyboard event stream failed");
                    break;
                }
            }
        }
    });

    // Tick timer.
    let tick_tx = tx.clone();
    let tick = Duration::from_millis(config.ui.tick_ms.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            if tick_tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });

    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Initial document fetch.
    dispatch(api.clone(), tx.clone(), app.refresh_command());

    let result = event_loop(&mut terminal, &mut app, &mut rx, api, tx).await;

    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<Event>,
    api: Arc<ApiClient>,
    tx: mpsc::Sender<Event>,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::draw(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        let command = match event {
            Event::Key(key) => app.on_key(key),
            Event::Tick => {
                app.on_tick();
                None
            }
            Event::Api(outcome) => app.apply(outcome),
        };
        if let Some(command) = command {
            dispatch(api.clone(), tx.clone(), command);
        }
    }
    Ok(())
}

/// Perform `command` on a spawned task, feeding the outcome back as an event.
fn dispatch(api: Arc<ApiClient>, tx: mpsc::Sender<Event>, command: Command) {
    tokio::spawn(async move {
        let outcome = match command {
            Command::FetchDocuments { generation } => {
                let result = api.list_documents().await.map_err(|e| e.to_string());
                ApiOutcome::Documents { generation, result }
            }
            Command::Ask { question } => ApiOutcome::Answer {
                result: api.ask(&question).await.map_err(|e| e.to_string()),
            },
            Command::UploadFile { path } => {
                let (progress_tx, mut progress_rx) = watch::channel(0u8);

                // Forward watch updates into the event loop; the task ends
                // when the upload drops its sender.
                let progress_events = tx.clone();
                tokio::spawn(async move {
                    while progress_rx.changed().await.is_ok() {
                        let percent = *progress_rx.borrow();
                        if progress_events
                            .send(Event::Api(ApiOutcome::Progress(percent)))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                });

                let result = api
                    .upload_file(&path, progress_tx)
                    .await
                    .map_err(|e| e.to_string());
                ApiOutcome::Uploaded { result }
            }
            Command::UploadLink { url } => ApiOutcome::LinkAdded {
                result: api.upload_link(&url).await.map_err(|e| e.to_string()),
            },
            Command::DeleteDocument { name } => {
                let result = api
                    .delete_document(&name)
                    .await
                    .map_err(|e| e.to_string());
                ApiOutcome::Deleted { name, result }
            }
        };
        let _ = tx.send(Event::Api(outcome)).await;
    });
}
