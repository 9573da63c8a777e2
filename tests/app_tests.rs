//! State-machine tests for the App: transcript, delete confirmation,
//! upload lifecycle and stale-refresh guarding.

use askdocs::app::{ApiOutcome, App, Command, Pane, UploadState};
use askdocs::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(app.on_key(key(KeyCode::Char(c))).is_none());
    }
}

fn fetch_generation(command: &Command) -> u64 {
    match command {
        Command::FetchDocuments { generation } => *generation,
        other => panic!("expected FetchDocuments, got {:?}", other),
    }
}

// ============= chat =============

#[test]
fn ask_appends_user_immediately_then_one_assistant_turn() {
    let mut app = App::new();
    assert_eq!(app.focus, Pane::Chat);

    type_text(&mut app, "What is the refund policy?");
    let command = app.on_key(key(KeyCode::Enter)).expect("ask issued");
    assert_eq!(
        command,
        Command::Ask {
            question: "What is the refund policy?".to_string()
        }
    );
    assert_eq!(app.transcript.len(), 1);
    assert_eq!(app.transcript[0].sender, Sender::User);
    assert_eq!(app.transcript[0].text, "What is the refund policy?");
    assert!(app.chat_input.is_empty());
    assert!(app.waiting_answer);

    let follow_up = app.apply(ApiOutcome::Answer {
        result: Ok(Some("30 days".to_string())),
    });
    assert!(follow_up.is_none());
    assert_eq!(app.transcript.len(), 2);
    assert_eq!(app.transcript[1].sender, Sender::Assistant);
    assert_eq!(app.transcript[1].text, "30 days");
    assert!(!app.waiting_answer);
}

#[test]
fn ask_failure_degrades_to_inline_error_message() {
    let mut app = App::new();
    type_text(&mut app, "hello?");
    app.on_key(key(KeyCode::Enter)).unwrap();

    app.apply(ApiOutcome::Answer {
        result: Err("connection refused".to_string()),
    });
    assert_eq!(app.transcript.len(), 2);
    assert_eq!(app.transcript[1].text, "Error talking to AI.");
}

#[test]
fn empty_answer_becomes_no_response() {
    let mut app = App::new();
    type_text(&mut app, "anything");
    app.on_key(key(KeyCode::Enter)).unwrap();

    app.apply(ApiOutcome::Answer { result: Ok(None) });
    assert_eq!(app.transcript[1].text, "No response.");
}

#[test]
fn blank_question_is_not_sent() {
    let mut app = App::new();
    type_text(&mut app, "   ");
    assert!(app.on_key(key(KeyCode::Enter)).is_none());
    assert!(app.transcript.is_empty());
}

#[test]
fn rapid_repeated_sends_each_get_a_turn() {
    let mut app = App::new();
    type_text(&mut app, "first");
    app.on_key(key(KeyCode::Enter)).unwrap();
    type_text(&mut app, "second");
    app.on_key(key(KeyCode::Enter)).unwrap();

    app.apply(ApiOutcome::Answer {
        result: Ok(Some("a1".to_string())),
    });
    app.apply(ApiOutcome::Answer {
        result: Ok(Some("a2".to_string())),
    });

    let texts: Vec<_> = app.transcript.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "a1", "a2"]);
}

// ============= delete =============

#[test]
fn delete_requires_confirmation() {
    let mut app = App::new();
    app.focus = Pane::Documents;
    app.documents = vec!["policy.pdf".to_string(), "faq.md".to_string()];

    assert!(app.on_key(key(KeyCode::Char('d'))).is_none());
    assert_eq!(app.confirm_delete.as_deref(), Some("policy.pdf"));

    // Declining leaves everything untouched.
    assert!(app.on_key(key(KeyCode::Char('n'))).is_none());
    assert!(app.confirm_delete.is_none());
    assert_eq!(app.documents.len(), 2);

    // Confirming issues the delete.
    app.on_key(key(KeyCode::Char('d')));
    let command = app.on_key(key(KeyCode::Char('y'))).expect("delete issued");
    assert_eq!(
        command,
        Command::DeleteDocument {
            name: "policy.pdf".to_string()
        }
    );
}

#[test]
fn failed_delete_leaves_list_unchanged() {
    let mut app = App::new();
    app.documents = vec!["policy.pdf".to_string()];

    let follow_up = app.apply(ApiOutcome::Deleted {
        name: "policy.pdf".to_string(),
        result: Err("backend down".to_string()),
    });
    assert!(follow_up.is_none());
    assert_eq!(app.documents, vec!["policy.pdf"]);
    assert!(app.status.as_ref().unwrap().error);
}

#[test]
fn successful_delete_triggers_refetch_and_mirror() {
    let mut app = App::new();
    app.documents = vec!["policy.pdf".to_string(), "faq.md".to_string()];
    app.doc_cursor = 1;

    let refetch = app
        .apply(ApiOutcome::Deleted {
            name: "policy.pdf".to_string(),
            result: Ok("deleted".to_string()),
        })
        .expect("refetch scheduled");
    let generation = fetch_generation(&refetch);

    app.apply(ApiOutcome::Documents {
        generation,
        result: Ok(vec!["faq.md".to_string()]),
    });
    assert_eq!(app.documents, vec!["faq.md"]);
    assert_eq!(app.doc_cursor, 0);
}

// ============= document list =============

#[test]
fn refresh_mirrors_server_sequence_exactly() {
    let mut app = App::new();
    app.focus = Pane::Documents;
    // A local-only entry must not survive a refetch.
    app.documents = vec!["local-ghost.pdf".to_string()];

    let command = app.on_key(key(KeyCode::Char('r'))).expect("refresh issued");
    let generation = fetch_generation(&command);
    app.apply(ApiOutcome::Documents {
        generation,
        result: Ok(vec!["a.pdf".to_string(), "b.pdf".to_string()]),
    });

    assert_eq!(app.documents, vec!["a.pdf", "b.pdf"]);
}

#[test]
fn stale_refresh_response_is_discarded() {
    let mut app = App::new();
    app.focus = Pane::Documents;

    let first = fetch_generation(&app.on_key(key(KeyCode::Char('r'))).unwrap());
    let second = fetch_generation(&app.on_key(key(KeyCode::Char('r'))).unwrap());
    assert!(second > first);

    app.apply(ApiOutcome::Documents {
        generation: second,
        result: Ok(vec!["new.pdf".to_string()]),
    });
    app.apply(ApiOutcome::Documents {
        generation: first,
        result: Ok(vec!["old.pdf".to_string()]),
    });

    assert_eq!(app.documents, vec!["new.pdf"]);
}

#[test]
fn failed_refresh_keeps_current_list() {
    let mut app = App::new();
    app.focus = Pane::Documents;
    app.documents = vec!["keep.pdf".to_string()];

    let generation = fetch_generation(&app.on_key(key(KeyCode::Char('r'))).unwrap());
    app.apply(ApiOutcome::Documents {
        generation,
        result: Err("timeout".to_string()),
    });

    assert_eq!(app.documents, vec!["keep.pdf"]);
    assert!(app.status.as_ref().unwrap().error);
}

// ============= upload =============

#[test]
fn upload_lifecycle_success() {
    let mut app = App::new();
    app.focus = Pane::Documents;
    app.upload = UploadState::Selected(PathBuf::from("/tmp/policy.pdf"));

    let command = app.on_key(key(KeyCode::Char('u'))).expect("upload issued");
    assert_eq!(
        command,
        Command::UploadFile {
            path: PathBuf::from("/tmp/policy.pdf")
        }
    );
    assert_eq!(app.upload, UploadState::InFlight { progress: 0 });

    app.apply(ApiOutcome::Progress(55));
    assert_eq!(app.upload.progress(), 55);
    app.apply(ApiOutcome::Progress(200));
    assert_eq!(app.upload.progress(), 100);

    let refetch = app
        .apply(ApiOutcome::Uploaded {
            result: Ok("indexed policy.pdf".to_string()),
        })
        .expect("refetch scheduled");
    let generation = fetch_generation(&refetch);

    // Selection cleared, progress reset.
    assert_eq!(app.upload, UploadState::Idle);
    assert_eq!(app.upload.progress(), 0);

    app.apply(ApiOutcome::Documents {
        generation,
        result: Ok(vec!["policy.pdf".to_string()]),
    });
    assert_eq!(app.documents, vec!["policy.pdf"]);
}

#[test]
fn failed_upload_returns_to_idle_and_discards_selection() {
    let mut app = App::new();
    app.focus = Pane::Documents;
    app.upload = UploadState::Selected(PathBuf::from("/tmp/broken.bin"));
    app.on_key(key(KeyCode::Char('u'))).unwrap();

    let follow_up = app.apply(ApiOutcome::Uploaded {
        result: Err("unsupported file type".to_string()),
    });
    assert!(follow_up.is_none());
    assert_eq!(app.upload, UploadState::Idle);
    assert_eq!(app.upload.progress(), 0);
    assert!(app.status.as_ref().unwrap().error);
}

#[test]
fn upload_without_selection_is_refused() {
    let mut app = App::new();
    app.focus = Pane::Documents;

    assert!(app.on_key(key(KeyCode::Char('u'))).is_none());
    assert_eq!(app.upload, UploadState::Idle);
    assert!(app.status.as_ref().unwrap().error);
}

#[test]
fn progress_updates_are_ignored_when_not_in_flight() {
    let mut app = App::new();
    app.apply(ApiOutcome::Progress(80));
    assert_eq!(app.upload, UploadState::Idle);
    assert_eq!(app.upload.progress(), 0);
}

// ============= focus & quit =============

#[test]
fn tab_cycles_panels() {
    let mut app = App::new();
    assert_eq!(app.focus, Pane::Chat);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Pane::Documents);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Pane::Link);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Pane::Chat);
}

#[test]
fn ctrl_c_stops_the_app_from_any_pane() {
    let mut app = App::new();
    app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!app.running);
}

#[test]
fn link_submit_clears_input_only_after_success() {
    let mut app = App::new();
    app.focus = Pane::Link;
    type_text(&mut app, "https://notion.so/page");

    let command = app.on_key(key(KeyCode::Enter)).expect("link issued");
    assert_eq!(
        command,
        Command::UploadLink {
            url: "https://notion.so/page".to_string()
        }
    );
    // Input survives until the backend confirms.
    assert_eq!(app.link_input, "https://notion.so/page");

    app.apply(ApiOutcome::LinkAdded {
        result: Err("fetch failed".to_string()),
    });
    assert_eq!(app.link_input, "https://notion.so/page");

    let refetch = app.apply(ApiOutcome::LinkAdded {
        result: Ok("page.html".to_string()),
    });
    assert!(refetch.is_some());
    assert!(app.link_input.is_empty());
}
