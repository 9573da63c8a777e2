//! UI rendering.
//!
//! One screen: document tools on the left (upload box, link input, document
//! list), the chat transcript and input bar on the right, a status footer,
//! and two overlays (file picker, delete confirmation).

use crate::app::{App, Pane, UploadState, THROBBER_FRAMES};
use crate::types::Sender;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

/// Draw the whole screen.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // status footer
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(chunks[1]);

    draw_left_panel(f, body[0], app);
    draw_chat_panel(f, body[1], app);
    draw_footer(f, chunks[2], app);

    if app.focus == Pane::Picker {
        draw_picker(f, app);
    }
    if app.confirm_delete.is_some() {
        draw_confirm(f, app);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            "askdocs",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(&app.server_label, Style::default().fg(Color::Green)),
    ]);
    let header = Paragraph::new(title)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn draw_left_panel(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // upload box
            Constraint::Length(3), // link input
            Constraint::Min(0),    // document list
        ])
        .split(area);

    draw_upload_box(f, chunks[0], app);
    draw_link_input(f, chunks[1], app);
    draw_document_list(f, chunks[2], app);
}

fn draw_upload_box(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title("Upload")
        .borders(Borders::ALL)
        .border_style(focus_style(app.focus == Pane::Documents));

    match &app.upload {
        UploadState::InFlight { progress } => {
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(Color::Green))
                .percent(u16::from(*progress).min(100));
            f.render_widget(gauge, area);
        }
        UploadState::Selected(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let text = vec![
                Line::from(Span::styled(name, Style::default().fg(Color::White))),
                Line::from(Span::styled(
                    "press u to upload",
                    Style::default().fg(Color::Gray),
                )),
            ];
            f.render_widget(Paragraph::new(text).block(block), area);
        }
        UploadState::Idle => {
            let text = vec![
                Line::from(Span::styled(
                    "No file chosen",
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    "press o to browse",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(text).block(block), area);
        }
    }
}

fn draw_link_input(f: &mut Frame, area: Rect, app: &App) {
    let content = if app.link_input.is_empty() && app.focus != Pane::Link {
        Span::styled(
            "Paste a Notion/Google Docs/Confluence link",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.link_input.as_str())
    };
    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title("Add Link")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Pane::Link)),
    );
    f.render_widget(input, area);
}

fn draw_document_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .documents
        .iter()
        .map(|doc| ListItem::new(doc.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Indexed Documents")
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Pane::Documents)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.documents.is_empty() {
        state.select(Some(app.doc_cursor.min(app.documents.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_chat_panel(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    draw_transcript(f, chunks[0], app);

    let content = if app.chat_input.is_empty() && app.focus != Pane::Chat {
        Span::styled("Ask something...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.chat_input.as_str())
    };
    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title("Question")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Pane::Chat)),
    );
    f.render_widget(input, chunks[1]);
}

fn draw_transcript(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.transcript.len() + 1);
    for message in &app.transcript {
        let (label, style) = match message.sender {
            Sender::User => (
                "You: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Sender::Assistant => (
                "AI: ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(vec![
            Span::styled(label, style),
            Span::raw(message.text.as_str()),
        ]));
    }
    if app.waiting_answer {
        let frame = THROBBER_FRAMES[app.throbber_frame % THROBBER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("AI: {} thinking...", frame),
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Follow the newest message unless the user has scrolled up.
    let inner_height = area.height.saturating_sub(2);
    let total = lines.len() as u16;
    let offset = total
        .saturating_sub(inner_height)
        .saturating_sub(app.chat_scrollback);

    let transcript = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Chat")
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Pane::Chat)),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(transcript, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => {
            let style = if status.error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(status.text.as_str(), style))
        }
        None => Line::from(Span::styled(
            "Tab: switch panel | Enter: send/submit | o: browse, u: upload, d: delete, r: refresh (documents) | Ctrl+C: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_picker(f: &mut Frame, app: &App) {
    let Some(picker) = &app.picker else {
        return;
    };
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name))
                    .style(Style::default().fg(Color::Blue))
            } else {
                ListItem::new(entry.name.clone())
            }
        })
        .collect();

    let title = format!(" {} ", picker.cwd.display());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .title_bottom(" Enter: select | Backspace: up | Esc: cancel ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !picker.entries.is_empty() {
        state.select(Some(picker.cursor.min(picker.entries.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_confirm(f: &mut Frame, app: &App) {
    let Some(name) = &app.confirm_delete else {
        return;
    };
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::raw(format!("Delete \"{}\"?", name))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": delete    "),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": cancel"),
        ]),
    ];
    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(dialog, area);
}

/// Centered sub-rectangle taking `percent_x`/`percent_y` of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
