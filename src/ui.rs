//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, EditorField, TagEditor};
use crate::config::{LibrarySettings, UiSettings};
use crate::library::display_from_fields;

const BROWSE_CONTROLS: &str =
    "[j/k] up/down | [gg/G] top/bottom | [enter] edit tags | [/] filter | [r] rescan | [q] quit";
const FILTER_CONTROLS: &str =
    "[type] narrow | [backspace] erase | [enter] keep filter | [esc] clear filter";
const EDIT_CONTROLS: &str = "[tab/shift-tab] switch field | [enter] save | [esc] cancel";

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn controls_text(app: &App) -> &'static str {
    if app.editor.is_some() {
        EDIT_CONTROLS
    } else if app.filter_mode {
        FILTER_CONTROLS
    } else {
        BROWSE_CONTROLS
    }
}

fn status_text(app: &App, display_len: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    if display_len == app.tracks.len() {
        parts.push(format!("Tracks: {}", app.tracks.len()));
    } else {
        parts.push(format!("Tracks: {}/{}", display_len, app.tracks.len()));
    }

    let q = app.filter_query.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("FILTER:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        if app.filter_mode {
            filter_part.push('▏');
        }
        parts.push(filter_part);
    }

    if let Some(roots) = &app.roots_label {
        parts.push(format!("Roots: {}", roots));
    }

    parts.join(" • ")
}

fn render_editor(frame: &mut Frame, editor: &TagEditor, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(60, 12, area);
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();

    let fields = [
        EditorField::Title,
        EditorField::Artist,
        EditorField::Album,
        EditorField::Year,
        EditorField::Genre,
    ];
    for field in fields {
        let active = field == editor.field;
        let label_style = if active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let value_style = if active {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        let cursor = if active { "▌" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}: ", field.label()), label_style),
            Span::styled(editor.value(field).to_string(), value_style),
            Span::raw(cursor),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(track) = app.tracks.get(editor.track_index) {
        let dim = Style::default().add_modifier(Modifier::DIM);
        lines.push(Line::from(Span::styled(
            format!("    File: {}", track.file_name),
            dim,
        )));
        let dur = track.duration_text();
        if !dur.is_empty() {
            lines.push(Line::from(Span::styled(format!("Duration: {}", dur), dim)));
        }
    }

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" edit tags ")
            .padding(Padding {
                left: 1,
                right: 1,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(popup, popup_area);
}

fn render_toast(frame: &mut Frame, message: &str, area: Rect) {
    let width = (message.chars().count() as u16).saturating_add(4);
    let toast_area = centered_rect_sized(width, 3, area);
    frame.render_widget(Clear, toast_area);

    let toast = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(toast, toast_area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    display: &[usize],
    ui_settings: &UiSettings,
    library_settings: &LibrarySettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tacet ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app, display.len()))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Main list
    {
        // Center the selected item when possible by creating a visible window.
        // Only build ListItems for the visible window (avoid allocating the entire list).
        let total = display.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                ListItem::new(display_from_fields(
                    &app.tracks[i],
                    &library_settings.display_fields,
                    &library_settings.display_separator,
                ))
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);

        if total == 0 {
            let hint = if app.tracks.is_empty() {
                "No music found.\nDrop files into your Music or Downloads folder and press r."
            } else {
                "No tracks match the filter."
            };
            let empty = Paragraph::new(hint)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            let hint_area = centered_rect_sized(64, 4, chunks[2]);
            frame.render_widget(empty, hint_area);
        }
    }

    // Overlay the tag editor (keeps list visible under it).
    if let Some(editor) = &app.editor {
        render_editor(frame, editor, app, chunks[2]);
    }

    // Toast goes on top of everything.
    if let Some(toast) = &app.toast {
        render_toast(frame, &toast.message, chunks[2]);
    }

    let footer = Paragraph::new(controls_text(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
