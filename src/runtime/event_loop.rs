use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::library::scan_roots;
use crate::runtime::session_roots;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: handles input per mode (browse, filter, edit)
/// and redraws the UI. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    cli_root: Option<&Path>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new();

    loop {
        app.tick(Instant::now());

        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui, &settings.library))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, cli_root, app, &mut state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn toast_ttl(settings: &config::Settings) -> Duration {
    Duration::from_millis(settings.ui.toast_ms)
}

/// Rescan the session roots and atomically swap in the fresh collection.
fn rescan(settings: &config::Settings, cli_root: Option<&Path>, app: &mut App) {
    let roots = session_roots(cli_root, &settings.library);
    let tracks = scan_roots(&roots, &settings.library);
    let count = tracks.len();
    app.set_tracks(tracks);
    app.show_toast(format!("Rescanned: {count} tracks"), toast_ttl(settings));
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    cli_root: Option<&Path>,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.editor.is_some() {
        handle_editor_key(key, settings, app);
        return Ok(false);
    }

    if app.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                app.clear_filter();
            }
            KeyCode::Backspace => {
                app.pop_filter_char();
            }
            KeyCode::Char('j') | KeyCode::Char('n')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.next();
            }
            KeyCode::Char('k') | KeyCode::Char('p')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.prev();
            }
            KeyCode::Down => {
                app.next();
            }
            KeyCode::Up => {
                app.prev();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_filter_char(c);
                }
            }
            KeyCode::Enter => {
                // Leave filter mode but keep the query narrowing the list.
                app.exit_filter_mode();
            }
            _ => {}
        }

        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return Ok(true);
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_filter_mode();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            rescan(settings, cli_root, app);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                let display = app.display_indices();
                if let Some(&first) = display.first() {
                    app.set_selected(first);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            let display = app.display_indices();
            if let Some(&last) = display.last() {
                app.set_selected(last);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if app.has_tracks() {
                app.open_editor();
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

fn handle_editor_key(key: KeyEvent, settings: &config::Settings, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.close_editor();
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(editor) = app.editor.as_mut() {
                editor.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(editor) = app.editor.as_mut() {
                editor.prev_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = app.editor.as_mut() {
                editor.pop_char();
            }
        }
        KeyCode::Enter => match app.save_editor() {
            Some(Ok(())) => {
                app.close_editor();
                app.show_toast("Saved", toast_ttl(settings));
            }
            Some(Err(e)) => {
                // Keep the editor open so the edits are not lost.
                app.show_toast(format!("Save failed: {e}"), toast_ttl(settings));
            }
            None => {}
        },
        KeyCode::Char(c) => {
            if !c.is_control() {
                if let Some(editor) = app.editor.as_mut() {
                    editor.push_char(c);
                }
            }
        }
        _ => {}
    }
}
