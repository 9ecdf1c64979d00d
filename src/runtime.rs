//! Runtime: terminal setup/teardown and the main event loop.

use std::env;
use std::path::{Path, PathBuf};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::LibrarySettings;
use crate::library::{resolve_roots, scan_roots};

mod event_loop;
mod settings;

/// Roots for this session: the positional CLI argument wins over anything
/// configured, otherwise the configured/platform roots apply. Either way
/// only existing directories remain.
pub(crate) fn session_roots(cli_root: Option<&Path>, library: &LibrarySettings) -> Vec<PathBuf> {
    match cli_root {
        Some(root) if root.is_dir() => vec![root.to_path_buf()],
        Some(_) => Vec::new(),
        None => resolve_roots(library),
    }
}

fn roots_label(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        "(none)".to_string()
    } else {
        roots
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let cli_root = env::args().nth(1).map(PathBuf::from);
    let roots = session_roots(cli_root.as_deref(), &settings.library);

    let tracks = scan_roots(&roots, &settings.library);
    let mut app = App::new(tracks);
    app.set_roots_label(roots_label(&roots));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, cli_root.as_deref(), &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
