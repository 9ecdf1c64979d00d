use std::path::PathBuf;

use crate::config::LibrarySettings;

/// Candidate root directories on this platform: the user's music folder,
/// downloads folder and home directory, in that order.
fn platform_roots() -> Vec<PathBuf> {
    [dirs::audio_dir(), dirs::download_dir(), dirs::home_dir()]
        .into_iter()
        .flatten()
        .collect()
}

/// Resolve the list of roots to scan.
///
/// Configured roots win when the user set any; otherwise the platform
/// defaults apply. Either way, only directories that currently exist are
/// returned, so a missing `~/Music` simply drops out of the list.
pub fn resolve_roots(settings: &LibrarySettings) -> Vec<PathBuf> {
    let candidates: Vec<PathBuf> = if settings.roots.is_empty() {
        platform_roots()
    } else {
        settings.roots.iter().map(PathBuf::from).collect()
    };

    candidates.into_iter().filter(|p| p.is_dir()).collect()
}
