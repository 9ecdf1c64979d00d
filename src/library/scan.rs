use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Files in the root itself plus files in immediate child directories.
/// The walk never goes deeper; that keeps a scan of a large shared volume
/// bounded.
const SCAN_DEPTH: usize = 2;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Scan every root in order and collect the discovered tracks.
///
/// Output order is walk order. Roots are not deduplicated against each
/// other: a file reachable through two roots appears twice, matching the
/// scanner's long-standing behavior.
pub fn scan_roots(roots: &[PathBuf], settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();
    for root in roots {
        scan_root(root, settings, &mut tracks);
    }
    tracks
}

/// Scan a single root one level of subdirectories deep, appending to `out`.
/// Unreadable directories and entries are skipped silently and the walk
/// continues.
fn scan_root(root: &Path, settings: &LibrarySettings, out: &mut Vec<Track>) {
    for entry in WalkDir::new(root)
        .max_depth(SCAN_DEPTH)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(Track::load(path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.m4a"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.opus"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_root_includes_immediate_subdir_but_not_deeper() {
        let dir = tempdir().unwrap();
        let child = dir.path().join("child");
        let grandchild = child.join("grandchild");
        fs::create_dir_all(&grandchild).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(child.join("one.mp3"), b"not real").unwrap();
        fs::write(grandchild.join("two.mp3"), b"not real").unwrap();

        let settings = LibrarySettings::default();
        let tracks = scan_roots(&[dir.path().to_path_buf()], &settings);

        let names: Vec<&str> = tracks.iter().map(|t| t.file_name.as_str()).collect();
        assert!(names.contains(&"root.mp3"));
        assert!(names.contains(&"one.mp3"));
        assert!(!names.contains(&"two.mp3"));
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn scan_root_excludes_non_audio_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("note.txt"), b"ignore me").unwrap();

        let settings = LibrarySettings::default();
        let tracks = scan_roots(&[dir.path().to_path_buf()], &settings);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].file_name, "song.mp3");
    }

    #[test]
    fn overlapping_roots_are_not_deduplicated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"not real").unwrap();

        let settings = LibrarySettings::default();
        let root = dir.path().to_path_buf();
        let tracks = scan_roots(&[root.clone(), root], &settings);

        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn missing_root_is_skipped_silently() {
        let settings = LibrarySettings::default();
        let tracks = scan_roots(&[PathBuf::from("/nonexistent/tacet-test")], &settings);
        assert!(tracks.is_empty());
    }
}
