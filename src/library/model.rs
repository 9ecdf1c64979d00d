//! Track record: one audio file on disk plus its editable tag metadata.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tags::{self, TagUpdate, TagWriteError};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One discovered audio file. Construction never fails: missing or
/// unreadable tags degrade to placeholder values, so the UI always has
/// something to show.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    /// Base file name, also the fallback title.
    pub file_name: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Free text; empty when the file carries no year tag.
    pub year: String,
    /// Free text; empty when the file carries no genre tag.
    pub genre: String,
    pub duration: Option<Duration>,
}

impl Track {
    /// Build a `Track` for `path`, reading tags eagerly.
    pub fn load(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        let fields = tags::read_tags(path);

        Self {
            path: path.to_path_buf(),
            title: fields.title.unwrap_or_else(|| file_name.clone()),
            artist: fields.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: fields.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            year: fields.year.unwrap_or_default(),
            genre: fields.genre.unwrap_or_default(),
            duration: fields.duration,
            file_name,
        }
    }

    /// Persist `update` into the file, then mirror it into the in-memory
    /// fields. On failure the in-memory fields are left untouched.
    pub fn save(&mut self, update: &TagUpdate) -> Result<(), TagWriteError> {
        tags::write_tags(&self.path, update)?;

        // A track title must never be empty; fall back to the file name
        // like the initial load does.
        self.title = if update.title.trim().is_empty() {
            self.file_name.clone()
        } else {
            update.title.clone()
        };
        self.artist = update.artist.clone();
        self.album = update.album.clone();
        self.year = update.year.clone();
        self.genre = update.genre.clone();

        Ok(())
    }

    /// Whole seconds of the duration formatted as `M:SS`, or an empty
    /// string when the duration is unknown.
    pub fn duration_text(&self) -> String {
        match self.duration {
            Some(d) => {
                let secs = d.as_secs();
                format!("{}:{:02}", secs / 60, secs % 60)
            }
            None => String::new(),
        }
    }
}
