//! Tag metadata adapter around `lofty`.
//!
//! This module is the only place that talks to the tagging library. Reads
//! never fail: anything lofty cannot open or parse comes back as empty
//! fields and the caller substitutes placeholders. Writes return a typed
//! error so the UI can tell the user what went wrong.

use std::path::Path;
use std::time::Duration;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::tag::{ItemKey, Tag};

/// Raw tag fields as read from a file. `None` means the tag is absent or
/// the file could not be read at all.
#[derive(Debug, Clone, Default)]
pub struct TagFields {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<Duration>,
}

/// Field values to persist into a file's tag block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagUpdate {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TagWriteError {
    #[error("could not open file: {0}")]
    Open(#[source] lofty::error::LoftyError),
    #[error("file format does not support tags")]
    Unsupported,
    #[error("could not write tags: {0}")]
    Write(#[source] lofty::error::LoftyError),
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Read the tag fields of an audio file. Unreadable or untagged files
/// produce empty fields rather than an error.
pub fn read_tags(path: &Path) -> TagFields {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return TagFields::default();
    };

    let mut fields = TagFields {
        duration: Some(tagged.properties().duration()),
        ..TagFields::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        fields.title = non_empty(tag.get_string(ItemKey::TrackTitle));
        fields.artist = non_empty(tag.get_string(ItemKey::TrackArtist));
        fields.album = non_empty(tag.get_string(ItemKey::AlbumTitle));
        // ID3v2.4 and Vorbis store the year under a date key.
        fields.year = non_empty(tag.get_string(ItemKey::Year))
            .or_else(|| non_empty(tag.get_string(ItemKey::RecordingDate)));
        fields.genre = non_empty(tag.get_string(ItemKey::Genre));
    }

    fields
}

/// Persist the given fields into the file's primary tag, creating the tag
/// block when the file has none. Year and genre are only written when
/// non-empty. Nothing outside the tag block is modified.
pub fn write_tags(path: &Path, update: &TagUpdate) -> Result<(), TagWriteError> {
    let mut tagged = lofty::read_from_path(path).map_err(TagWriteError::Open)?;

    let tag_type = tagged.primary_tag_type();
    if tagged.tag(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged.tag_mut(tag_type).ok_or(TagWriteError::Unsupported)?;

    tag.insert_text(ItemKey::TrackTitle, update.title.clone());
    tag.insert_text(ItemKey::TrackArtist, update.artist.clone());
    tag.insert_text(ItemKey::AlbumTitle, update.album.clone());
    if !update.year.trim().is_empty() {
        // Mirror the read fallback: ID3 keeps the year under `Year`, while
        // RIFF INFO and Vorbis only accept it under a date key and drop
        // `Year` on conversion. Write both so every format keeps one.
        tag.insert_text(ItemKey::Year, update.year.trim().to_string());
        tag.insert_text(ItemKey::RecordingDate, update.year.trim().to_string());
    }
    if !update.genre.trim().is_empty() {
        tag.insert_text(ItemKey::Genre, update.genre.trim().to_string());
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(TagWriteError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// One second of 8-bit mono PCM silence: the smallest file lofty will
    /// happily parse and tag.
    fn write_minimal_wav(path: &Path) {
        let data_len: u32 = 8000;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(4 + 24 + 8 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn untagged_file_reads_duration_but_no_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_minimal_wav(&path);

        let fields = read_tags(&path);
        assert!(fields.title.is_none());
        assert!(fields.artist.is_none());
        assert_eq!(fields.duration.map(|d| d.as_secs()), Some(1));
    }

    #[test]
    fn written_tags_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_minimal_wav(&path);

        let update = TagUpdate {
            title: "Test".into(),
            artist: "Artist1".into(),
            album: "Album1".into(),
            year: "1998".into(),
            genre: "Rock".into(),
        };
        write_tags(&path, &update).unwrap();

        let fields = read_tags(&path);
        assert_eq!(fields.title.as_deref(), Some("Test"));
        assert_eq!(fields.artist.as_deref(), Some("Artist1"));
        assert_eq!(fields.album.as_deref(), Some("Album1"));
        assert_eq!(fields.year.as_deref(), Some("1998"));
        assert_eq!(fields.genre.as_deref(), Some("Rock"));
    }

    #[test]
    fn empty_year_and_genre_are_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_minimal_wav(&path);

        let update = TagUpdate {
            title: "Test".into(),
            artist: "Artist1".into(),
            album: "Album1".into(),
            year: String::new(),
            genre: String::new(),
        };
        write_tags(&path, &update).unwrap();

        let fields = read_tags(&path);
        assert_eq!(fields.title.as_deref(), Some("Test"));
        assert!(fields.year.is_none());
        assert!(fields.genre.is_none());
    }

    #[test]
    fn read_tags_on_missing_file_yields_empty_fields() {
        let fields = read_tags(Path::new("/nonexistent/no-such-file.mp3"));
        assert!(fields.title.is_none());
        assert!(fields.artist.is_none());
        assert!(fields.album.is_none());
        assert!(fields.year.is_none());
        assert!(fields.genre.is_none());
        assert!(fields.duration.is_none());
    }

    #[test]
    fn read_tags_on_garbage_file_yields_empty_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        fs::write(&path, b"definitely not an mp3 stream").unwrap();

        let fields = read_tags(&path);
        assert!(fields.title.is_none());
        assert!(fields.duration.is_none());
    }

    #[test]
    fn write_tags_on_missing_file_fails_with_open_error() {
        let update = TagUpdate {
            title: "T".into(),
            ..TagUpdate::default()
        };
        let err = write_tags(Path::new("/nonexistent/no-such-file.mp3"), &update);
        assert!(matches!(err, Err(TagWriteError::Open(_))));
    }

    #[test]
    fn write_tags_on_garbage_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.flac");
        fs::write(&path, b"not a flac stream").unwrap();

        let update = TagUpdate {
            title: "T".into(),
            ..TagUpdate::default()
        };
        assert!(write_tags(&path, &update).is_err());
    }
}
