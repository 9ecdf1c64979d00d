//! Application model types: `App`, `TagEditor` and `Toast`.
//!
//! The `App` struct holds the current library, the selected track, the
//! active filter and, when open, the tag editor for one track.

use std::time::{Duration, Instant};

use crate::library::Track;
use crate::tags::{TagUpdate, TagWriteError};

/// The editable fields of the tag editor, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
}

impl EditorField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Artist,
            Self::Artist => Self::Album,
            Self::Album => Self::Year,
            Self::Year => Self::Genre,
            Self::Genre => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Genre,
            Self::Artist => Self::Title,
            Self::Album => Self::Artist,
            Self::Year => Self::Album,
            Self::Genre => Self::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::Year => "Year",
            Self::Genre => "Genre",
        }
    }
}

/// In-progress edit of one track's tags. Holds working copies of the
/// fields; nothing touches the track or the file until a save.
#[derive(Debug, Clone)]
pub struct TagEditor {
    /// Index into `App::tracks` of the track being edited.
    pub track_index: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub field: EditorField,
}

impl TagEditor {
    pub fn for_track(track_index: usize, track: &Track) -> Self {
        Self {
            track_index,
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            year: track.year.clone(),
            genre: track.genre.clone(),
            field: EditorField::Title,
        }
    }

    /// Snapshot the working copies as a write payload.
    pub fn update(&self) -> TagUpdate {
        TagUpdate {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
        }
    }

    pub fn value(&self, field: EditorField) -> &str {
        match field {
            EditorField::Title => &self.title,
            EditorField::Artist => &self.artist,
            EditorField::Album => &self.album,
            EditorField::Year => &self.year,
            EditorField::Genre => &self.genre,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.field {
            EditorField::Title => &mut self.title,
            EditorField::Artist => &mut self.artist,
            EditorField::Album => &mut self.album,
            EditorField::Year => &mut self.year,
            EditorField::Genre => &mut self.genre,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    pub fn push_char(&mut self, c: char) {
        self.active_value_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.active_value_mut().pop();
    }
}

/// Transient status message with an expiry deadline.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub deadline: Instant,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,

    pub filter_mode: bool,
    pub filter_query: String,

    pub editor: Option<TagEditor>,
    pub toast: Option<Toast>,

    /// Human-readable summary of the scanned roots, for the status line.
    pub roots_label: Option<String>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            filter_mode: false,
            filter_query: String::new(),
            editor: None,
            toast: None,
            roots_label: None,
        }
    }

    /// Record the scanned roots in the app state for display.
    pub fn set_roots_label(&mut self, label: String) {
        self.roots_label = Some(label);
    }

    /// Replace the whole track collection (a rescan). The old collection is
    /// dropped only after the new one is fully built by the caller, and the
    /// selection is clamped back into view.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.editor = None;
        self.ensure_selected_visible();
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Case-insensitive substring match over title, artist and album.
    /// `query_lower` must already be lowercased.
    pub fn track_matches(track: &Track, query_lower: &str) -> bool {
        track.title.to_lowercase().contains(query_lower)
            || track.artist.to_lowercase().contains(query_lower)
            || track.album.to_lowercase().contains(query_lower)
    }

    /// Return the visible track indices: the whole collection in original
    /// order, narrowed by the filter query when one is set.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        if query.is_empty() {
            return (0..self.tracks.len()).collect();
        }

        let query_lower = query.to_lowercase();
        (0..self.tracks.len())
            .filter(|&i| Self::track_matches(&self.tracks[i], &query_lower))
            .collect()
    }

    /// Return the next visible index in the current display order after `current`.
    /// Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index in the current display order before `current`.
    /// Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Set the selected track index and ensure it is visible in the display.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    /// Move selection to the next visible track.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move selection to the previous visible track.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    /// Enter filter mode.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    /// Leave filter mode but keep the query applied to the list.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    /// Clear the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    /// Append a character to the filter query and refresh view.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    /// Remove the last character from the filter query and refresh view.
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Open the tag editor for the currently selected track, if any.
    pub fn open_editor(&mut self) {
        if let Some(track) = self.tracks.get(self.selected) {
            self.editor = Some(TagEditor::for_track(self.selected, track));
        }
    }

    /// Discard the editor without saving.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Persist the open editor's fields into the edited track's file.
    ///
    /// Returns `None` when no editor is open. On success the track's
    /// in-memory fields now hold the saved values; on failure they are
    /// unchanged and the editor stays open.
    pub fn save_editor(&mut self) -> Option<Result<(), TagWriteError>> {
        let editor = self.editor.as_ref()?;
        let update = editor.update();
        let idx = editor.track_index;
        let track = self.tracks.get_mut(idx)?;
        Some(track.save(&update))
    }

    /// Show a toast that expires `ttl` from now.
    pub fn show_toast(&mut self, message: impl Into<String>, ttl: Duration) {
        self.toast = Some(Toast {
            message: message.into(),
            deadline: Instant::now() + ttl,
        });
    }

    /// Drop the toast once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now >= toast.deadline {
                self.toast = None;
            }
        }
    }

    /// Ensure that `selected` is part of the current filtered view,
    /// otherwise move selection to the first visible track.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }
}
