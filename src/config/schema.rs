use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tacet/config.toml` or `~/.config/tacet/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TACET__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// How long save/rescan toasts stay on screen (milliseconds).
    pub toast_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tacet: quiet hands, clean tags ~ ".to_string(),
            toast_ms: 2000,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Duration,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Root directories to scan. Empty means "use the platform defaults"
    /// (music folder, downloads folder, home).
    pub roots: Vec<String>,

    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,

    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,

    /// Which fields make up a track's list row, and their order.
    ///
    /// Example: ["artist", "title", "duration"]
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "m4a".into(),
                "ogg".into(),
                "wav".into(),
                "opus".into(),
            ],
            follow_links: true,
            display_fields: vec![
                TrackDisplayField::Artist,
                TrackDisplayField::Title,
                TrackDisplayField::Duration,
            ],
            display_separator: " - ".to_string(),
        }
    }
}
