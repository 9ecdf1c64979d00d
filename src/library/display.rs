use crate::config::TrackDisplayField;

use super::model::Track;

/// Build the list-row text for a track according to the configured
/// `fields` and separator.
///
/// Empty fields are skipped rather than rendered as empty segments; when
/// every configured field is empty the title is used alone (it is never
/// empty itself).
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.trim().to_string());
                }
            }
            TrackDisplayField::Artist => {
                if !track.artist.trim().is_empty() {
                    parts.push(track.artist.trim().to_string());
                }
            }
            TrackDisplayField::Album => {
                if !track.album.trim().is_empty() {
                    parts.push(track.album.trim().to_string());
                }
            }
            TrackDisplayField::Year => {
                if !track.year.trim().is_empty() {
                    parts.push(track.year.trim().to_string());
                }
            }
            TrackDisplayField::Genre => {
                if !track.genre.trim().is_empty() {
                    parts.push(track.genre.trim().to_string());
                }
            }
            TrackDisplayField::Duration => {
                let d = track.duration_text();
                if !d.is_empty() {
                    parts.push(d);
                }
            }
            TrackDisplayField::Filename => {
                if !track.file_name.trim().is_empty() {
                    parts.push(track.file_name.clone());
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
