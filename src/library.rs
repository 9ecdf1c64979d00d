//! Music library: track records, root resolution and the directory scan.
//!
//! The scan produces a flat `Vec<Track>` in walk order; the app model owns
//! filtering and selection on top of it.

mod display;
mod model;
mod roots;
mod scan;

pub use display::display_from_fields;
pub use model::Track;
pub use roots::resolve_roots;
pub use scan::scan_roots;
