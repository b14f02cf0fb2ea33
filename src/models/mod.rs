mod genre;
mod media;

pub use genre::{GenreCatalog, UNKNOWN_GENRE};
pub use media::{GenreRef, LookupKey, LookupMode, MediaKind, MediaRecord, NormalizedEvent};
