//! Static TMDB genre tables used to name bare genre codes.

use std::collections::HashMap;

use super::media::{GenreRef, MediaKind};

/// Label returned for codes missing from the tables.
pub const UNKNOWN_GENRE: &str = "Inconnu";

const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Aventure"),
    (16, "Animation"),
    (35, "Comédie"),
    (80, "Crime"),
    (99, "Documentaire"),
    (18, "Drame"),
    (10751, "Familial"),
    (14, "Fantastique"),
    (36, "Histoire"),
    (27, "Horreur"),
    (10402, "Musique"),
    (9648, "Mystère"),
    (10749, "Romance"),
    (878, "Science-Fiction"),
    (10770, "Téléfilm"),
    (53, "Thriller"),
    (10752, "Guerre"),
    (37, "Western"),
];

const SERIES_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Aventure"),
    (16, "Animation"),
    (35, "Comédie"),
    (80, "Crime"),
    (99, "Documentaire"),
    (18, "Drame"),
    (10751, "Familial"),
    (10762, "Enfants"),
    (9648, "Mystère"),
    (10763, "Actualités"),
    (10764, "Réalité"),
    (10765, "Science-Fiction & Fantastique"),
    (10766, "Feuilleton"),
    (10767, "Talk-show"),
    (10768, "Guerre & Politique"),
    (37, "Western"),
];

/// Read-only genre lookup, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct GenreCatalog {
    movie: HashMap<u32, &'static str>,
    series: HashMap<u32, &'static str>,
}

impl GenreCatalog {
    /// Build the catalog from the bundled TMDB tables.
    pub fn new() -> Self {
        Self {
            movie: MOVIE_GENRES.iter().copied().collect(),
            series: SERIES_GENRES.iter().copied().collect(),
        }
    }

    /// Name of a genre code for the given kind, or [`UNKNOWN_GENRE`].
    pub fn name(&self, kind: MediaKind, code: u32) -> &'static str {
        let table = match kind {
            MediaKind::Movie => &self.movie,
            MediaKind::Series => &self.series,
        };
        table.get(&code).copied().unwrap_or(UNKNOWN_GENRE)
    }

    /// Resolve a genre reference; inline names win over the tables.
    pub fn resolve<'a>(&self, kind: MediaKind, genre: &'a GenreRef) -> &'a str {
        match genre {
            GenreRef::Named { name, .. } => name.as_str(),
            GenreRef::Code(code) => self.name(kind, *code),
        }
    }
}

impl Default for GenreCatalog {
    fn default() -> Self {
        Self::new()
    }
}
