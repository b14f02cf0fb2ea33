//! Canonical media types shared by the adapters, the metadata lookup and
//! the announcement formatter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Movie or series, whatever the producer calls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Label shown in announcements.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Film",
            MediaKind::Series => "Série",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the metadata service should be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Fuzzy title search, best match wins
    ByName,
    /// Exact fetch by TMDB identifier
    ById,
}

/// The value handed to the metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Title(String),
    TmdbId(u64),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Title(title) => f.write_str(title),
            LookupKey::TmdbId(id) => write!(f, "tmdb:{}", id),
        }
    }
}

/// Request extracted from a producer payload.
///
/// Only payload adapters build these; the dispatcher consumes each one once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    key: LookupKey,
    kind: MediaKind,
}

impl NormalizedEvent {
    pub fn by_title(title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            key: LookupKey::Title(title.into()),
            kind,
        }
    }

    pub fn by_tmdb_id(id: u64, kind: MediaKind) -> Self {
        Self {
            key: LookupKey::TmdbId(id),
            kind,
        }
    }

    pub fn key(&self) -> &LookupKey {
        &self.key
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The lookup mode follows from the key: titles are searched, ids fetched.
    pub fn mode(&self) -> LookupMode {
        match self.key {
            LookupKey::Title(_) => LookupMode::ByName,
            LookupKey::TmdbId(_) => LookupMode::ById,
        }
    }
}

/// A genre as returned by the metadata service.
///
/// Search results only carry bare codes that need the local catalog,
/// detail fetches carry the localized name inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreRef {
    Code(u32),
    Named { id: u32, name: String },
}

/// Canonical media record, independent of the producer that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    /// TMDB average rating on a 0-10 scale
    pub vote_average: f64,
    /// ISO date (`YYYY-MM-DD`) as returned by TMDB, when known
    pub release_date: Option<String>,
    pub overview: String,
    pub genres: Vec<GenreRef>,
}
