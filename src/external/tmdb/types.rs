//! TMDB wire types.

use serde::Deserialize;

use crate::models::{GenreRef, MediaKind, MediaRecord};

/// Envelope of `/search/movie` and `/search/tv`.
#[derive(Debug, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A search hit or detail record for a movie.
///
/// Search hits carry `genre_ids`, detail fetches carry `genres`.
#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// A search hit or detail record for a TV series.
#[derive(Debug, Deserialize)]
pub struct TmdbSeries {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

/// Error body TMDB returns alongside 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub struct TmdbStatus {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
}

fn genre_refs(genres: Vec<TmdbGenre>, genre_ids: Vec<u32>) -> Vec<GenreRef> {
    if genres.is_empty() {
        genre_ids.into_iter().map(GenreRef::Code).collect()
    } else {
        genres
            .into_iter()
            .map(|g| GenreRef::Named {
                id: g.id,
                name: g.name,
            })
            .collect()
    }
}

/// TMDB sends `""` for unknown dates and posters.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<TmdbMovie> for MediaRecord {
    fn from(movie: TmdbMovie) -> Self {
        MediaRecord {
            kind: MediaKind::Movie,
            title: movie.title,
            poster_path: non_empty(movie.poster_path),
            vote_average: movie.vote_average.unwrap_or(0.0),
            release_date: non_empty(movie.release_date),
            overview: movie.overview.unwrap_or_default(),
            genres: genre_refs(movie.genres, movie.genre_ids),
        }
    }
}

impl From<TmdbSeries> for MediaRecord {
    fn from(series: TmdbSeries) -> Self {
        MediaRecord {
            kind: MediaKind::Series,
            title: series.name,
            poster_path: non_empty(series.poster_path),
            vote_average: series.vote_average.unwrap_or(0.0),
            release_date: non_empty(series.first_air_date),
            overview: series.overview.unwrap_or_default(),
            genres: genre_refs(series.genres, series.genre_ids),
        }
    }
}
