use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;
use crate::models::{LookupKey, MediaKind, MediaRecord};

/// Why a metadata lookup produced no record.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service answered, but has nothing for this key
    #[error("no {kind} found for {key}")]
    NotFound { kind: MediaKind, key: LookupKey },

    #[error(transparent)]
    Upstream(#[from] AppError),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Movie/TV metadata source.
///
/// Search methods return the best (first) match for a title; `*_by_id`
/// methods fetch one exact record.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search_movie(&self, title: &str) -> LookupResult<MediaRecord>;

    async fn search_series(&self, title: &str) -> LookupResult<MediaRecord>;

    async fn movie_by_id(&self, id: u64) -> LookupResult<MediaRecord>;

    async fn series_by_id(&self, id: u64) -> LookupResult<MediaRecord>;
}
