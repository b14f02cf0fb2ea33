use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::provider::{LookupError, LookupResult, MetadataProvider};
use super::types::{SearchPage, TmdbMovie, TmdbSeries, TmdbStatus};
use crate::config::TmdbConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::build_client;
use crate::models::{LookupKey, MediaKind, MediaRecord};

const SERVICE: &str = "tmdb";

/// The Movie Database v3 API client.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> AppResult<Self> {
        Ok(Self {
            http: build_client(SERVICE, Duration::from_secs(config.timeout))?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::external(SERVICE, message, source)
    }

    fn endpoint(&self, path: &str, query: Option<&str>) -> AppResult<Url> {
        let mut params = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        if let Some(query) = query {
            params.push(("query", query));
        }

        Url::parse_with_params(&format!("{}/{}", self.base_url, path), &params)
            .map_err(|e| Self::make_error(format!("invalid URL for {}", path), Some(e.into())))
    }

    /// GET `path` and decode the JSON body. A 404 becomes `not_found`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
        not_found: impl FnOnce() -> LookupError,
    ) -> LookupResult<T> {
        let url = self.endpoint(path, query)?;

        // without_url(): the query string holds the API key
        let resp = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            Self::make_error(format!("{} request failed: {}", path, e), Some(e.into()))
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }
        if !status.is_success() {
            let detail = resp
                .json::<TmdbStatus>()
                .await
                .ok()
                .and_then(|s| s.status_message)
                .unwrap_or_default();
            return Err(Self::make_error(
                format!("{} HTTP {}: {}", path, status.as_u16(), detail),
                None,
            )
            .into());
        }

        resp.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            Self::make_error(format!("{} invalid JSON: {}", path, e), Some(e.into())).into()
        })
    }

    async fn search<T>(&self, path: &str, kind: MediaKind, title: &str) -> LookupResult<T>
    where
        T: DeserializeOwned,
    {
        let not_found = || LookupError::NotFound {
            kind,
            key: LookupKey::Title(title.to_string()),
        };

        let page: SearchPage<T> = self.get_json(path, Some(title), not_found).await?;
        tracing::debug!(path, title, hits = page.results.len(), "TMDB search answered");

        page.results.into_iter().next().ok_or_else(not_found)
    }

    async fn fetch<T>(&self, path: &str, kind: MediaKind, id: u64) -> LookupResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_json(path, None, || LookupError::NotFound {
            kind,
            key: LookupKey::TmdbId(id),
        })
        .await
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn search_movie(&self, title: &str) -> LookupResult<MediaRecord> {
        self.search::<TmdbMovie>("search/movie", MediaKind::Movie, title)
            .await
            .map(MediaRecord::from)
    }

    async fn search_series(&self, title: &str) -> LookupResult<MediaRecord> {
        self.search::<TmdbSeries>("search/tv", MediaKind::Series, title)
            .await
            .map(MediaRecord::from)
    }

    async fn movie_by_id(&self, id: u64) -> LookupResult<MediaRecord> {
        self.fetch::<TmdbMovie>(&format!("movie/{}", id), MediaKind::Movie, id)
            .await
            .map(MediaRecord::from)
    }

    async fn series_by_id(&self, id: u64) -> LookupResult<MediaRecord> {
        self.fetch::<TmdbSeries>(&format!("tv/{}", id), MediaKind::Series, id)
            .await
            .map(MediaRecord::from)
    }
}
