//! TMDB (The Movie Database) API client
//!
//! Thin pass-through over the REST API: every method resolves a request via
//! the query builder (or a fixed path), issues one GET, and deserializes the
//! body verbatim. No retries, no caching; failed calls are simply re-issued
//! by the caller.
//!
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use chrono::Utc;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::query::{build_category, build_search, CategoryRequest, MediaKind, SearchRequest};
use crate::models::{
    ApiConfiguration, Credits, Episode, GenreList, Movie, MovieDetails, Page, Person, Review,
    SeasonDetails, TvDetails, TvShow, VideoList, WatchProviders,
};

/// Sub-resources appended to detail requests in a single round trip.
const DETAIL_APPEND: &str = "credits,videos,similar,reviews,watch/providers";
/// Sub-resources appended to person requests.
const PERSON_APPEND: &str = "movie_credits,tv_credits";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("API error: HTTP {0}")]
    Api(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Issue one authenticated GET and deserialize the body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &BTreeMap<&'static str, String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = params.len(), "tmdb request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(TmdbError::RequestFailed)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(TmdbError::RequestFailed)?;
                let parsed: T = serde_json::from_str(&body)
                    .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound.into()),
            status => Err(TmdbError::Api(status.as_u16()).into()),
        }
    }

    /// GET with a single `append_to_response` parameter.
    async fn get_with_append<T: DeserializeOwned>(&self, path: &str, append: &str) -> Result<T> {
        let mut params = BTreeMap::new();
        params.insert("append_to_response", append.to_string());
        self.get(path, &params).await
    }

    // =========================================================================
    // Catalog Feeds
    // =========================================================================

    /// Fetch a movie category feed (trending, popular, now playing, ...).
    pub async fn movie_feed(&self, req: &CategoryRequest) -> Result<Page<Movie>> {
        let resolved = build_category(req, Utc::now().date_naive());
        self.get(&resolved.path, &resolved.params).await
    }

    /// Fetch a TV category feed (trending, popular, airing today, ...).
    pub async fn tv_feed(&self, req: &CategoryRequest) -> Result<Page<TvShow>> {
        let resolved = build_category(req, Utc::now().date_naive());
        self.get(&resolved.path, &resolved.params).await
    }

    /// Text search or filtered discovery for movies.
    pub async fn search_movies(&self, req: &SearchRequest) -> Result<Page<Movie>> {
        let resolved = build_search(MediaKind::Movie, req);
        self.get(&resolved.path, &resolved.params).await
    }

    /// Text search or filtered discovery for TV shows.
    pub async fn search_tv(&self, req: &SearchRequest) -> Result<Page<TvShow>> {
        let resolved = build_search(MediaKind::Tv, req);
        self.get(&resolved.path, &resolved.params).await
    }

    // =========================================================================
    // Details
    // =========================================================================

    /// Movie details with credits, videos, similar, reviews, and watch
    /// providers appended in one call.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        self.get_with_append(&format!("/movie/{}", id), DETAIL_APPEND)
            .await
    }

    /// TV details with the same appended sub-resources as movies.
    pub async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        self.get_with_append(&format!("/tv/{}", id), DETAIL_APPEND)
            .await
    }

    pub async fn movie_credits(&self, id: u64) -> Result<Credits> {
        self.get(&format!("/movie/{}/credits", id), &BTreeMap::new())
            .await
    }

    pub async fn tv_credits(&self, id: u64) -> Result<Credits> {
        self.get(&format!("/tv/{}/credits", id), &BTreeMap::new())
            .await
    }

    pub async fn movie_videos(&self, id: u64) -> Result<VideoList> {
        self.get(&format!("/movie/{}/videos", id), &BTreeMap::new())
            .await
    }

    pub async fn tv_videos(&self, id: u64) -> Result<VideoList> {
        self.get(&format!("/tv/{}/videos", id), &BTreeMap::new())
            .await
    }

    pub async fn similar_movies(&self, id: u64) -> Result<Page<Movie>> {
        self.get(&format!("/movie/{}/similar", id), &BTreeMap::new())
            .await
    }

    pub async fn similar_tv(&self, id: u64) -> Result<Page<TvShow>> {
        self.get(&format!("/tv/{}/similar", id), &BTreeMap::new())
            .await
    }

    pub async fn movie_reviews(&self, id: u64) -> Result<Page<Review>> {
        self.get(&format!("/movie/{}/reviews", id), &BTreeMap::new())
            .await
    }

    pub async fn tv_reviews(&self, id: u64) -> Result<Page<Review>> {
        self.get(&format!("/tv/{}/reviews", id), &BTreeMap::new())
            .await
    }

    /// Streaming/rental availability, keyed by country.
    pub async fn watch_providers(&self, kind: MediaKind, id: u64) -> Result<WatchProviders> {
        self.get(
            &format!("/{}/{}/watch/providers", kind.as_str(), id),
            &BTreeMap::new(),
        )
        .await
    }

    /// Season details with the full episode list.
    pub async fn season(&self, tv_id: u64, season_number: u32) -> Result<SeasonDetails> {
        self.get(
            &format!("/tv/{}/season/{}", tv_id, season_number),
            &BTreeMap::new(),
        )
        .await
    }

    /// Single episode details.
    pub async fn episode(
        &self,
        tv_id: u64,
        season_number: u32,
        episode_number: u32,
    ) -> Result<Episode> {
        self.get(
            &format!(
                "/tv/{}/season/{}/episode/{}",
                tv_id, season_number, episode_number
            ),
            &BTreeMap::new(),
        )
        .await
    }

    /// Person details with movie and TV credits appended.
    pub async fn person(&self, id: u64) -> Result<Person> {
        self.get_with_append(&format!("/person/{}", id), PERSON_APPEND)
            .await
    }

    // =========================================================================
    // Provider Metadata
    // =========================================================================

    /// The provider's full genre catalog for a media kind.
    pub async fn genre_list(&self, kind: MediaKind) -> Result<GenreList> {
        self.get(&format!("/genre/{}/list", kind.as_str()), &BTreeMap::new())
            .await
    }

    /// Image CDN configuration.
    pub async fn configuration(&self) -> Result<ApiConfiguration> {
        self.get("/configuration", &BTreeMap::new()).await
    }
}
