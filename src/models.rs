//! Data structures for Watchwave
//!
//! Response models for the TMDB API, organized by domain:
//! - **Catalog**: paginated movie/TV listings from list, discover, and search
//! - **Details**: full title records with appended credits/videos/reviews
//! - **People**: person records with combined credits
//! - **Meta**: genre lists and the provider image configuration
//!
//! Bodies are deserialized as-is; no field is transformed or re-validated
//! after parsing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Catalog Models
// =============================================================================

/// One page of results, as returned by list, discover, and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Movie listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .release_date
            .as_deref()
            .and_then(extract_year)
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "{}{} - ⭐ {:.1}", self.title, year, self.vote_average)
    }
}

/// TV show listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl fmt::Display for TvShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .first_air_date
            .as_deref()
            .and_then(extract_year)
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "{}{} - ⭐ {:.1}", self.name, year, self.vote_average)
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Provider genre record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Response of `/genre/{kind}/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// Full movie record, optionally carrying appended sub-resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: String,
    pub tagline: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub imdb_id: Option<String>,
    // Populated when requested via append_to_response
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    pub similar: Option<Page<Movie>>,
    pub reviews: Option<Page<Review>>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WatchProviders>,
}

/// Full TV show record, optionally carrying appended sub-resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: String,
    pub tagline: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    // Populated when requested via append_to_response
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    pub similar: Option<Page<TvShow>>,
    pub reviews: Option<Page<Review>>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WatchProviders>,
}

/// Summary of a TV season inside `TvDetails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
    pub name: Option<String>,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}

/// Full season record from `/tv/{id}/season/{n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDetails {
    pub season_number: u32,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Episode record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub episode_number: u32,
    pub season_number: u32,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    pub still_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

// =============================================================================
// Credits / Videos / Reviews / Providers
// =============================================================================

/// Cast and crew for a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

/// Response of `/{kind}/{id}/videos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Trailer/clip reference; `key` identifies the video on `site`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

/// User review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: Option<String>,
    pub url: Option<String>,
}

/// Response of `/{kind}/{id}/watch/providers`, keyed by country code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, CountryProviders>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryProviders {
    pub link: Option<String>,
    pub flatrate: Option<Vec<Provider>>,
    pub rent: Option<Vec<Provider>>,
    pub buy: Option<Vec<Provider>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: u32,
    pub provider_name: String,
    pub logo_path: Option<String>,
}

// =============================================================================
// People
// =============================================================================

/// Person record from `/person/{id}`, with combined credits when appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: String,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub movie_credits: Option<PersonCredits>,
    pub tv_credits: Option<PersonCredits>,
}

/// Credit entries for a person. Movies carry `title`, TV carries `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<CreditEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditEntry {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

impl CreditEntry {
    /// Display title regardless of media kind.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("(untitled)")
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

/// Response of `/configuration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfiguration {
    pub images: ImageConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfiguration {
    pub secure_base_url: String,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    if date.len() >= 4 {
        date[..4].parse().ok()
    } else {
        None
    }
}
