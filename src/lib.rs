//! Watchwave - movie and TV discovery client for the TMDB API
//!
//! Discover, search, and inspect movies and TV shows from the terminal.
//!
//! # Modules
//!
//! - `models` - response models for catalog pages, details, people
//! - `api` - query construction and the TMDB HTTP client
//! - `config` - config file and API key resolution
//! - `store` - local favorites/theme preferences

pub mod api;
pub mod config;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use api::{
    build_category, build_search, Category, CategoryRequest, MediaKind, ResolvedRequest,
    SearchRequest, TimeWindow, TmdbClient, TmdbError,
};
pub use config::Config;
pub use models::{Movie, MovieDetails, Page, Person, SeasonDetails, TvDetails, TvShow};
pub use store::{Favorite, FilePrefsStore, PrefsStore};
