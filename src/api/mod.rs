//! API layer: query construction and the TMDB HTTP client
//!
//! - `genres` - static human-key -> genre-ID tables per media kind
//! - `dates` - date windows for time-bounded categories
//! - `query` - path/parameter resolution for every catalog request
//! - `images` - CDN image URL construction
//! - `tmdb` - the HTTP client itself

pub mod dates;
pub mod genres;
pub mod images;
pub mod query;
pub mod tmdb;

pub use query::{
    build_category, build_search, Category, CategoryRequest, MediaKind, ResolvedRequest,
    SearchRequest, TimeWindow,
};
pub use tmdb::{TmdbClient, TmdbError};
