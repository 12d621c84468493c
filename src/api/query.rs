//! Discovery query construction
//!
//! Builds the path and query parameters for every catalog request. A category
//! fetch resolves to one of two endpoint families: the plain list endpoint
//! (`/movie/popular`, `/trending/tv/day`, ...) when no genre filter applies,
//! or `/discover/{kind}` when one does. The two families take different
//! parameter shapes and sort defaults, so the split lives here in one place
//! rather than being re-decided per call site.
//!
//! Builders are pure: "today" is an explicit argument and identical inputs
//! produce identical output (params are kept in a `BTreeMap`, so iteration
//! order is stable too).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::dates::{
    airing_today_window, now_playing_window, on_the_air_window, upcoming_window, DateWindow,
};
use crate::api::genres;

const SORT_POPULARITY: &str = "popularity.desc";
const SORT_VOTE_AVERAGE: &str = "vote_average.desc";

/// Media kind served by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the provider (`movie` / `tv`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

/// Named catalog slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trending,
    Popular,
    NowPlaying,
    Upcoming,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl Category {
    /// List-endpoint path segment. Trending lives under
    /// `/trending/{kind}/{window}` and never uses this form.
    fn segment(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::Popular => "popular",
            Category::NowPlaying => "now_playing",
            Category::Upcoming => "upcoming",
            Category::TopRated => "top_rated",
            Category::AiringToday => "airing_today",
            Category::OnTheAir => "on_the_air",
        }
    }

    /// Date window for time-bounded categories, if any.
    fn window(&self, today: NaiveDate) -> Option<DateWindow> {
        match self {
            Category::NowPlaying => Some(now_playing_window(today)),
            Category::Upcoming => Some(upcoming_window(today)),
            Category::AiringToday => Some(airing_today_window(today)),
            Category::OnTheAir => Some(on_the_air_window(today)),
            _ => None,
        }
    }

    /// Minimum vote count on genre-filtered discover requests. Rating sorts
    /// and genre slices would otherwise surface obscure low-sample titles.
    fn vote_floor(&self, kind: MediaKind) -> Option<u32> {
        match (self, kind) {
            (Category::TopRated, MediaKind::Movie) => Some(300),
            (Category::TopRated, MediaKind::Tv) => Some(100),
            (Category::Trending, MediaKind::Movie) => Some(100),
            (Category::Trending, MediaKind::Tv) => Some(50),
            _ => None,
        }
    }

    fn sort_by(&self) -> &'static str {
        match self {
            Category::TopRated => SORT_VOTE_AVERAGE,
            _ => SORT_POPULARITY,
        }
    }
}

/// Trending time window path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// A category fetch, before endpoint resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRequest {
    pub category: Category,
    pub kind: MediaKind,
    pub page: u32,
    /// Human genre key; unknown keys are treated as absent.
    pub genre: Option<String>,
    /// Only meaningful for `Category::Trending`.
    pub time_window: TimeWindow,
}

impl CategoryRequest {
    pub fn new(category: Category, kind: MediaKind) -> Self {
        Self {
            category,
            kind,
            page: 1,
            genre: None,
            time_window: TimeWindow::default(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn genre(mut self, key: impl Into<String>) -> Self {
        self.genre = Some(key.into());
        self
    }

    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }
}

/// A search screen request. Text search and filtered discovery hit different
/// endpoints with different parameter shapes, so the distinction is explicit
/// rather than sniffed from an untyped parameter bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Free-text title search.
    Text {
        query: String,
        page: u32,
        year: Option<u16>,
    },
    /// Structured discovery by genre/year/sort.
    Discover {
        genre_ids: Vec<u32>,
        year: Option<u16>,
        sort_by: Option<String>,
        page: u32,
    },
}

/// The final endpoint path and query parameters for one HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub path: String,
    pub params: BTreeMap<&'static str, String>,
}

impl ResolvedRequest {
    fn new(path: String) -> Self {
        Self {
            path,
            params: BTreeMap::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.insert(key, value.to_string());
        self
    }
}

/// Resolve a category fetch to its endpoint and parameters.
///
/// A genre key that does not resolve for the given media kind degrades
/// silently to the unfiltered list endpoint. Intentional-looking but
/// unconfirmed upstream behavior; kept as-is.
pub fn build_category(req: &CategoryRequest, today: NaiveDate) -> ResolvedRequest {
    let kind = req.kind.as_str();
    let genre_id = req
        .genre
        .as_deref()
        .and_then(|key| genres::resolve(req.kind, key));

    let Some(genre_id) = genre_id else {
        let path = match req.category {
            Category::Trending => format!("/trending/{}/{}", kind, req.time_window.as_str()),
            cat => format!("/{}/{}", kind, cat.segment()),
        };
        return ResolvedRequest::new(path).param("page", req.page);
    };

    let mut resolved = ResolvedRequest::new(format!("/discover/{}", kind))
        .param("page", req.page)
        .param("with_genres", genre_id)
        .param("sort_by", req.category.sort_by());

    if let Some(floor) = req.category.vote_floor(req.kind) {
        resolved = resolved.param("vote_count.gte", floor);
    }

    if let Some(window) = req.category.window(today) {
        let (gte, lte) = match req.kind {
            MediaKind::Movie => ("primary_release_date.gte", "primary_release_date.lte"),
            MediaKind::Tv => ("air_date.gte", "air_date.lte"),
        };
        resolved = resolved.param(gte, window.from_str());
        if let Some(to) = window.to_str() {
            resolved = resolved.param(lte, to);
        }
    }

    resolved
}

/// Resolve a search request to its endpoint and parameters.
pub fn build_search(kind: MediaKind, req: &SearchRequest) -> ResolvedRequest {
    match req {
        SearchRequest::Text { query, page, year } => {
            let mut resolved = ResolvedRequest::new(format!("/search/{}", kind.as_str()))
                .param("query", query)
                .param("page", (*page).max(1));
            if let Some(year) = year {
                let key = match kind {
                    MediaKind::Movie => "year",
                    MediaKind::Tv => "first_air_date_year",
                };
                resolved = resolved.param(key, year);
            }
            resolved
        }
        SearchRequest::Discover {
            genre_ids,
            year,
            sort_by,
            page,
        } => {
            let mut resolved = ResolvedRequest::new(format!("/discover/{}", kind.as_str()))
                .param("page", (*page).max(1));
            if !genre_ids.is_empty() {
                let joined = genre_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                resolved = resolved.param("with_genres", joined);
            }
            if let Some(year) = year {
                let key = match kind {
                    MediaKind::Movie => "primary_release_year",
                    MediaKind::Tv => "first_air_date_year",
                };
                resolved = resolved.param(key, year);
            }
            if let Some(sort) = sort_by {
                resolved = resolved.param("sort_by", sort);
            }
            resolved
        }
    }
}
