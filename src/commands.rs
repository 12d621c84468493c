//! CLI Command Handlers
//!
//! Implements all CLI commands against the TMDB client and the local
//! preferences store. Each handler takes CLI args and Output, returns
//! ExitCode.

use serde::Serialize;

use crate::api::query::{Category, CategoryRequest, MediaKind, SearchRequest};
use crate::api::{genres, images, TmdbClient, TmdbError};
use crate::cli::{
    BrowseCmd, DiscoverCmd, EpisodeCmd, ExitCode, FavoritesCmd, GenresCmd, HomeCmd, InfoCmd,
    Output, PersonCmd, SearchCmd, SeasonCmd, ThemeCmd, ThemeState, TitleCmd,
};
use crate::config::Config;
use crate::models::Movie;
use crate::store::{Favorite, FilePrefsStore, PrefsStore};

/// Build a client from the resolved configuration.
fn client() -> TmdbClient {
    let config = Config::load();
    TmdbClient::new(config.tmdb_api_key())
}

/// Map a client error to an exit code.
fn fail(output: &Output, context: &str, err: anyhow::Error) -> ExitCode {
    let code = match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::NotFound) => ExitCode::NotFound,
        _ => ExitCode::NetworkError,
    };
    output.error(format!("{}: {}", context, err), code)
}

fn print_or_fail<T: Serialize>(output: &Output, data: T) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Browse Command
// =============================================================================

pub async fn browse_cmd(cmd: BrowseCmd, output: &Output) -> ExitCode {
    let kind: MediaKind = cmd.kind.into();
    let mut req = CategoryRequest::new(cmd.category.into(), kind)
        .page(cmd.page)
        .time_window(cmd.window.into());
    if let Some(genre) = cmd.genre {
        req = req.genre(genre);
    }

    let client = client();
    match kind {
        MediaKind::Movie => match client.movie_feed(&req).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Browse failed", e),
        },
        MediaKind::Tv => match client.tv_feed(&req).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Browse failed", e),
        },
    }
}

// =============================================================================
// Home Command
// =============================================================================

/// One title as shown on the home screen.
#[derive(Debug, Serialize)]
pub struct HomeEntry {
    pub id: u64,
    pub title: String,
    pub vote_average: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl From<Movie> for HomeEntry {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            vote_average: movie.vote_average,
            poster: images::poster_url(movie.poster_path.as_deref()),
        }
    }
}

/// One home-screen feed slot: either its titles or its own error. A failure
/// in one slot never affects the others.
#[derive(Debug, Serialize)]
pub struct FeedSection {
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<HomeEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedSection {
    fn from_result(
        category: &'static str,
        result: anyhow::Result<crate::models::Page<Movie>>,
        limit: usize,
    ) -> Self {
        match result {
            Ok(page) => {
                let titles = page
                    .results
                    .into_iter()
                    .take(limit)
                    .map(HomeEntry::from)
                    .collect();
                Self {
                    category,
                    titles: Some(titles),
                    error: None,
                }
            }
            Err(e) => Self {
                category,
                titles: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub async fn home_cmd(cmd: HomeCmd, output: &Output) -> ExitCode {
    let client = client();
    output.info("Fetching home feeds...");

    let trending = CategoryRequest::new(Category::Trending, MediaKind::Movie);
    let popular = CategoryRequest::new(Category::Popular, MediaKind::Movie);
    let now_playing = CategoryRequest::new(Category::NowPlaying, MediaKind::Movie);
    let upcoming = CategoryRequest::new(Category::Upcoming, MediaKind::Movie);
    let top_rated = CategoryRequest::new(Category::TopRated, MediaKind::Movie);

    // Independent concurrent fetches; join on all of them.
    let (trending, popular, now_playing, upcoming, top_rated) = tokio::join!(
        client.movie_feed(&trending),
        client.movie_feed(&popular),
        client.movie_feed(&now_playing),
        client.movie_feed(&upcoming),
        client.movie_feed(&top_rated),
    );

    let sections = vec![
        FeedSection::from_result("trending", trending, cmd.limit),
        FeedSection::from_result("popular", popular, cmd.limit),
        FeedSection::from_result("now_playing", now_playing, cmd.limit),
        FeedSection::from_result("upcoming", upcoming, cmd.limit),
        FeedSection::from_result("top_rated", top_rated, cmd.limit),
    ];

    if sections.iter().all(|s| s.error.is_some()) {
        return output.error("All home feeds failed", ExitCode::NetworkError);
    }
    print_or_fail(output, sections)
}

// =============================================================================
// Search / Discover Commands
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, output: &Output) -> ExitCode {
    let req = SearchRequest::Text {
        query: cmd.query.clone(),
        page: cmd.page,
        year: cmd.year,
    };

    output.info(format!("Searching for: {}", cmd.query));

    let client = client();
    match cmd.kind.into() {
        MediaKind::Movie => match client.search_movies(&req).await {
            Ok(mut page) => {
                page.results.truncate(cmd.limit);
                print_or_fail(output, page)
            }
            Err(e) => fail(output, "Search failed", e),
        },
        MediaKind::Tv => match client.search_tv(&req).await {
            Ok(mut page) => {
                page.results.truncate(cmd.limit);
                print_or_fail(output, page)
            }
            Err(e) => fail(output, "Search failed", e),
        },
    }
}

pub async fn discover_cmd(cmd: DiscoverCmd, output: &Output) -> ExitCode {
    let kind: MediaKind = cmd.kind.into();
    // Unknown genre keys degrade to "no filter", same as category browsing.
    let genre_ids: Vec<u32> = cmd
        .genre
        .iter()
        .filter_map(|key| genres::resolve(kind, key))
        .collect();

    let req = SearchRequest::Discover {
        genre_ids,
        year: cmd.year,
        sort_by: cmd.sort_by,
        page: cmd.page,
    };

    let client = client();
    match kind {
        MediaKind::Movie => match client.search_movies(&req).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Discover failed", e),
        },
        MediaKind::Tv => match client.search_tv(&req).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Discover failed", e),
        },
    }
}

// =============================================================================
// Detail Commands
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, output: &Output) -> ExitCode {
    let client = client();
    match cmd.kind.into() {
        MediaKind::Movie => match client.movie_details(cmd.id).await {
            Ok(details) => print_or_fail(output, details),
            Err(e) => fail(output, "Info failed", e),
        },
        MediaKind::Tv => match client.tv_details(cmd.id).await {
            Ok(details) => print_or_fail(output, details),
            Err(e) => fail(output, "Info failed", e),
        },
    }
}

pub async fn credits_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let client = client();
    let result = match cmd.kind.into() {
        MediaKind::Movie => client.movie_credits(cmd.id).await,
        MediaKind::Tv => client.tv_credits(cmd.id).await,
    };
    match result {
        Ok(credits) => print_or_fail(output, credits),
        Err(e) => fail(output, "Credits failed", e),
    }
}

pub async fn videos_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let client = client();
    let result = match cmd.kind.into() {
        MediaKind::Movie => client.movie_videos(cmd.id).await,
        MediaKind::Tv => client.tv_videos(cmd.id).await,
    };
    match result {
        Ok(videos) => print_or_fail(output, videos),
        Err(e) => fail(output, "Videos failed", e),
    }
}

pub async fn similar_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let client = client();
    match cmd.kind.into() {
        MediaKind::Movie => match client.similar_movies(cmd.id).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Similar failed", e),
        },
        MediaKind::Tv => match client.similar_tv(cmd.id).await {
            Ok(page) => print_or_fail(output, page),
            Err(e) => fail(output, "Similar failed", e),
        },
    }
}

pub async fn reviews_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let client = client();
    let result = match cmd.kind.into() {
        MediaKind::Movie => client.movie_reviews(cmd.id).await,
        MediaKind::Tv => client.tv_reviews(cmd.id).await,
    };
    match result {
        Ok(page) => print_or_fail(output, page),
        Err(e) => fail(output, "Reviews failed", e),
    }
}

pub async fn providers_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let client = client();
    match client.watch_providers(cmd.kind.into(), cmd.id).await {
        Ok(providers) => print_or_fail(output, providers),
        Err(e) => fail(output, "Providers failed", e),
    }
}

pub async fn season_cmd(cmd: SeasonCmd, output: &Output) -> ExitCode {
    match client().season(cmd.tv_id, cmd.season).await {
        Ok(season) => print_or_fail(output, season),
        Err(e) => fail(output, "Season failed", e),
    }
}

pub async fn episode_cmd(cmd: EpisodeCmd, output: &Output) -> ExitCode {
    match client().episode(cmd.tv_id, cmd.season, cmd.episode).await {
        Ok(episode) => print_or_fail(output, episode),
        Err(e) => fail(output, "Episode failed", e),
    }
}

pub async fn person_cmd(cmd: PersonCmd, output: &Output) -> ExitCode {
    match client().person(cmd.id).await {
        Ok(person) => print_or_fail(output, person),
        Err(e) => fail(output, "Person failed", e),
    }
}

// =============================================================================
// Genres Command
// =============================================================================

#[derive(Debug, Serialize)]
struct GenreKey {
    key: &'static str,
    id: u32,
}

pub async fn genres_cmd(cmd: GenresCmd, output: &Output) -> ExitCode {
    let kind: MediaKind = cmd.kind.into();

    if cmd.remote {
        return match client().genre_list(kind).await {
            Ok(list) => print_or_fail(output, list),
            Err(e) => fail(output, "Genres failed", e),
        };
    }

    let keys: Vec<GenreKey> = genres::known_keys(kind)
        .into_iter()
        .filter_map(|key| genres::resolve(kind, key).map(|id| GenreKey { key, id }))
        .collect();
    print_or_fail(output, keys)
}

// =============================================================================
// Favorites / Theme Commands
// =============================================================================

fn prefs(output: &Output) -> Result<FilePrefsStore, ExitCode> {
    FilePrefsStore::new()
        .map_err(|e| output.error(format!("Preferences unavailable: {}", e), ExitCode::Error))
}

pub async fn favorites_cmd(cmd: FavoritesCmd, output: &Output) -> ExitCode {
    let store = match prefs(output) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let result = match cmd {
        FavoritesCmd::Add { kind, id, title } => store
            .add_favorite(Favorite {
                kind: kind.into(),
                id,
                title,
            })
            .map(|added| {
                output.info(if added { "Saved" } else { "Already saved" });
            }),
        FavoritesCmd::Remove { kind, id } => store.remove_favorite(kind.into(), id).map(|removed| {
            output.info(if removed { "Removed" } else { "Not saved" });
        }),
        FavoritesCmd::List => {
            return match store.favorites() {
                Ok(favorites) => print_or_fail(output, favorites),
                Err(e) => output.error(format!("Favorites failed: {}", e), ExitCode::Error),
            };
        }
        FavoritesCmd::Clear => store.clear_favorites(),
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Favorites failed: {}", e), ExitCode::Error),
    }
}

pub async fn theme_cmd(cmd: ThemeCmd, output: &Output) -> ExitCode {
    let store = match prefs(output) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let result = match cmd.set {
        Some(state) => store
            .set_dark_mode(state == ThemeState::Dark)
            .map(|()| state == ThemeState::Dark),
        None => store.dark_mode(),
    };

    match result {
        Ok(dark) => print_or_fail(output, if dark { "dark" } else { "light" }),
        Err(e) => output.error(format!("Theme failed: {}", e), ExitCode::Error),
    }
}
