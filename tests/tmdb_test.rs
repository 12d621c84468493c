//! TMDB API client tests
//!
//! Tests endpoint selection, query-string shape, pass-through parsing, and
//! error handling against a mock HTTP server.

use mockito::{Matcher, Server};
use watchwave::{Category, CategoryRequest, MediaKind, SearchRequest, TmdbClient, TmdbError};

const MOVIE_PAGE: &str = r#"{
    "page": 1,
    "results": [
        {
            "id": 438631,
            "title": "Dune",
            "release_date": "2021-09-15",
            "overview": "Paul Atreides leads nomadic tribes",
            "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
            "vote_average": 7.8,
            "vote_count": 9000,
            "genre_ids": [878, 12]
        },
        {
            "id": 693134,
            "title": "Dune: Part Two",
            "release_date": "2024-02-27",
            "overview": "Paul unites with Chani",
            "poster_path": null,
            "vote_average": 8.3,
            "vote_count": 4000,
            "genre_ids": [878, 12]
        }
    ],
    "total_pages": 42,
    "total_results": 833
}"#;

// =============================================================================
// Category Feed Tests
// =============================================================================

#[tokio::test]
async fn test_plain_category_hits_list_endpoint() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "test_key".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::Popular, MediaKind::Movie).page(2);
    let page = client.movie_feed(&req).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].title, "Dune");
    assert_eq!(page.total_results, 833);
}

#[tokio::test]
async fn test_trending_uses_time_window_path() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/tv/week")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::Trending, MediaKind::Tv)
        .time_window(watchwave::TimeWindow::Week);
    let page = client.tv_feed(&req).await.unwrap();

    mock.assert_async().await;
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_genre_filter_hits_discover_with_floor() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("with_genres".into(), "28".into()),
            Matcher::UrlEncoded("sort_by".into(), "vote_average.desc".into()),
            Matcher::UrlEncoded("vote_count.gte".into(), "300".into()),
        ]))
        .with_status(200)
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::TopRated, MediaKind::Movie).genre("action");
    client.movie_feed(&req).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_time_bounded_discover_carries_release_window() {
    let mut server = Server::new_async().await;

    // The window is computed from the wall clock, so only assert shape here;
    // exact arithmetic is covered by the pure builder tests.
    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("with_genres".into(), "27".into()),
            Matcher::Regex(r"primary_release_date\.gte=\d{4}-\d{2}-\d{2}".into()),
            Matcher::Regex(r"primary_release_date\.lte=\d{4}-\d{2}-\d{2}".into()),
        ]))
        .with_status(200)
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::NowPlaying, MediaKind::Movie).genre("horror");
    client.movie_feed(&req).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_genre_falls_back_to_list_endpoint() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::Popular, MediaKind::Movie).genre("not-a-genre");
    client.movie_feed(&req).await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_text_search_parameters() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "dune".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("year".into(), "2021".into()),
        ]))
        .with_status(200)
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = SearchRequest::Text {
        query: "dune".into(),
        page: 1,
        year: Some(2021),
    };
    let page = client.search_movies(&req).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.results[0].id, 438631);
}

#[tokio::test]
async fn test_filtered_discover_search() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/tv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("with_genres".into(), "18,80".into()),
            Matcher::UrlEncoded("first_air_date_year".into(), "2020".into()),
            Matcher::UrlEncoded("sort_by".into(), "popularity.desc".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = SearchRequest::Discover {
        genre_ids: vec![18, 80],
        year: Some(2020),
        sort_by: Some("popularity.desc".into()),
        page: 1,
    };
    client.search_tv(&req).await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Detail Tests
// =============================================================================

#[tokio::test]
async fn test_movie_details_appends_sub_resources() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "id": 438631,
        "title": "Dune",
        "release_date": "2021-09-15",
        "runtime": 155,
        "genres": [{"id": 878, "name": "Science Fiction"}],
        "overview": "Paul Atreides leads nomadic tribes",
        "vote_average": 7.8,
        "credits": {"cast": [{"id": 1190668, "name": "Timothée Chalamet",
                              "character": "Paul Atreides", "order": 0}], "crew": []},
        "videos": {"results": [{"key": "n9xhJrPXop4", "name": "Trailer",
                                "site": "YouTube", "type": "Trailer"}]},
        "reviews": {"page": 1, "results": [], "total_pages": 0, "total_results": 0}
    }"#;

    let mock = server
        .mock("GET", "/movie/438631")
        .match_query(Matcher::UrlEncoded(
            "append_to_response".into(),
            "credits,videos,similar,reviews,watch/providers".into(),
        ))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let details = client.movie_details(438631).await.unwrap();

    mock.assert_async().await;
    assert_eq!(details.runtime, Some(155));
    let credits = details.credits.unwrap();
    assert_eq!(credits.cast[0].character.as_deref(), Some("Paul Atreides"));
    assert_eq!(details.videos.unwrap().results[0].site, "YouTube");
}

#[tokio::test]
async fn test_person_appends_combined_credits() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "id": 524,
        "name": "Natalie Portman",
        "biography": "An actress.",
        "birthday": "1981-06-09",
        "movie_credits": {"cast": [{"id": 1893, "title": "Episode I",
                                    "character": "Padmé", "vote_average": 6.5}]},
        "tv_credits": {"cast": []}
    }"#;

    let mock = server
        .mock("GET", "/person/524")
        .match_query(Matcher::UrlEncoded(
            "append_to_response".into(),
            "movie_credits,tv_credits".into(),
        ))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let person = client.person(524).await.unwrap();

    mock.assert_async().await;
    assert_eq!(person.name, "Natalie Portman");
    let credits = person.movie_credits.unwrap();
    assert_eq!(credits.cast[0].display_title(), "Episode I");
}

#[tokio::test]
async fn test_season_episode_endpoints() {
    let mut server = Server::new_async().await;

    let season_mock = server
        .mock("GET", "/tv/1396/season/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"season_number": 1, "name": "Season 1", "episodes": [
                {"id": 62085, "episode_number": 1, "season_number": 1,
                 "name": "Pilot", "air_date": "2008-01-20", "runtime": 58}
            ]}"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let season = client.season(1396, 1).await.unwrap();

    season_mock.assert_async().await;
    assert_eq!(season.episodes.len(), 1);
    assert_eq!(season.episodes[0].name, "Pilot");
}

#[tokio::test]
async fn test_genre_list_and_configuration() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/genre/tv/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"genres": [{"id": 10759, "name": "Action & Adventure"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/configuration")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"images": {"secure_base_url": "https://image.tmdb.org/t/p/",
                "poster_sizes": ["w92", "w500"], "backdrop_sizes": ["w300", "w1280"]}}"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());

    let genres = client.genre_list(MediaKind::Tv).await.unwrap();
    assert_eq!(genres.genres[0].id, 10759);

    let config = client.configuration().await.unwrap();
    assert_eq!(config.images.secure_base_url, "https://image.tmdb.org/t/p/");
    assert!(config.images.poster_sizes.contains(&"w500".to_string()));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_404_maps_to_not_found() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/999999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status_message": "not found"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_details(999_999_999).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::NotFound)
    ));
}

#[tokio::test]
async fn test_server_error_propagates_status() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::Popular, MediaKind::Movie);
    let err = client.movie_feed(&req).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::Api(500))
    ));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let req = CategoryRequest::new(Category::Popular, MediaKind::Movie);
    let err = client.movie_feed(&req).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_concurrent_feeds_fail_independently() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(MOVIE_PAGE)
        .create_async()
        .await;
    server
        .mock("GET", "/movie/top_rated")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let popular = CategoryRequest::new(Category::Popular, MediaKind::Movie);
    let top_rated = CategoryRequest::new(Category::TopRated, MediaKind::Movie);

    let (popular, top_rated) = tokio::join!(
        client.movie_feed(&popular),
        client.movie_feed(&top_rated)
    );

    // One slot failing leaves the other intact.
    assert!(popular.is_ok());
    assert!(top_rated.is_err());
    assert_eq!(popular.unwrap().results.len(), 2);
}
