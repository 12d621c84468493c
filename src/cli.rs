//! CLI - Command Line Interface for Watchwave
//!
//! Every screen of the app is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse a category
//! watchwave browse popular --kind tv --page 2
//! watchwave browse top-rated --genre action
//!
//! # Search and inspect
//! watchwave search "dune" --year 2021
//! watchwave info 438631 --json
//! watchwave person 524
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::api::query::{Category, MediaKind, TimeWindow};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Resource not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Watchwave - movie and TV discovery from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "watchwave",
    version,
    about = "Movie and TV discovery client for the TMDB API",
    after_help = "EXAMPLES:\n\
                  watchwave browse popular                 Popular movies, page 1\n\
                  watchwave browse top-rated -g action     Top-rated action movies\n\
                  watchwave search \"dune\" --year 2021      Text search\n\
                  watchwave home                           All home-screen feeds\n\
                  watchwave favorites add movie 438631 \"Dune\""
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse a catalog category
    #[command(visible_alias = "b")]
    Browse(BrowseCmd),

    /// Fetch all home-screen movie feeds concurrently
    Home(HomeCmd),

    /// Search by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Discover by structured filters (genres, year, sort)
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// Get details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Cast and crew for a title
    Credits(TitleCmd),

    /// Trailers and clips for a title
    Videos(TitleCmd),

    /// Similar titles
    Similar(TitleCmd),

    /// User reviews for a title
    Reviews(TitleCmd),

    /// Streaming availability by country
    Providers(TitleCmd),

    /// Episodes of a TV season
    Season(SeasonCmd),

    /// A single TV episode
    Episode(EpisodeCmd),

    /// Person details and combined credits
    #[command(visible_alias = "p")]
    Person(PersonCmd),

    /// List genre categories
    Genres(GenresCmd),

    /// Manage saved favorites
    #[command(subcommand, visible_alias = "fav")]
    Favorites(FavoritesCmd),

    /// Get or set the dark-mode theme flag
    Theme(ThemeCmd),
}

// =============================================================================
// Value Enums
// =============================================================================

/// Media kind selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindArg {
    /// Movies (default)
    #[default]
    Movie,
    /// TV shows
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(arg: KindArg) -> MediaKind {
        match arg {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Tv,
        }
    }
}

/// Catalog category selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Trending,
    Popular,
    NowPlaying,
    Upcoming,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Category {
        match arg {
            CategoryArg::Trending => Category::Trending,
            CategoryArg::Popular => Category::Popular,
            CategoryArg::NowPlaying => Category::NowPlaying,
            CategoryArg::Upcoming => Category::Upcoming,
            CategoryArg::TopRated => Category::TopRated,
            CategoryArg::AiringToday => Category::AiringToday,
            CategoryArg::OnTheAir => Category::OnTheAir,
        }
    }
}

/// Trending time window
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowArg {
    /// Today's trending (default)
    #[default]
    Day,
    /// This week's trending
    Week,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> TimeWindow {
        match arg {
            WindowArg::Day => TimeWindow::Day,
            WindowArg::Week => TimeWindow::Week,
        }
    }
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Browse a catalog category, optionally filtered by genre
#[derive(Args, Debug)]
pub struct BrowseCmd {
    /// Category to browse
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,

    /// Genre key (e.g. "action", "sci-fi"); unknown keys are ignored
    #[arg(long, short = 'g')]
    pub genre: Option<String>,

    /// Result page
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Time window (trending only)
    #[arg(long, short = 'w', value_enum, default_value = "day")]
    pub window: WindowArg,
}

/// Fetch all home-screen movie feeds concurrently
#[derive(Args, Debug)]
pub struct HomeCmd {
    /// Maximum titles per feed
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Search by title text
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,

    /// Release year (movies) or first-air year (TV)
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Result page
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Discover by structured filters
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,

    /// Genre keys, repeatable (e.g. -g action -g sci-fi)
    #[arg(long, short = 'g')]
    pub genre: Vec<String>,

    /// Release year (movies) or first-air year (TV)
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Sort directive (e.g. "popularity.desc", "vote_average.desc")
    #[arg(long, short = 's')]
    pub sort_by: Option<String>,

    /// Result page
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,
}

/// Get detailed information about a movie or TV show
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,

    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,
}

/// A title-scoped sub-resource request (credits, videos, similar, ...)
#[derive(Args, Debug)]
pub struct TitleCmd {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,

    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,
}

/// Episodes of a TV season
#[derive(Args, Debug)]
pub struct SeasonCmd {
    /// TMDB TV show ID
    #[arg(required = true)]
    pub tv_id: u64,

    /// Season number
    #[arg(required = true)]
    pub season: u32,
}

/// A single TV episode
#[derive(Args, Debug)]
pub struct EpisodeCmd {
    /// TMDB TV show ID
    #[arg(required = true)]
    pub tv_id: u64,

    /// Season number
    #[arg(required = true)]
    pub season: u32,

    /// Episode number
    #[arg(required = true)]
    pub episode: u32,
}

/// Person details and combined credits
#[derive(Args, Debug)]
pub struct PersonCmd {
    /// TMDB person ID
    #[arg(required = true)]
    pub id: u64,
}

/// List genre categories
#[derive(Args, Debug)]
pub struct GenresCmd {
    /// Media kind
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,

    /// Fetch the provider's full genre catalog instead of the built-in keys
    #[arg(long, short = 'r')]
    pub remote: bool,
}

/// Manage saved favorites
#[derive(Subcommand, Debug)]
pub enum FavoritesCmd {
    /// Save a title
    Add {
        /// Media kind
        #[arg(value_enum)]
        kind: KindArg,
        /// TMDB ID
        id: u64,
        /// Display title
        title: String,
    },
    /// Remove a saved title
    Remove {
        /// Media kind
        #[arg(value_enum)]
        kind: KindArg,
        /// TMDB ID
        id: u64,
    },
    /// List saved titles
    List,
    /// Remove all saved titles
    Clear,
}

/// Get or set the dark-mode theme flag
#[derive(Args, Debug)]
pub struct ThemeCmd {
    /// New state; omit to print the current one
    #[arg(value_enum)]
    pub set: Option<ThemeState>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeState {
    Dark,
    Light,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_browse_command() {
        let cli = Cli::parse_from([
            "watchwave",
            "browse",
            "top-rated",
            "-k",
            "tv",
            "-g",
            "drama",
            "-p",
            "3",
        ]);
        if let Command::Browse(cmd) = cli.command {
            assert_eq!(cmd.category, CategoryArg::TopRated);
            assert_eq!(cmd.kind, KindArg::Tv);
            assert_eq!(cmd.genre.as_deref(), Some("drama"));
            assert_eq!(cmd.page, 3);
        } else {
            panic!("Expected Browse command");
        }
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["watchwave", "search", "dune", "--year", "2021"]);
        if let Command::Search(cmd) = cli.command {
            assert_eq!(cmd.query, "dune");
            assert_eq!(cmd.year, Some(2021));
            assert_eq!(cmd.kind, KindArg::Movie);
            assert_eq!(cmd.page, 1);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_discover_repeatable_genres() {
        let cli = Cli::parse_from(["watchwave", "discover", "-g", "action", "-g", "sci-fi"]);
        if let Command::Discover(cmd) = cli.command {
            assert_eq!(cmd.genre, vec!["action", "sci-fi"]);
        } else {
            panic!("Expected Discover command");
        }
    }

    #[test]
    fn test_favorites_add() {
        let cli = Cli::parse_from(["watchwave", "favorites", "add", "movie", "438631", "Dune"]);
        if let Command::Favorites(FavoritesCmd::Add { kind, id, title }) = cli.command {
            assert_eq!(kind, KindArg::Movie);
            assert_eq!(id, 438631);
            assert_eq!(title, "Dune");
        } else {
            panic!("Expected Favorites Add command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["watchwave", "--json", "--quiet", "home"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
    }
}
