//! Genre category mapping
//!
//! TMDB uses separate genre ID spaces for movies and TV: "action" is 28 for
//! movies but 10759 (Action & Adventure) for TV, and several TV categories
//! (reality, soap, talk) have no movie counterpart. The tables below are
//! fixed at compile time and looked up case-sensitively.

use crate::api::query::MediaKind;

/// Human category key -> movie genre ID.
const MOVIE_GENRES: &[(&str, u32)] = &[
    ("action", 28),
    ("comedy", 35),
    ("drama", 18),
    ("horror", 27),
    ("romance", 10749),
    ("sci-fi", 878),
    ("thriller", 53),
];

/// Human category key -> TV genre ID.
const TV_GENRES: &[(&str, u32)] = &[
    ("action", 10759),
    ("comedy", 35),
    ("drama", 18),
    ("sci-fi", 10765),
    ("fantasy", 10765),
    ("crime", 80),
    ("documentary", 99),
    ("family", 10751),
    ("kids", 10762),
    ("mystery", 9648),
    ("news", 10763),
    ("reality", 10764),
    ("soap", 10766),
    ("talk", 10767),
    ("war", 10768),
    ("western", 37),
];

/// Resolve a human-friendly genre key to the provider's integer ID.
///
/// Unknown keys resolve to `None`, which callers treat as "no genre filter".
pub fn resolve(kind: MediaKind, key: &str) -> Option<u32> {
    let table = match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Tv => TV_GENRES,
    };
    table.iter().find(|(k, _)| *k == key).map(|(_, id)| *id)
}

/// All known genre keys for a media kind, in table order.
pub fn known_keys(kind: MediaKind) -> Vec<&'static str> {
    let table = match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Tv => TV_GENRES,
    };
    table.iter().map(|(k, _)| *k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_ids_are_stable() {
        assert_eq!(resolve(MediaKind::Movie, "action"), Some(28));
        assert_eq!(resolve(MediaKind::Movie, "comedy"), Some(35));
        assert_eq!(resolve(MediaKind::Movie, "drama"), Some(18));
        assert_eq!(resolve(MediaKind::Movie, "horror"), Some(27));
        assert_eq!(resolve(MediaKind::Movie, "romance"), Some(10749));
        assert_eq!(resolve(MediaKind::Movie, "sci-fi"), Some(878));
        assert_eq!(resolve(MediaKind::Movie, "thriller"), Some(53));
    }

    #[test]
    fn test_tv_ids_are_stable() {
        assert_eq!(resolve(MediaKind::Tv, "action"), Some(10759));
        assert_eq!(resolve(MediaKind::Tv, "sci-fi"), Some(10765));
        assert_eq!(resolve(MediaKind::Tv, "fantasy"), Some(10765));
        assert_eq!(resolve(MediaKind::Tv, "reality"), Some(10764));
        assert_eq!(resolve(MediaKind::Tv, "soap"), Some(10766));
        assert_eq!(resolve(MediaKind::Tv, "western"), Some(37));
    }

    #[test]
    fn test_id_spaces_differ_between_kinds() {
        assert_ne!(
            resolve(MediaKind::Movie, "action"),
            resolve(MediaKind::Tv, "action")
        );
    }

    #[test]
    fn test_unknown_keys_resolve_to_none() {
        assert_eq!(resolve(MediaKind::Movie, "reality"), None);
        assert_eq!(resolve(MediaKind::Movie, "Action"), None); // case-sensitive
        assert_eq!(resolve(MediaKind::Tv, "horror"), None);
        assert_eq!(resolve(MediaKind::Tv, ""), None);
    }

    #[test]
    fn test_known_keys_resolve() {
        for key in known_keys(MediaKind::Movie) {
            assert!(resolve(MediaKind::Movie, key).is_some());
        }
        for key in known_keys(MediaKind::Tv) {
            assert!(resolve(MediaKind::Tv, key).is_some());
        }
    }
}
