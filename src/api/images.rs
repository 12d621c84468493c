//! Image URL construction
//!
//! TMDB returns path fragments like `/74xTEgt7R36Fpooo50r9T25onhq.jpg`; the
//! full URL is assembled from the CDN host and a size token. A missing path
//! means the image does not exist and must resolve to `None`, never to a
//! malformed URL.

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Default poster size token.
pub const POSTER_SIZE: &str = "w500";
/// Default backdrop size token.
pub const BACKDROP_SIZE: &str = "w1280";

/// Build a CDN image URL from a path fragment and size token.
pub fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", IMAGE_BASE, size, p))
}

/// Poster URL at the default `w500` size.
pub fn poster_url(path: Option<&str>) -> Option<String> {
    image_url(path, POSTER_SIZE)
}

/// Backdrop URL at the default `w1280` size.
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    image_url(path, BACKDROP_SIZE)
}
