//! Provider-specific URL pattern extraction.

use regex::Regex;
use std::sync::LazyLock;

static SHORT_VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/video/(\d+)").expect("valid short video regex"));

static POST_SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"instagram\.com/(?:p|reel|reels)/([a-zA-Z0-9_-]+)")
        .expect("valid post shortcode regex")
});

static LONG_FORM_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|v/|embed/|youtu\.be/)([a-zA-Z0-9_-]{11})")
        .expect("valid long form video regex")
});

const SHORT_LINK_HOSTS: [&str; 2] = ["vm.tiktok.com/", "vt.tiktok.com/"];

/// Returns whether the URL is a shortener variant needing a redirect hop.
#[must_use]
pub fn is_short_video_redirect(url: &str) -> bool {
    SHORT_LINK_HOSTS.iter().any(|host| url.contains(host))
}

/// Returns whether the URL contains a video path segment.
#[must_use]
pub fn has_video_path(url: &str) -> bool {
    url.contains("/video/")
}

/// Extracts the numeric short video id.
#[must_use]
pub fn short_video_id(url: &str) -> Option<&str> {
    SHORT_VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts the post shortcode from a `p`, `reel` or `reels` path.
#[must_use]
pub fn post_shortcode(url: &str) -> Option<&str> {
    POST_SHORTCODE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts the 11 character long form video id.
#[must_use]
pub fn long_form_video_id(url: &str) -> Option<&str> {
    LONG_FORM_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrites the URL host, keeping path and query.
#[must_use]
pub fn with_host(url: &str, host: &str) -> Option<String> {
    let mut parsed = url::Url::parse(url).ok()?;
    parsed.set_host(Some(host)).ok()?;
    Some(parsed.into())
}
