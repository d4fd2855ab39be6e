//! URL to provider classification.

use crate::domain::entities::ProviderKind;

/// Maps a URL to its provider. Total, deterministic and side-effect free.
#[must_use]
pub fn classify(url: &str) -> ProviderKind {
    if url.contains("tiktok.com/") {
        ProviderKind::ShortVideo
    } else if url.contains("instagram.com/") {
        ProviderKind::PhotoVideoPost
    } else if url.contains("youtube.com/") || url.contains("youtu.be/") {
        ProviderKind::LongFormVideo
    } else if url.contains("twitter.com/") || url.contains("x.com/") {
        ProviderKind::Microblog
    } else {
        ProviderKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://www.tiktok.com/@user/video/1234567890123456789", ProviderKind::ShortVideo ; "tiktok_canonical")]
    #[test_case("https://vm.tiktok.com/ZMabcdefg/", ProviderKind::ShortVideo ; "tiktok_short")]
    #[test_case("https://www.instagram.com/p/ABC123xyz/", ProviderKind::PhotoVideoPost ; "instagram_post")]
    #[test_case("https://www.youtube.com/watch?v=dQw4w9WgXcQ", ProviderKind::LongFormVideo ; "youtube_watch")]
    #[test_case("https://youtu.be/dQw4w9WgXcQ", ProviderKind::LongFormVideo ; "youtube_short")]
    #[test_case("https://twitter.com/user/status/1", ProviderKind::Microblog ; "twitter")]
    #[test_case("https://x.com/user/status/1", ProviderKind::Microblog ; "x")]
    #[test_case("https://www.jeuxvideo.com/forums/0-51-0-1-0-1-0-blabla.htm", ProviderKind::Unknown ; "forum_link")]
    #[test_case("", ProviderKind::Unknown ; "empty")]
    #[test_case("not a url at all", ProviderKind::Unknown ; "garbage")]
    fn test_classify(url: &str, expected: ProviderKind) {
        assert_eq!(classify(url), expected);
    }

    #[test]
    fn test_host_without_path_separator_is_unknown() {
        assert_eq!(classify("https://tiktok.com"), ProviderKind::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let urls = [
            "https://www.tiktok.com/@a/video/1",
            "https://youtu.be/abc",
            "https://example.org/x.com/",
            "\u{1F600}",
        ];
        for url in urls {
            assert_eq!(classify(url), classify(url));
        }
    }
}
