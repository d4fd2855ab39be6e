//! Provider classification tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Social platform a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Short-form vertical video (TikTok).
    ShortVideo,
    /// Photo, album or reel post (Instagram).
    PhotoVideoPost,
    /// Long-form video (YouTube).
    LongFormVideo,
    /// Microblog post (Twitter / X).
    Microblog,
    /// Not a supported provider.
    Unknown,
}

impl ProviderKind {
    /// Providers that can be toggled and embedded.
    pub const SUPPORTED: [Self; 4] = [
        Self::ShortVideo,
        Self::PhotoVideoPost,
        Self::LongFormVideo,
        Self::Microblog,
    ];

    /// Human-facing platform name.
    #[must_use]
    pub const fn platform_name(self) -> &'static str {
        match self {
            Self::ShortVideo => "TikTok",
            Self::PhotoVideoPost => "Instagram",
            Self::LongFormVideo => "YouTube",
            Self::Microblog => "Twitter / X",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortVideo => write!(f, "short-video"),
            Self::PhotoVideoPost => write!(f, "photo-video-post"),
            Self::LongFormVideo => write!(f, "long-form-video"),
            Self::Microblog => write!(f, "microblog"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    /// Accepts either the kind name or the platform name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short-video" | "tiktok" => Ok(Self::ShortVideo),
            "photo-video-post" | "instagram" => Ok(Self::PhotoVideoPost),
            "long-form-video" | "youtube" => Ok(Self::LongFormVideo),
            "microblog" | "twitter" | "x" => Ok(Self::Microblog),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_aliases() {
        assert_eq!("TikTok".parse::<ProviderKind>(), Ok(ProviderKind::ShortVideo));
        assert_eq!("x".parse::<ProviderKind>(), Ok(ProviderKind::Microblog));
        assert_eq!(
            "long-form-video".parse::<ProviderKind>(),
            Ok(ProviderKind::LongFormVideo)
        );
        assert!("vimeo".parse::<ProviderKind>().is_err());
    }
}
