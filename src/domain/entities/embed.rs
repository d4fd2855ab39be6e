//! Embed descriptors and the container markup they render to.

use serde::{Deserialize, Serialize};

/// CSS class shared by every embed container.
pub const CONTAINER_CLASS: &str = "jvc-embed-container";

/// Named visual sizing profile applied to an embed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizingClass {
    /// Vertical player, max-width 340, height 600.
    VerticalPlayer,
    /// 16:9 aspect ratio via the padding trick, max-width 640.
    Widescreen,
    /// Direct video element, max-width 420.
    NativeVideo,
    /// Official post iframe, max-width 540, height 620.
    PostFrame,
    /// Microblog markup, natural height.
    Microblog,
}

impl SizingClass {
    /// Returns the CSS class name.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::VerticalPlayer => "tiktok-iframe-embed",
            Self::Widescreen => "ratio-16-9",
            Self::NativeVideo => "instagram-native-embed",
            Self::PostFrame => "instagram-iframe-embed",
            Self::Microblog => "twitter-embed",
        }
    }
}

/// Third-party script needed to hydrate raw markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalScript {
    /// Microblog widgets script.
    MicroblogWidgets,
}

/// Iframe embed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IframeEmbed {
    /// Embed page URL.
    pub src: String,
    /// Container sizing.
    pub sizing: SizingClass,
    /// Permissions policy (`allow` attribute).
    pub allow: Option<String>,
    /// Whether fullscreen is permitted.
    pub allow_fullscreen: bool,
    /// Whether the frame may scroll.
    pub scrolling: bool,
    /// Fixed frame height in pixels.
    pub height_px: Option<u32>,
}

/// Renderer-ready representation of a link's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbedDescriptor {
    /// Third-party embed page in an iframe.
    Iframe(IframeEmbed),
    /// Direct media URL played by a video element with controls and loop.
    NativeVideo {
        /// Media URL.
        src: String,
    },
    /// Ready-made markup injected verbatim.
    RawMarkup {
        /// HTML fragment.
        html: String,
        /// Script required to render the fragment.
        external_script: Option<ExternalScript>,
    },
}

impl EmbedDescriptor {
    /// Returns the sizing class of the container.
    #[must_use]
    pub const fn sizing(&self) -> SizingClass {
        match self {
            Self::Iframe(frame) => frame.sizing,
            Self::NativeVideo { .. } => SizingClass::NativeVideo,
            Self::RawMarkup { .. } => SizingClass::Microblog,
        }
    }

    /// Returns whether rendering requires an external script.
    #[must_use]
    pub const fn needs_external_script(&self) -> bool {
        matches!(
            self,
            Self::RawMarkup {
                external_script: Some(_),
                ..
            }
        )
    }

    /// Returns the embed source URL, if any.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Iframe(frame) => Some(&frame.src),
            Self::NativeVideo { src } => Some(src),
            Self::RawMarkup { .. } => None,
        }
    }
}

/// Container element inserted right after a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedContainer {
    sizing: SizingClass,
    inner_html: String,
}

impl EmbedContainer {
    /// Creates container with pre-rendered inner markup.
    #[must_use]
    pub fn new(sizing: SizingClass, inner_html: impl Into<String>) -> Self {
        Self {
            sizing,
            inner_html: inner_html.into(),
        }
    }

    /// Returns container sizing.
    #[must_use]
    pub const fn sizing(&self) -> SizingClass {
        self.sizing
    }

    /// Returns inner markup.
    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Serializes the whole container.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{CONTAINER_CLASS} {}">{}</div>"#,
            self.sizing.css_class(),
            self.inner_html
        )
    }
}

/// Escapes a string for use inside a double-quoted attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a string for use as element text.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_html_carries_sizing_class() {
        let container = EmbedContainer::new(SizingClass::Widescreen, "<iframe></iframe>");
        assert_eq!(
            container.to_html(),
            r#"<div class="jvc-embed-container ratio-16-9"><iframe></iframe></div>"#
        );
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute(r#"a"b&c<d>"#),
            "a&quot;b&amp;c&lt;d&gt;"
        );
    }

    #[test]
    fn test_raw_markup_script_flag() {
        let with_script = EmbedDescriptor::RawMarkup {
            html: "<blockquote></blockquote>".to_string(),
            external_script: Some(ExternalScript::MicroblogWidgets),
        };
        let video = EmbedDescriptor::NativeVideo {
            src: "https://cdn.example/v.mp4".to_string(),
        };
        assert!(with_script.needs_external_script());
        assert!(!video.needs_external_script());
        assert_eq!(video.sizing(), SizingClass::NativeVideo);
    }
}
