//! Loading forum pages from disk or the network.

use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;
use url::Url;

use crate::domain::errors::FetchError;
use crate::domain::ports::{FetchPort, FetchRequest};

/// Page loading error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PageError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("page request returned status {status}")]
    Status { status: u16 },

    #[error("page response had no body")]
    EmptyBody,
}

/// Where a page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Local HTML file.
    File(PathBuf),
    /// Remote page.
    Remote(Url),
}

impl PageSource {
    /// Interprets an `http(s)` input as a URL, anything else as a path.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::File(PathBuf::from(input)),
        }
    }

    /// URL relative links resolve against, if known.
    #[must_use]
    pub fn base_url(&self) -> Option<Url> {
        match self {
            Self::File(_) => None,
            Self::Remote(url) => Some(url.clone()),
        }
    }

    /// Reads the page markup.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the request fails.
    pub async fn load(&self, fetch: &dyn FetchPort) -> Result<String, PageError> {
        match self {
            Self::File(path) => fs::read_to_string(path).await.map_err(|source| PageError::Io {
                path: path.clone(),
                source,
            }),
            Self::Remote(url) => {
                let response = fetch.request(FetchRequest::get(url.as_str())).await?;
                if !response.is_success() {
                    return Err(PageError::Status {
                        status: response.status,
                    });
                }
                response
                    .text()
                    .map(str::to_string)
                    .ok_or(PageError::EmptyBody)
            }
        }
    }
}

impl std::fmt::Display for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockFetcher;
    use tempfile::tempdir;

    #[test]
    fn test_parse_distinguishes_urls_from_paths() {
        assert!(matches!(
            PageSource::parse("https://www.jeuxvideo.com/forums/1.htm"),
            PageSource::Remote(_)
        ));
        assert_eq!(
            PageSource::parse("saved/page.html"),
            PageSource::File(PathBuf::from("saved/page.html"))
        );
        assert!(matches!(PageSource::parse("C:\\page.html"), PageSource::File(_)));
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>hi</p>").unwrap();

        let page = PageSource::File(path).load(&MockFetcher::new()).await.unwrap();
        assert_eq!(page, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_load_remote_rejects_error_status() {
        let fetcher =
            MockFetcher::new().respond_text("https://www.jeuxvideo.com/forums/1.htm", 410, "gone");

        let result = PageSource::parse("https://www.jeuxvideo.com/forums/1.htm")
            .load(&fetcher)
            .await;

        assert!(matches!(result, Err(PageError::Status { status: 410 })));
    }

    #[tokio::test]
    async fn test_load_remote_returns_body() {
        let fetcher =
            MockFetcher::new().respond_text("https://www.jeuxvideo.com/forums/1.htm", 200, "<p/>");

        let page = PageSource::parse("https://www.jeuxvideo.com/forums/1.htm")
            .load(&fetcher)
            .await
            .unwrap();

        assert_eq!(page, "<p/>");
    }
}
