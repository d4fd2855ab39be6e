//! Network fetch port definition.

use std::fmt;

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// HTTP method used by resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMethod {
    /// Metadata-only request.
    Head,
    /// Full body request.
    Get,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => write!(f, "HEAD"),
            Self::Get => write!(f, "GET"),
        }
    }
}

/// Expected shape of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Raw text.
    #[default]
    Text,
    /// Pre-parsed JSON.
    Json,
}

/// Outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: FetchMethod,
    /// Absolute URL.
    pub url: String,
    /// Body decoding.
    pub response_type: ResponseType,
}

impl FetchRequest {
    /// Creates HEAD request.
    #[must_use]
    pub fn head(url: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Head,
            url: url.into(),
            response_type: ResponseType::Text,
        }
    }

    /// Creates GET request for a text body.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            response_type: ResponseType::Text,
        }
    }

    /// Creates GET request for a JSON body.
    #[must_use]
    pub fn get_json(url: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            response_type: ResponseType::Json,
        }
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchBody {
    /// No body (HEAD, or undecodable JSON).
    #[default]
    Empty,
    /// Raw text.
    Text(String),
    /// Parsed JSON.
    Json(serde_json::Value),
}

/// Completed response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// URL after following redirects.
    pub final_url: String,
    /// Decoded body.
    pub body: FetchBody,
}

impl FetchResponse {
    /// Returns whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the text body, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            FetchBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            FetchBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Port for cross-origin HTTP requests.
///
/// No retries and no timeout policy are exposed; one call is one round trip.
#[async_trait]
pub trait FetchPort: Send + Sync {
    /// Performs request and returns the completed response.
    async fn request(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Mock fetcher answering from canned responses.
    #[derive(Default)]
    pub struct MockFetcher {
        responses: Mutex<HashMap<(FetchMethod, String), FetchResponse>>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl MockFetcher {
        /// Creates mock with no canned responses; every request fails.
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a response.
        pub fn respond(self, method: FetchMethod, url: &str, response: FetchResponse) -> Self {
            self.responses
                .lock()
                .insert((method, url.to_string()), response);
            self
        }

        /// Registers a text response without redirect.
        pub fn respond_text(self, url: &str, status: u16, body: &str) -> Self {
            let response = FetchResponse {
                status,
                final_url: url.to_string(),
                body: FetchBody::Text(body.to_string()),
            };
            self.respond(FetchMethod::Get, url, response)
        }

        /// Registers a JSON response.
        pub fn respond_json(self, url: &str, status: u16, body: serde_json::Value) -> Self {
            let response = FetchResponse {
                status,
                final_url: url.to_string(),
                body: FetchBody::Json(body),
            };
            self.respond(FetchMethod::Get, url, response)
        }

        /// Registers a HEAD redirect.
        pub fn redirect(self, url: &str, final_url: &str) -> Self {
            let response = FetchResponse {
                status: 200,
                final_url: final_url.to_string(),
                body: FetchBody::Empty,
            };
            self.respond(FetchMethod::Head, url, response)
        }

        /// Returns requests received so far.
        pub fn requests(&self) -> Vec<FetchRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl FetchPort for MockFetcher {
        async fn request(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
            self.requests.lock().push(request.clone());
            self.responses
                .lock()
                .get(&(request.method, request.url.clone()))
                .cloned()
                .ok_or_else(|| FetchError::transport(format!("no mock for {}", request.url)))
        }
    }
}
