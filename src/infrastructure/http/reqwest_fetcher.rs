//! `reqwest` adapter for the fetch port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use tracing::debug;

use crate::domain::errors::FetchError;
use crate::domain::ports::{
    FetchBody, FetchMethod, FetchPort, FetchRequest, FetchResponse, ResponseType,
};

const MAX_REDIRECTS: usize = 10;

/// HTTP client following redirects, reporting the final URL.
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates fetcher with the given user agent and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

fn map_transport_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect {
            message: e.to_string(),
        }
    } else {
        FetchError::transport(e.to_string())
    }
}

#[async_trait]
impl FetchPort for ReqwestFetcher {
    async fn request(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|_| FetchError::invalid_url(&request.url))?;

        let builder = match request.method {
            FetchMethod::Head => self.client.head(url),
            FetchMethod::Get => self.client.get(url),
        };

        let response = builder.send().await.map_err(|e| {
            debug!(url = %request.url, error = %e, "Request failed");
            map_transport_error(&e)
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = match (request.method, request.response_type) {
            (FetchMethod::Head, _) => FetchBody::Empty,
            (FetchMethod::Get, ResponseType::Text) => {
                FetchBody::Text(response.text().await.map_err(|e| map_transport_error(&e))?)
            }
            (FetchMethod::Get, ResponseType::Json) => {
                let text = response.text().await.map_err(|e| map_transport_error(&e))?;
                match serde_json::from_str(&text) {
                    Ok(value) => FetchBody::Json(value),
                    Err(e) => {
                        debug!(url = %request.url, error = %e, "Response is not valid JSON");
                        FetchBody::Empty
                    }
                }
            }
        };

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            final_url = %final_url,
            "Request completed"
        );

        Ok(FetchResponse {
            status,
            final_url,
            body,
        })
    }
}
