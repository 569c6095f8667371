//! HTTP Transport
//!
//! The seam between the dispatcher and the actual network. Production uses
//! reqwest; tests inject recording or failing transports.

use std::future::Future;

use reqwest::{Client, Method, Url};

use crate::error::{RecipeError, Result};

// == Request Target ==
/// Describes one outbound call to the recipe provider.
#[derive(Debug, Clone)]
pub struct RequestTarget {
    pub method: Method,
    pub url: Url,
}

impl RequestTarget {
    /// Creates a GET target (the only method the provider API needs).
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }
}

// == Provider Response ==
/// A completed HTTP exchange: status and raw body.
///
/// Carries error statuses too. The dispatcher resolves any response it
/// received; interpreting the status is the caller's job.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Transport Trait ==
/// Executes one HTTP exchange.
///
/// An `Err` means a transport-level failure (connectivity, aborted
/// connection) and is the only thing the dispatcher retries. HTTP error
/// statuses come back as `Ok` responses.
pub trait Transport: Send + Sync + 'static {
    fn fetch(
        &self,
        target: RequestTarget,
    ) -> impl Future<Output = Result<ProviderResponse>> + Send;
}

// == Reqwest Transport ==
/// Production transport backed by a reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default reqwest settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport over a custom reqwest client.
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn fetch(
        &self,
        target: RequestTarget,
    ) -> impl Future<Output = Result<ProviderResponse>> + Send {
        let client = self.client.clone();
        async move {
            let response = client
                .request(target.method, target.url)
                .send()
                .await
                .map_err(|e| RecipeError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| RecipeError::Transport(e.to_string()))?;

            Ok(ProviderResponse { status, body })
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_boundaries() {
        let mk = |status| ProviderResponse {
            status,
            body: String::new(),
        };

        assert!(mk(200).is_success());
        assert!(mk(299).is_success());
        assert!(!mk(199).is_success());
        assert!(!mk(301).is_success());
        assert!(!mk(402).is_success());
    }

    #[test]
    fn test_get_target() {
        let url = Url::parse("https://api.example.com/recipes/findByIngredients").unwrap();
        let target = RequestTarget::get(url.clone());

        assert_eq!(target.method, Method::GET);
        assert_eq!(target.url, url);
    }
}
