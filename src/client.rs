use reqwest::Client;
use std::future::Future;
use thiserror::Error;

use crate::data_models::{ErrorBody, SearchRequest, SearchResponse};
use crate::search_engine;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("Error: {0}")]
    Application(String),
    #[error("Malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Anything that can turn a request into a step trace.
pub trait SearchService: Send + Sync + 'static {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, ClientError>> + Send;
}

/// Talks to `POST {base_url}/search`. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(base_url: &str) -> SearchClient {
        SearchClient {
            http: Client::new(),
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchService for SearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        log::debug!("POST {} ({} values)", self.endpoint, request.array.len());
        let res = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = res.status();
        if !status.is_success() {
            let reason = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            };
            log::warn!("search service answered {status}: {reason}");
            return Err(ClientError::Application(reason));
        }

        res.json::<SearchResponse>().await.map_err(ClientError::Decode)
    }
}

/// Runs the search engine in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalService;

impl SearchService for LocalService {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        search_engine::execute(&request.array, request.target)
            .map_err(|e| ClientError::Application(e.to_string()))
    }
}
