use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use shared::{Flow, TourError};
use tracing::{debug, error};
use url::Url;

/// Fetches and parses a flow file.
#[async_trait]
pub trait FlowLoader: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Flow, TourError>;
}

fn fetch_error(location: &str, message: impl ToString) -> TourError {
    TourError::Fetch {
        url: location.to_string(),
        message: message.to_string(),
    }
}

fn parse_flow(location: &str, raw: &str) -> Result<Flow, TourError> {
    Flow::from_json(raw).map_err(|e| TourError::Parse {
        url: location.to_string(),
        message: e.to_string(),
    })
}

pub struct HttpFlowLoader {
    http: Client,
}

impl HttpFlowLoader {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for HttpFlowLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowLoader for HttpFlowLoader {
    async fn fetch(&self, location: &str) -> Result<Flow, TourError> {
        let response = self
            .http
            .get(location)
            .send()
            .await
            .map_err(|e| fetch_error(location, e))?;
        let status = response.status();
        if !status.is_success() {
            error!(url = %location, %status, "tour: flow request failed");
            return Err(fetch_error(location, format!("unexpected status {status}")));
        }
        let raw = response.text().await.map_err(|e| fetch_error(location, e))?;
        let flow = parse_flow(location, &raw)?;
        debug!(url = %location, slides = flow.len(), "tour: flow fetched");
        Ok(flow)
    }
}

/// Reads flow files from disk; accepts plain paths and `file://` URLs.
#[derive(Debug, Default)]
pub struct FileFlowLoader;

impl FileFlowLoader {
    fn path_for(location: &str) -> Result<PathBuf, TourError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| fetch_error(location, "invalid file url")),
            _ => Ok(PathBuf::from(location)),
        }
    }
}

#[async_trait]
impl FlowLoader for FileFlowLoader {
    async fn fetch(&self, location: &str) -> Result<Flow, TourError> {
        let path = Self::path_for(location)?;
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| fetch_error(location, e))?;
        let flow = parse_flow(location, &raw)?;
        debug!(path = %path.display(), slides = flow.len(), "tour: flow read");
        Ok(flow)
    }
}

/// Picks the HTTP or file loader from the location's scheme.
#[derive(Default)]
pub struct AutoFlowLoader {
    http: HttpFlowLoader,
    file: FileFlowLoader,
}

impl AutoFlowLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn is_remote(location: &str) -> bool {
    Url::parse(location)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[async_trait]
impl FlowLoader for AutoFlowLoader {
    async fn fetch(&self, location: &str) -> Result<Flow, TourError> {
        if is_remote(location) {
            self.http.fetch(location).await
        } else {
            self.file.fetch(location).await
        }
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
