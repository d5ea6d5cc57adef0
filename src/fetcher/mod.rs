pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// A single HTTP response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Performs one GET against the API.
///
/// Implementations return `Ok` for every HTTP response they receive, including
/// non-2xx statuses, and `Err` only when no response was obtained (DNS, TCP,
/// TLS, timeout).
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}
