use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use crate::app::Result;
use crate::decoder;
use crate::domain::{Character, Episode, Page};
use crate::fetcher::Fetcher;
use crate::loader::{LoadError, Loader};

/// Turns a response body into a domain item.
pub type Decode<T> = fn(&[u8]) -> Result<T>;

/// Loads one resource from one URL.
///
/// Transport failures become [`LoadError::Connectivity`]; a non-200 status or
/// an undecodable body becomes [`LoadError::InvalidData`]. Nothing is retried.
pub struct RemoteLoader<T> {
    url: Url,
    fetcher: Arc<dyn Fetcher>,
    decode: Decode<T>,
}

impl<T> RemoteLoader<T> {
    pub fn new(url: Url, fetcher: Arc<dyn Fetcher>, decode: Decode<T>) -> Self {
        Self {
            url,
            fetcher,
            decode,
        }
    }
}

impl RemoteLoader<Page<Episode>> {
    pub fn episodes(url: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(url, fetcher, decoder::decode_episode_page)
    }
}

impl RemoteLoader<Character> {
    pub fn character(url: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(url, fetcher, decoder::decode_character)
    }
}

impl RemoteLoader<Vec<u8>> {
    pub fn image(url: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(url, fetcher, decoder::decode_raw)
    }
}

#[async_trait]
impl<T> Loader for RemoteLoader<T>
where
    T: Send,
{
    type Item = T;

    async fn load(&self) -> std::result::Result<T, LoadError> {
        let response = self.fetcher.get(&self.url).await.map_err(|e| {
            warn!("Request to {} failed: {}", self.url, e);
            LoadError::Connectivity
        })?;

        if !response.is_ok() {
            warn!("Unexpected status {} from {}", response.status, self.url);
            return Err(LoadError::InvalidData);
        }

        (self.decode)(&response.body).map_err(|e| {
            warn!("Could not decode response from {}: {}", self.url, e);
            LoadError::InvalidData
        })
    }
}
