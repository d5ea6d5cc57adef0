use std::sync::Arc;

use url::Url;

use crate::app::error::Result;
use crate::cache::ViewCache;
use crate::config::Config;
use crate::features::{CharacterCard, EpisodeFeed, LoadOptions};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher>,
    cards: ViewCache<CharacterCard>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.api)?);
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        let cards = ViewCache::new(config.cache.capacity()?);

        Ok(Self {
            config,
            fetcher,
            cards,
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::from_config(&self.config)
    }

    /// A fresh feed starting at the API's episode endpoint.
    pub fn episode_feed(&self) -> Result<EpisodeFeed> {
        let url = self.config.api.endpoint("episode")?;
        Ok(EpisodeFeed::new(
            url,
            Arc::clone(&self.fetcher),
            self.load_options(),
            &self.config.tracking.labels,
        ))
    }

    /// The card for `url`, shared with every other caller while it is cached.
    pub fn character_card(&self, url: &Url) -> Arc<CharacterCard> {
        self.cards.get_or_insert_with(url, || {
            CharacterCard::new(url.clone(), Arc::clone(&self.fetcher), self.load_options())
        })
    }
}
