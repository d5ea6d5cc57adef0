use chrono::{DateTime, Utc};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Season/episode code, e.g. `S01E01`.
    pub episode: String,
    pub url: Url,
    pub created: DateTime<Utc>,
    /// Character references, resolved lazily one URL at a time.
    pub characters: Vec<Url>,
}
