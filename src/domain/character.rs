use chrono::{DateTime, Utc};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    pub kind: String,
    pub gender: String,
    pub origin: Location,
    pub location: Location,
    pub image: Url,
    pub created: DateTime<Utc>,
}

impl Character {
    pub fn is_alive(&self) -> bool {
        self.status == "Alive"
    }
}

/// A `{name, url}` pair. The API reports unknown places with an empty URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub url: Option<Url>,
}
