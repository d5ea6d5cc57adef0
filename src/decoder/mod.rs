//! Wire-format mapping between the API's JSON and the domain models.
//!
//! The remote structs mirror the JSON exactly (`air_date`, `type`, the
//! `info`/`results` envelope); the domain never sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;
use crate::domain::{Character, Episode, Location, Page, PageInfo};

/// Decodes an episode page envelope.
pub fn decode_episode_page(body: &[u8]) -> Result<Page<Episode>> {
    let remote: RemotePage<RemoteEpisode> = serde_json::from_slice(body)?;
    Ok(remote.into())
}

/// Decodes a single character resource.
pub fn decode_character(body: &[u8]) -> Result<Character> {
    let remote: RemoteCharacter = serde_json::from_slice(body)?;
    Ok(remote.into())
}

/// Passes the body through untouched (image bytes).
pub fn decode_raw(body: &[u8]) -> Result<Vec<u8>> {
    Ok(body.to_vec())
}

/// Encodes an episode page back into the API's wire JSON.
pub fn encode_episode_page(page: &Page<Episode>) -> Result<Vec<u8>> {
    let remote = RemotePage::<RemoteEpisode>::from(page.clone());
    Ok(serde_json::to_vec(&remote)?)
}

/// Encodes a character back into the API's wire JSON.
pub fn encode_character(character: &Character) -> Result<Vec<u8>> {
    let remote = RemoteCharacter::from(character.clone());
    Ok(serde_json::to_vec(&remote)?)
}

#[derive(Debug, Serialize, Deserialize)]
struct RemotePage<T> {
    info: RemotePageInfo,
    results: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RemotePageInfo {
    count: u32,
    pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prev: Option<Url>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RemoteEpisode {
    id: u32,
    name: String,
    air_date: String,
    episode: String,
    url: Url,
    created: DateTime<Utc>,
    characters: Vec<Url>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RemoteCharacter {
    id: u32,
    name: String,
    status: String,
    species: String,
    #[serde(rename = "type")]
    kind: String,
    gender: String,
    origin: RemoteLocation,
    location: RemoteLocation,
    image: Url,
    created: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RemoteLocation {
    name: String,
    #[serde(with = "empty_as_none")]
    url: Option<Url>,
}

mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S: Serializer>(url: &Option<Url>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(url.as_ref().map(Url::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        Url::parse(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

impl<R, T> From<RemotePage<R>> for Page<T>
where
    R: Into<T>,
{
    fn from(remote: RemotePage<R>) -> Self {
        Page {
            info: PageInfo {
                count: remote.info.count,
                pages: remote.info.pages,
                prev: remote.info.prev,
                next: remote.info.next,
            },
            results: remote.results.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Page<Episode>> for RemotePage<RemoteEpisode> {
    fn from(page: Page<Episode>) -> Self {
        RemotePage {
            info: RemotePageInfo {
                count: page.info.count,
                pages: page.info.pages,
                next: page.info.next,
                prev: page.info.prev,
            },
            results: page.results.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RemoteEpisode> for Episode {
    fn from(remote: RemoteEpisode) -> Self {
        Episode {
            id: remote.id,
            name: remote.name,
            air_date: remote.air_date,
            episode: remote.episode,
            url: remote.url,
            created: remote.created,
            characters: remote.characters,
        }
    }
}

impl From<Episode> for RemoteEpisode {
    fn from(episode: Episode) -> Self {
        RemoteEpisode {
            id: episode.id,
            name: episode.name,
            air_date: episode.air_date,
            episode: episode.episode,
            url: episode.url,
            created: episode.created,
            characters: episode.characters,
        }
    }
}

impl From<RemoteCharacter> for Character {
    fn from(remote: RemoteCharacter) -> Self {
        Character {
            id: remote.id,
            name: remote.name,
            status: remote.status,
            species: remote.species,
            kind: remote.kind,
            gender: remote.gender,
            origin: remote.origin.into(),
            location: remote.location.into(),
            image: remote.image,
            created: remote.created,
        }
    }
}

impl From<Character> for RemoteCharacter {
    fn from(character: Character) -> Self {
        RemoteCharacter {
            id: character.id,
            name: character.name,
            status: character.status,
            species: character.species,
            kind: character.kind,
            gender: character.gender,
            origin: character.origin.into(),
            location: character.location.into(),
            image: character.image,
            created: character.created,
        }
    }
}

impl From<RemoteLocation> for Location {
    fn from(remote: RemoteLocation) -> Self {
        Location {
            name: remote.name,
            url: remote.url,
        }
    }
}

impl From<Location> for RemoteLocation {
    fn from(location: Location) -> Self {
        RemoteLocation {
            name: location.name,
            url: location.url,
        }
    }
}
