//! Wire types of the `/character` endpoint and their conversion into domain types

use crate::types::{Character, CharacterId, Gender, Page, PageInfo, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Top-level page payload
#[derive(Debug, Deserialize)]
pub(crate) struct CharactersPageResponse {
    pub(crate) info: PageInfoResponse,
    pub(crate) results: Vec<CharacterResponse>,
}

/// Pagination block
#[derive(Debug, Deserialize)]
pub(crate) struct PageInfoResponse {
    pub(crate) count: u32,
    pub(crate) pages: u32,
    pub(crate) next: Option<Url>,
    pub(crate) prev: Option<Url>,
}

/// One character as the API sends it
///
/// Fields the feed never shows (type, episode list, resource URL) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CharacterResponse {
    pub(crate) id: u32,
    pub(crate) name: String,
    #[serde(deserialize_with = "status_from_api")]
    pub(crate) status: Status,
    pub(crate) species: String,
    #[serde(deserialize_with = "gender_from_api")]
    pub(crate) gender: Gender,
    #[serde(default)]
    pub(crate) origin: Option<ReferenceResponse>,
    #[serde(default)]
    pub(crate) location: Option<ReferenceResponse>,
    #[serde(default)]
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) created: Option<DateTime<Utc>>,
}

/// Named link to another resource (origin, location)
#[derive(Debug, Deserialize)]
pub(crate) struct ReferenceResponse {
    pub(crate) name: String,
}

/// Body of a non-2xx response, e.g. `{"error": "There is nothing here"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) error: String,
}

fn status_from_api<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Status::from_api(&raw))
}

fn gender_from_api<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Gender::from_api(&raw))
}

fn reference_name(reference: Option<ReferenceResponse>) -> Option<String> {
    reference
        .map(|r| r.name)
        .filter(|name| !name.trim().is_empty())
}

impl From<CharacterResponse> for Character {
    fn from(dto: CharacterResponse) -> Self {
        Character {
            id: CharacterId(dto.id),
            name: dto.name,
            status: dto.status,
            species: dto.species,
            gender: dto.gender,
            image: dto.image.and_then(|raw| Url::parse(&raw).ok()),
            location: reference_name(dto.location),
            origin: reference_name(dto.origin),
            created: dto.created,
        }
    }
}

impl From<CharactersPageResponse> for Page {
    fn from(dto: CharactersPageResponse) -> Self {
        Page {
            info: PageInfo {
                count: dto.info.count,
                pages: dto.info.pages,
                next: dto.info.next,
                prev: dto.info.prev,
            },
            results: dto.results.into_iter().map(Character::from).collect(),
        }
    }
}
