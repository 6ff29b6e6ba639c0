//! Core domain types for rickmorty-feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Unique identifier for a character
///
/// This is the sole identity key for list diffing in the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Create a new CharacterId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner u32 value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<CharacterId> for u32 {
    fn from(id: CharacterId) -> Self {
        id.0
    }
}

impl PartialEq<u32> for CharacterId {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character life status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Alive
    Alive,
    /// Dead
    Dead,
    /// Not known to the catalog
    Unknown,
}

impl Status {
    /// Lowercase name, as the API expects in the `status` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    /// Parse an API value case-insensitively; anything unrecognised is `Unknown`
    pub fn from_api(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alive" => Status::Alive,
            "dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character gender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female
    Female,
    /// Male
    Male,
    /// Genderless
    Genderless,
    /// Not known to the catalog
    Unknown,
}

impl Gender {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }

    /// Parse an API value case-insensitively; anything unrecognised is `Unknown`
    pub fn from_api(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "female" => Gender::Female,
            "male" => Gender::Male,
            "genderless" => Gender::Genderless,
            _ => Gender::Unknown,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identity
    pub id: CharacterId,
    /// Display name
    pub name: String,
    /// Life status
    pub status: Status,
    /// Species (free text, e.g. "Human")
    pub species: String,
    /// Gender
    pub gender: Gender,
    /// Avatar image
    pub image: Option<Url>,
    /// Last known location name
    pub location: Option<String>,
    /// Origin location name
    pub origin: Option<String>,
    /// When the catalog entry was created
    pub created: Option<DateTime<Utc>>,
}

/// Pagination metadata of a [`Page`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of characters matching the query
    pub count: u32,
    /// Total number of pages
    pub pages: u32,
    /// Link to the next page; `None` on the last page
    pub next: Option<Url>,
    /// Link to the previous page; `None` on the first page
    pub prev: Option<Url>,
}

/// One fetch result: a slice of characters plus pagination metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Pagination metadata
    pub info: PageInfo,
    /// Characters in server order
    pub results: Vec<Character>,
}

impl Page {
    /// Whether the server reported a further page
    ///
    /// This is the only termination signal for incremental loading.
    pub fn has_next(&self) -> bool {
        self.info.next.is_some()
    }
}
