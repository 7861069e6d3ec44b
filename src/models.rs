use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The only season present in the catalog.
pub const SEASON: i32 = 8;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub quality: String,
    pub source: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct Episode {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub season: i32,
    pub episode: i32,
    #[serde(rename = "airDate")]
    pub air_date: NaiveDate,
    pub links: Vec<Link>,
}

impl Episode {
    /// Short code shown on cards and in the episode selector, e.g. `S8E1`.
    pub fn code(&self) -> String {
        format!("S{}E{}", self.season, self.episode)
    }
}

/// A stored link row as returned by the submission endpoint.
#[derive(Serialize, Clone, Debug)]
pub struct CreatedLink {
    pub id: i32,
    pub episode_id: i32,
    pub url: String,
    pub quality: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_episodes: i64,
    pub total_links: i64,
    pub episodes_with_links: i64,
}

/// Submission body as sent by the client. Every field is optional here so a
/// missing field can be reported as a 400 instead of a deserialization error.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct NewLinkRequest {
    pub url: Option<String>,
    pub quality: Option<String>,
    pub source: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewLink {
    pub url: String,
    pub quality: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: url, quality, source")]
pub struct MissingFields;

impl TryFrom<NewLinkRequest> for NewLink {
    type Error = MissingFields;

    fn try_from(value: NewLinkRequest) -> Result<Self, Self::Error> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|s| !s.is_empty())
        }
        match (
            present(value.url),
            present(value.quality),
            present(value.source),
        ) {
            (Some(url), Some(quality), Some(source)) => Ok(Self {
                url,
                quality,
                source,
            }),
            _ => Err(MissingFields),
        }
    }
}
