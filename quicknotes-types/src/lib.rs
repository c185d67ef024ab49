//! Shared types for the quicknotes HTTP API and its clients.

use chrono::{DateTime, Utc};
use serde::de::{self, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

// =====================================================
// Request Types
// =====================================================

/// Query parameters for `GET /api/notes`. Empty values count as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListNotesInput {
    /// Case-insensitive substring matched against note titles
    pub term: String,
    /// Exact tag a note must carry
    pub tag: String,
    /// Sort field: "title" or "lastModified". Anything else leaves the scan order.
    pub sort: String,
    #[serde(deserialize_with = "blank_as_default_order")]
    pub order: SortOrder,
    /// Maximum number of note files scanned (0 = no limit)
    #[serde(deserialize_with = "blank_as_zero")]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

/// Body of note create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// `null` is read as no tags
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

fn blank_as_default_order<'de, D>(deserializer: D) -> Result<SortOrder, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let name = raw.trim();
    if name.is_empty() {
        return Ok(SortOrder::default());
    }
    let value: de::value::StrDeserializer<'_, D::Error> = name.into_deserializer();
    SortOrder::deserialize(value)
}

fn blank_as_zero<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    // Query strings hand over text, JSON hands over numbers
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLimit {
        Number(usize),
        Text(String),
    }

    match RawLimit::deserialize(deserializer)? {
        RawLimit::Number(n) => Ok(n),
        RawLimit::Text(text) if text.trim().is_empty() => Ok(0),
        RawLimit::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid limit {:?}: {}", text, e))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// =====================================================
// Response Types
// =====================================================

/// A note with its body rendered to HTML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note identifier (file stem inside the notes directory)
    pub path: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub last_modified: DateTime<Utc>,
}

/// Note metadata without the body, as returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialNote {
    pub path: String,
    pub title: String,
    pub tags: Vec<String>,
    pub last_modified: DateTime<Utc>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}
