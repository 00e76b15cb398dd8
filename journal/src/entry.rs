//! Journal entry types as they travel over the wire (camelCase JSON).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOOD: &str = "neutral";

/// A saved dream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    /// When the dream happened: RFC 3339 or `YYYY-MM-DD`.
    pub date: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub favorite: bool,
    /// Summary of the interpretation shown in the journal.
    pub interpretation: String,
    /// Description of the visualization, if one was generated.
    pub visualization: String,
    pub visualization_url: String,
    /// Milliseconds since Unix epoch.
    pub created_at_ms: i64,
    /// Milliseconds since Unix epoch.
    pub updated_at_ms: i64,
}

impl JournalEntry {
    /// `date` as a calendar day, when it parses.
    pub fn dream_day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }
}

/// Input for [`crate::Store::add_entry`]. Only `description` is required.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJournalEntry {
    pub title: Option<String>,
    pub description: String,
    pub date: Option<String>,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub interpretation: String,
    pub visualization: String,
    pub visualization_url: String,
}

impl NewJournalEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalEntryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
    pub interpretation: Option<String>,
    pub visualization: Option<String>,
    pub visualization_url: Option<String>,
}

impl JournalEntryUpdate {
    pub(crate) fn apply(self, entry: &mut JournalEntry) {
        if let Some(v) = self.title {
            entry.title = v;
        }
        if let Some(v) = self.description {
            entry.description = v;
        }
        if let Some(v) = self.date {
            entry.date = v;
        }
        if let Some(v) = self.mood {
            entry.mood = v;
        }
        if let Some(v) = self.tags {
            entry.tags = v;
        }
        if let Some(v) = self.favorite {
            entry.favorite = v;
        }
        if let Some(v) = self.interpretation {
            entry.interpretation = v;
        }
        if let Some(v) = self.visualization {
            entry.visualization = v;
        }
        if let Some(v) = self.visualization_url {
            entry.visualization_url = v;
        }
    }
}

/// List filter; all set conditions must hold. Blank strings are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JournalFilter {
    /// Exact mood, ignoring case.
    pub mood: Option<String>,
    /// Entry must carry this tag, ignoring case.
    pub tag: Option<String>,
    pub favorite: Option<bool>,
    /// Substring of title or description, ignoring case.
    pub q: Option<String>,
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD`.
pub(crate) fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Fills defaults for a new entry: date now, title `Dream on <day>`, mood from the first
/// tag or [`DEFAULT_MOOD`].
pub(crate) fn resolve_new(new: NewJournalEntry, id: String, now: DateTime<Utc>) -> JournalEntry {
    let date = new
        .date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| now.to_rfc3339());
    let title = new.title.filter(|t| !t.trim().is_empty()).unwrap_or_else(|| {
        let day = parse_day(&date).map_or_else(|| date.clone(), |d| d.format("%Y-%m-%d").to_string());
        format!("Dream on {}", day)
    });
    let tags: Vec<String> = new
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let mood = new
        .mood
        .filter(|m| !m.trim().is_empty())
        .or_else(|| tags.first().cloned())
        .unwrap_or_else(|| DEFAULT_MOOD.to_string());
    let now_ms = now.timestamp_millis();
    JournalEntry {
        id,
        title,
        description: new.description,
        date,
        mood,
        tags,
        favorite: new.favorite,
        interpretation: new.interpretation,
        visualization: new.visualization,
        visualization_url: new.visualization_url,
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    }
}
