//! Dashboard statistics over journal entries.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry::JournalEntry;

const NO_MOOD: &str = "None";
const NO_DREAM: &str = "No dreams yet";
const NO_DATE: &str = "N/A";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_dreams: usize,
    pub dreams_this_month: usize,
    /// Entries dated within the last 28 days, divided by 4.
    pub average_per_week: f64,
    pub most_common_mood: String,
    /// Title of the most recently recorded entry.
    pub last_dream: String,
    pub last_dream_date: String,
}

impl Default for JournalStats {
    fn default() -> Self {
        Self {
            total_dreams: 0,
            dreams_this_month: 0,
            average_per_week: 0.0,
            most_common_mood: NO_MOOD.to_string(),
            last_dream: NO_DREAM.to_string(),
            last_dream_date: NO_DATE.to_string(),
        }
    }
}

/// `entries` must be newest first; mood ties go to the mood seen first in that order.
/// Entries whose date does not parse count toward the total only.
pub fn compute_stats(entries: &[JournalEntry], today: NaiveDate) -> JournalStats {
    let Some(latest) = entries.first() else {
        return JournalStats::default();
    };

    let window_start = today - Duration::days(28);
    let mut this_month = 0;
    let mut recent = 0;
    let mut moods: Vec<(&str, usize)> = Vec::new();
    for e in entries {
        if let Some(day) = e.dream_day() {
            if day.year() == today.year() && day.month() == today.month() {
                this_month += 1;
            }
            if day >= window_start {
                recent += 1;
            }
        }
        let mood = e.mood.trim();
        if mood.is_empty() {
            continue;
        }
        match moods.iter_mut().find(|(m, _)| m.eq_ignore_ascii_case(mood)) {
            Some((_, n)) => *n += 1,
            None => moods.push((mood, 1)),
        }
    }

    let mut most_common = NO_MOOD;
    let mut best = 0;
    for (mood, n) in moods {
        if n > best {
            best = n;
            most_common = mood;
        }
    }

    JournalStats {
        total_dreams: entries.len(),
        dreams_this_month: this_month,
        average_per_week: recent as f64 / 4.0,
        most_common_mood: most_common.to_string(),
        last_dream: latest.title.clone(),
        last_dream_date: latest
            .dream_day()
            .map_or_else(|| latest.date.clone(), |d| d.format("%Y-%m-%d").to_string()),
    }
}
