//! Dream journal: saved dreams with their interpretation summary and visualization, in a
//! separate SQLite database from anything else.
//!
//! - [`Store`]: add / get / list (filtered, newest first) / update / favorite / delete.
//! - [`compute_stats`]: dashboard numbers (this month, weekly average over 28 days, most
//!   common mood, last dream).

mod entry;
mod stats;
mod store;

pub use entry::{JournalEntry, JournalEntryUpdate, JournalFilter, NewJournalEntry, DEFAULT_MOOD};
pub use stats::{compute_stats, JournalStats};
pub use store::{Store, StoreError};
