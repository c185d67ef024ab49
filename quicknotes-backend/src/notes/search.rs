//! Linear scan search over note metadata, plus tag aggregation.

use super::NoteStore;
use crate::error::NotesResult;
use quicknotes_types::{ListNotesInput, PartialNote, SortOrder};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;
use strum::EnumString;

/// Field a listing is sorted by. Unknown names keep the scan order.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum SortKey {
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "lastModified")]
    LastModified,
    #[strum(default)]
    Unsorted(String),
}

impl SortKey {
    pub fn parse(name: &str) -> Self {
        // `#[strum(default)]` makes parsing infallible
        Self::from_str(name).unwrap_or_else(|_| Self::Unsorted(name.to_string()))
    }

    fn compare(&self, a: &PartialNote, b: &PartialNote) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::LastModified => a.last_modified.cmp(&b.last_modified),
            SortKey::Unsorted(_) => Ordering::Equal,
        }
    }
}

/// Scan notes, filter by title term and tag, then sort.
///
/// `limit` caps how many note files are scanned, not how many matches are
/// returned; 0 scans everything. Any unreadable note aborts the whole search.
pub fn search(store: &NoteStore, query: &ListNotesInput) -> NotesResult<Vec<PartialNote>> {
    let ids = store.list_ids()?;
    let scan_limit = if query.limit == 0 { ids.len() } else { query.limit };

    let term = query.term.to_lowercase();
    let mut notes = Vec::new();

    for id in ids.iter().take(scan_limit) {
        let note = store.read_metadata(id)?;

        if !term.is_empty() && !note.title.to_lowercase().contains(&term) {
            continue;
        }
        if !query.tag.is_empty() && !note.tags.iter().any(|t| *t == query.tag) {
            continue;
        }

        notes.push(note);
    }

    let key = SortKey::parse(&query.sort);
    notes.sort_by(|a, b| {
        let ord = key.compare(a, b);
        match query.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    log::debug!(
        "[NOTES] search term={:?} tag={:?} sort={:?} -> {} of {} scanned",
        query.term,
        query.tag,
        key,
        notes.len(),
        scan_limit
    );

    Ok(notes)
}

/// Distinct tags across all notes, alphabetically sorted
pub fn collect_tags(store: &NoteStore) -> NotesResult<Vec<String>> {
    let mut tags = BTreeSet::new();
    for id in store.list_ids()? {
        let note = store.read_metadata(&id)?;
        tags.extend(note.tags);
    }
    Ok(tags.into_iter().collect())
}
