//! Search Tokenization
//!
//! Token-prefix matching over asset filenames and paths, backing the
//! in-memory stand-in for the external full-text index. Divergences from
//! that index are deliberate and small:
//!
//! 1. A multi-word query is treated as a single prefix token, not as
//!    independent terms.
//! 2. Filename and path are tokenized separately, so a prefix never spans
//!    the boundary between them.
//! 3. Unicode canonical equivalents are not collapsed.

use serde::{Deserialize, Serialize};

/// Splits on runs of non-alphanumeric ASCII and lowercases.
///
/// `"Beach_Trip-2024.mp4"` becomes `["beach", "trip", "2024", "mp4"]`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Checks whether the lowercased query is a prefix of any token from the
/// filename or the path.
#[must_use]
pub fn matches(query: &str, filename: &str, path: &str) -> bool {
    let prefix = query.to_lowercase();
    if prefix.is_empty() {
        return false;
    }
    tokenize(filename)
        .iter()
        .chain(tokenize(path).iter())
        .any(|token| token.starts_with(&prefix))
}

/// One searchable asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub filename: String,
    pub path: String,
}

/// In-memory searchable asset collection, ordered by insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIndex {
    records: Vec<AssetRecord>,
}

impl AssetIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. An existing record with the same id is replaced in
    /// place.
    pub fn add(&mut self, record: AssetRecord) {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        } else {
            self.records.push(record);
        }
    }

    /// Removes a record by id. Returns true when a record was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns up to `limit` matching records, in insertion order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&AssetRecord> {
        self.records
            .iter()
            .filter(|r| matches(query, &r.filename, &r.path))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, filename: &str, path: &str) -> AssetRecord {
        AssetRecord {
            id: id.to_string(),
            filename: filename.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_tokenize_splits_and_lowercases() {
        assert_eq!(
            tokenize("Beach_Trip-2024.mp4"),
            vec!["beach", "trip", "2024", "mp4"]
        );
    }

    #[test]
    fn test_tokenize_collapses_separator_runs() {
        assert_eq!(tokenize("a--__--b"), vec!["a", "b"]);
        assert_eq!(tokenize("///"), Vec::<String>::new());
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn test_matches_prefix() {
        assert!(matches("bea", "Beach_Trip.mp4", "/media/clips"));
        assert!(matches("trip", "Beach_Trip.mp4", "/media/clips"));
        assert!(matches("BEACH", "beach.mp4", "/media"));
        assert!(!matches("each", "Beach_Trip.mp4", "/media"));
    }

    #[test]
    fn test_matches_path_tokens_too() {
        assert!(matches("vacat", "day1.mp4", "/media/vacation/2024"));
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(!matches("", "a.mp4", "/m"));
    }

    #[test]
    fn test_multi_word_query_is_a_single_prefix() {
        // "beach trip" is not split into terms, so nothing matches it.
        assert!(!matches("beach trip", "Beach_Trip.mp4", "/media"));
    }

    #[test]
    fn test_prefix_does_not_span_filename_and_path() {
        // "clipsbeach" would only match if path and filename tokens were
        // concatenated.
        assert!(!matches("clipsbeach", "beach.mp4", "/media/clips"));
    }

    #[test]
    fn test_index_search_in_insertion_order() {
        let mut index = AssetIndex::new();
        index.add(record("1", "beach_day.mp4", "/media"));
        index.add(record("2", "mountain.mp4", "/media"));
        index.add(record("3", "beach_night.mp4", "/media"));
        let hits = index.search("beach", 10);
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_index_search_respects_limit() {
        let mut index = AssetIndex::new();
        for i in 0..5 {
            index.add(record(&i.to_string(), &format!("clip_{i}.mp4"), "/media"));
        }
        assert_eq!(index.search("clip", 3).len(), 3);
    }

    #[test]
    fn test_index_add_replaces_same_id() {
        let mut index = AssetIndex::new();
        index.add(record("1", "old.mp4", "/media"));
        index.add(record("1", "new.mp4", "/media"));
        assert_eq!(index.len(), 1);
        assert!(index.search("new", 10).len() == 1);
        assert!(index.search("old", 10).is_empty());
    }

    #[test]
    fn test_index_remove() {
        let mut index = AssetIndex::new();
        index.add(record("1", "a.mp4", "/m"));
        assert!(index.remove("1"));
        assert!(!index.remove("1"));
        assert!(index.is_empty());
    }
}
