//! High score table
//!
//! Fixed-size, sorted descending by score. Persisted in the `hiscores` slot.

use serde::{Deserialize, Serialize};

use crate::consts::INITIALS_LEN;
use crate::persistence::{SLOT_HISCORES, Storage, load_json, save_json};

/// Number of entries in the table
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player initials, always `INITIALS_LEN` letters A-Z
    pub name: String,
    pub score: u32,
}

impl Default for HighScoreEntry {
    fn default() -> Self {
        Self {
            name: "A".repeat(INITIALS_LEN),
            score: 0,
        }
    }
}

/// High score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

/// Force a name to exactly `INITIALS_LEN` upper-case letters
fn normalize_name(name: &str) -> String {
    let mut letters: String = name
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .take(INITIALS_LEN)
        .collect();
    while letters.len() < INITIALS_LEN {
        letters.push('A');
    }
    letters
}

impl HighScores {
    /// Fresh table: every entry "AAA" with no score
    pub fn new() -> Self {
        Self {
            entries: vec![HighScoreEntry::default(); MAX_HIGH_SCORES],
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&HighScoreEntry> {
        self.entries.get(index)
    }

    /// Best score in the table (0 for a fresh table)
    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Table position a score would take, or `None` if it is below every entry.
    ///
    /// A score equal to an existing entry goes above it.
    pub fn rank(&self, score: u32) -> Option<usize> {
        self.entries.iter().position(|e| score >= e.score)
    }

    /// Insert a score, pushing lower entries down and dropping the last one.
    ///
    /// Returns the position taken; a score that does not rank is ignored.
    pub fn insert(&mut self, score: u32, name: &str) -> Option<usize> {
        let position = self.rank(score)?;
        self.entries.insert(
            position,
            HighScoreEntry {
                name: normalize_name(name),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(position)
    }

    /// Repair a decoded table: sorted, sane names, exactly `MAX_HIGH_SCORES` long
    fn sanitize(mut self) -> Self {
        for entry in &mut self.entries {
            entry.name = normalize_name(&entry.name);
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.resize(MAX_HIGH_SCORES, HighScoreEntry::default());
        self
    }

    /// Load the table; a missing or unreadable slot gives a fresh table
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<HighScores>(storage, SLOT_HISCORES) {
            Some(scores) => {
                log::info!("Loaded high score table");
                scores.sanitize()
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if save_json(storage, SLOT_HISCORES, self) {
            log::info!("High scores saved (top {})", self.top_score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    fn table_with(scores: &[u32]) -> HighScores {
        let mut table = HighScores::new();
        for &score in scores {
            table.insert(score, "ABC");
        }
        table
    }

    #[test]
    fn test_fresh_table() {
        let table = HighScores::new();
        assert_eq!(table.entries().len(), MAX_HIGH_SCORES);
        assert!(table.entries().iter().all(|e| e.name == "AAA" && e.score == 0));
        assert_eq!(table.top_score(), 0);
        assert_eq!(table.rank(0), Some(0));
    }

    #[test]
    fn test_rank_and_insert() {
        let mut table = table_with(&[300, 100, 200]);
        assert_eq!(table.top_score(), 300);
        assert_eq!(table.rank(250), Some(1));
        // Ties go above the existing entry
        assert_eq!(table.rank(200), Some(1));
        assert_eq!(table.insert(250, "zed"), Some(1));
        assert_eq!(table.entry(1).map(|e| e.name.as_str()), Some("ZED"));
        assert_eq!(table.entry(2).map(|e| e.score), Some(200));
    }

    #[test]
    fn test_below_last_entry_does_not_rank() {
        let scores: Vec<u32> = (0..MAX_HIGH_SCORES as u32).map(|i| 1500 - i * 100).collect();
        let mut table = table_with(&scores);
        assert_eq!(table.entry(MAX_HIGH_SCORES - 1).map(|e| e.score), Some(600));
        assert_eq!(table.rank(500), None);
        let before = table.clone();
        assert_eq!(table.insert(500, "XYZ"), None);
        assert_eq!(table, before);
    }

    #[test]
    fn test_names_are_normalized() {
        assert_eq!(normalize_name("ab"), "ABA");
        assert_eq!(normalize_name("q1rst"), "QRS");
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(HighScores::load(&storage), HighScores::new());
        let table = table_with(&[42, 7]);
        table.save(&mut storage);
        assert_eq!(HighScores::load(&storage), table);
    }

    #[test]
    fn test_short_saved_table_is_repaired() {
        let mut storage = MemoryStorage::new();
        storage
            .write(SLOT_HISCORES, br#"{"entries":[{"name":"bob","score":5},{"name":"AL","score":9}]}"#)
            .unwrap();
        let table = HighScores::load(&storage);
        assert_eq!(table.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(table.entry(0), Some(&HighScoreEntry { name: "ALA".into(), score: 9 }));
        assert_eq!(table.entry(1), Some(&HighScoreEntry { name: "BOB".into(), score: 5 }));
    }

    proptest! {
        #[test]
        fn prop_insert_keeps_order_and_capacity(scores in proptest::collection::vec(0u32..5000, 0..40)) {
            let mut table = HighScores::new();
            for score in scores {
                let last = table.entries().last().map_or(0, |e| e.score);
                let before = table.clone();
                let placed = table.insert(score, "PRO");
                if score < last {
                    prop_assert_eq!(placed, None);
                    prop_assert_eq!(&table, &before);
                }
                prop_assert_eq!(table.entries().len(), MAX_HIGH_SCORES);
                prop_assert!(table.entries().windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
