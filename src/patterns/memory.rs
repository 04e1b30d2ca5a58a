//! Ephemeral memoizing row source

use super::{PatternRow, RowSource, compute_row};
use crate::core::{Dictionary, Word};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Rows computed on demand and remembered for the lifetime of this source
pub struct InMemoryRows {
    dictionary: Arc<Dictionary>,
    memo: FxHashMap<String, PatternRow>,
}

impl InMemoryRows {
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            dictionary,
            memo: FxHashMap::default(),
        }
    }

    /// Number of memoized rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

impl RowSource for InMemoryRows {
    /// A forced row is a one-off probe: it is neither read from nor stored in the memo.
    fn row(&mut self, guess: &Word, force: bool) -> PatternRow {
        if force {
            return compute_row(guess, self.dictionary.answers());
        }

        if let Some(row) = self.memo.get(guess.text()) {
            return Arc::clone(row);
        }

        let row = compute_row(guess, self.dictionary.answers());
        self.memo.insert(guess.text().to_string(), Arc::clone(&row));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(Dictionary::new(&["crane", "slate", "irate"], &["slate", "irate"]).unwrap())
    }

    #[test]
    fn memoizes_rows() {
        let dictionary = dictionary();
        let mut rows = InMemoryRows::new(Arc::clone(&dictionary));
        let guess = &dictionary.guesses()[0];

        let first = rows.row(guess, false);
        let second = rows.row(guess, false);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn forced_rows_bypass_memo() {
        let dictionary = dictionary();
        let mut rows = InMemoryRows::new(Arc::clone(&dictionary));
        let guess = &dictionary.guesses()[1];

        let forced = rows.row(guess, true);
        assert!(rows.is_empty());

        let memoized = rows.row(guess, false);
        assert_eq!(&*forced, &*memoized);
        assert!(!Arc::ptr_eq(&forced, &memoized));
        assert_eq!(rows.len(), 1);
    }
}
