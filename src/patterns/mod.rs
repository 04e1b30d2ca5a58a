//! Pattern rows: the feedback code of one guess against every answer
//!
//! Two sources produce rows: [`InMemoryRows`] memoizes them for the lifetime
//! of the source, [`PatternCache`] persists them on disk keyed by the
//! dictionary signature. Both produce identical rows for the same guess.

mod cache;
mod index;
mod memory;

pub use cache::{INDEX_FLUSH_INTERVAL, PatternCache, SharedPatternCache};
pub use index::{INDEX_VERSION, PatternIndex, Slot};
pub use memory::InMemoryRows;

use crate::core::{Dictionary, Feedback, Word};
use std::path::Path;
use std::sync::Arc;

/// Feedback codes of one guess, indexed by answer position
pub type PatternRow = Arc<[u16]>;

/// Something that can produce the pattern row of a guess
pub trait RowSource: Send {
    /// Get the row for `guess`, bypassing any stored copy when `force` is set
    fn row(&mut self, guess: &Word, force: bool) -> PatternRow;
}

/// Compute a row from scratch
#[must_use]
pub fn compute_row(guess: &Word, answers: &[Word]) -> PatternRow {
    answers
        .iter()
        .map(|answer| Feedback::calculate(guess, answer).value())
        .collect()
}

type MakeSource = dyn Fn() -> Box<dyn RowSource> + Send + Sync;

/// Produces independent row sources, one per unit of parallel work
#[derive(Clone)]
pub struct RowSourceFactory(Arc<MakeSource>);

impl RowSourceFactory {
    pub fn new<F>(make: F) -> Self
    where
        F: Fn() -> Box<dyn RowSource> + Send + Sync + 'static,
    {
        Self(Arc::new(make))
    }

    /// Every source gets its own private memo
    #[must_use]
    pub fn in_memory(dictionary: Arc<Dictionary>) -> Self {
        Self::new(move || Box::new(InMemoryRows::new(Arc::clone(&dictionary))))
    }

    /// Every source is a handle onto the same durable cache
    #[must_use]
    pub fn durable(cache: SharedPatternCache) -> Self {
        Self::new(move || Box::new(cache.clone()))
    }

    /// Durable cache under `root` when given, in-memory rows otherwise
    ///
    /// A cache that cannot be opened is logged and replaced by in-memory rows.
    /// The returned cache handle, if any, should be flushed by the caller.
    #[must_use]
    pub fn for_cache_dir(
        dictionary: &Arc<Dictionary>,
        root: Option<&Path>,
    ) -> (Self, Option<SharedPatternCache>) {
        let Some(root) = root else {
            return (Self::in_memory(Arc::clone(dictionary)), None);
        };

        match PatternCache::open(root, Arc::clone(dictionary)) {
            Ok(cache) => {
                let shared = SharedPatternCache::new(cache);
                (Self::durable(shared.clone()), Some(shared))
            }
            Err(e) => {
                log::warn!(
                    "pattern cache unavailable at {}: {e}; using in-memory rows",
                    root.display()
                );
                (Self::in_memory(Arc::clone(dictionary)), None)
            }
        }
    }

    /// Create a fresh source
    #[must_use]
    pub fn create(&self) -> Box<dyn RowSource> {
        (self.0)()
    }
}

impl std::fmt::Debug for RowSourceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RowSourceFactory")
    }
}
