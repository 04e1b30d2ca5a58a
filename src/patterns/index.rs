//! On-disk index of the pattern cache
//!
//! Maps each guess to the chunk file and row position holding its row. The
//! index records its format version and the row width it was built for; a
//! mismatch on either discards the whole index.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Current index format version
pub const INDEX_VERSION: u32 = 1;

/// Hex characters in a chunk key
pub const CHUNK_KEY_LENGTH: usize = 2;

/// Location of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub chunk: String,
    pub position: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexFile {
    version: u32,
    row_bytes: usize,
    #[serde(default)]
    counts: BTreeMap<String, u32>,
    #[serde(default)]
    entries: BTreeMap<String, (String, u32)>,
}

/// In-memory view of the index
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    row_bytes: usize,
    entries: FxHashMap<String, Slot>,
    counts: FxHashMap<String, u32>,
}

impl PatternIndex {
    /// Empty index for rows of `row_bytes` bytes
    #[must_use]
    pub fn new(row_bytes: usize) -> Self {
        Self {
            row_bytes,
            ..Self::default()
        }
    }

    /// Load the index at `path`, or start empty
    ///
    /// Never fails: a missing, unreadable or incompatible index yields an
    /// empty one, and every row is then treated as a cache miss.
    #[must_use]
    pub fn load(path: &Path, row_bytes: usize) -> Self {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::new(row_bytes),
            Err(e) => {
                log::warn!("failed to read pattern index {}: {e}", path.display());
                return Self::new(row_bytes);
            }
        };

        let file: IndexFile = match serde_json::from_slice(&raw) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("failed to parse pattern index {}: {e}", path.display());
                return Self::new(row_bytes);
            }
        };

        if file.version != INDEX_VERSION || file.row_bytes != row_bytes {
            log::debug!(
                "discarding pattern index {} (version {}, row bytes {}; expected {INDEX_VERSION}, {row_bytes})",
                path.display(),
                file.version,
                file.row_bytes
            );
            return Self::new(row_bytes);
        }

        let mut index = Self::new(row_bytes);
        for (guess, (chunk, position)) in file.entries {
            let Some(count) = position.checked_add(1).filter(|_| is_chunk_key(&chunk)) else {
                log::warn!(
                    "discarding pattern index {}: bad slot ({chunk:?}, {position}) for '{guess}'",
                    path.display()
                );
                return Self::new(row_bytes);
            };
            index.bump_count(&chunk, count);
            index.entries.insert(guess, Slot { chunk, position });
        }
        for (chunk, count) in file.counts {
            if !is_chunk_key(&chunk) {
                log::warn!(
                    "discarding pattern index {}: bad chunk key {chunk:?}",
                    path.display()
                );
                return Self::new(row_bytes);
            }
            index.bump_count(&chunk, count);
        }

        log::debug!(
            "loaded pattern index {} with {} rows",
            path.display(),
            index.len()
        );
        index
    }

    /// Persist atomically: write a sibling temporary file, then rename it over `path`
    ///
    /// # Errors
    /// Returns an I/O error if the temporary file cannot be written or renamed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = IndexFile {
            version: INDEX_VERSION,
            row_bytes: self.row_bytes,
            counts: self
                .counts
                .iter()
                .map(|(chunk, &count)| (chunk.clone(), count))
                .collect(),
            entries: self
                .entries
                .iter()
                .map(|(guess, slot)| (guess.clone(), (slot.chunk.clone(), slot.position)))
                .collect(),
        };
        let encoded = serde_json::to_vec_pretty(&file).map_err(io::Error::other)?;

        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = Path::new(&tmp_path);

        let mut tmp = File::create(tmp_path)?;
        tmp.write_all(&encoded)?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(tmp_path, path)
    }

    #[must_use]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    #[must_use]
    pub fn get(&self, guess: &str) -> Option<&Slot> {
        self.entries.get(guess)
    }

    /// Give `guess` the next free position in `chunk`
    ///
    /// An already-assigned guess keeps its slot; slots never move.
    pub fn assign(&mut self, guess: &str, chunk: &str) -> Slot {
        if let Some(slot) = self.entries.get(guess) {
            return slot.clone();
        }

        let position = self.rows_in(chunk);
        let slot = Slot {
            chunk: chunk.to_string(),
            position,
        };
        self.counts.insert(chunk.to_string(), position + 1);
        self.entries.insert(guess.to_string(), slot.clone());
        slot
    }

    /// Rows allocated in `chunk`
    #[must_use]
    pub fn rows_in(&self, chunk: &str) -> u32 {
        self.counts.get(chunk).copied().unwrap_or(0)
    }

    /// Number of indexed guesses
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump_count(&mut self, chunk: &str, count: u32) {
        let current = self.counts.entry(chunk.to_string()).or_insert(0);
        *current = (*current).max(count);
    }
}

/// Chunk keys are exactly `CHUNK_KEY_LENGTH` lowercase hex characters
#[must_use]
pub fn is_chunk_key(chunk: &str) -> bool {
    chunk.len() == CHUNK_KEY_LENGTH
        && chunk
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
