//! Durable pattern cache
//!
//! Layout under the cache root:
//!
//! ```text
//! <root>/<hash[0..2]>/<hash>/index.json
//! <root>/<hash[0..2]>/<hash>/chunks/<chunk>.bin
//! ```
//!
//! Each chunk file is a sequence of fixed-width rows of little-endian `u16`
//! codes, one per answer. A guess's chunk is derived from a hash of the guess,
//! and its position within the chunk is assigned on first write and never moves.

use super::index::{CHUNK_KEY_LENGTH, PatternIndex, Slot};
use super::{PatternRow, RowSource, compute_row};
use crate::core::{Dictionary, Word};
use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Dirty marks tolerated before the index is written out
pub const INDEX_FLUSH_INTERVAL: usize = 32;

const INDEX_FILE_NAME: &str = "index.json";
const CHUNK_DIR_NAME: &str = "chunks";
const SHARD_PREFIX_LENGTH: usize = 2;

/// Pattern rows persisted on disk for one dictionary
pub struct PatternCache {
    dictionary: Arc<Dictionary>,
    directory: PathBuf,
    chunk_dir: PathBuf,
    index_path: PathBuf,
    row_bytes: usize,
    index: PatternIndex,
    chunk_keys: FxHashMap<String, String>,
    handles: FxHashMap<String, File>,
    index_dirty: bool,
    dirty_writes: usize,
}

impl PatternCache {
    /// Open (creating if needed) the cache for `dictionary` under `root`
    ///
    /// # Errors
    /// Returns an I/O error if the cache directories cannot be created.
    pub fn open(root: &Path, dictionary: Arc<Dictionary>) -> io::Result<Self> {
        let directory = Self::dictionary_dir(root, dictionary.hash());
        let chunk_dir = directory.join(CHUNK_DIR_NAME);
        fs::create_dir_all(&chunk_dir)?;

        let index_path = directory.join(INDEX_FILE_NAME);
        let row_bytes = dictionary.answers().len() * std::mem::size_of::<u16>();
        let index = PatternIndex::load(&index_path, row_bytes);

        log::debug!(
            "opened pattern cache {} ({} rows indexed)",
            directory.display(),
            index.len()
        );

        Ok(Self {
            dictionary,
            directory,
            chunk_dir,
            index_path,
            row_bytes,
            index,
            chunk_keys: FxHashMap::default(),
            handles: FxHashMap::default(),
            index_dirty: false,
            dirty_writes: 0,
        })
    }

    /// Directory holding the cache of the dictionary with signature `hash`
    #[must_use]
    pub fn dictionary_dir(root: &Path, hash: &str) -> PathBuf {
        let shard = hash.get(..SHARD_PREFIX_LENGTH).unwrap_or(hash);
        root.join(shard).join(hash)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Number of guesses with an assigned row
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Read the stored row for `guess`, if there is a complete one
    pub fn load(&mut self, guess: &Word) -> Option<PatternRow> {
        let slot = self.index.get(guess.text())?.clone();
        match self.read_row(&slot) {
            Ok(row) => Some(row),
            Err(e) => {
                log::debug!("cache miss for '{guess}' at {slot:?}: {e}");
                None
            }
        }
    }

    /// Write `row` as the stored row for `guess`
    ///
    /// Failures are logged; the row is simply recomputed next time.
    pub fn store(&mut self, guess: &Word, row: &[u16]) {
        let slot = if let Some(slot) = self.index.get(guess.text()) {
            slot.clone()
        } else {
            let chunk = self.chunk_key(guess);
            let slot = self.index.assign(guess.text(), &chunk);
            self.mark_dirty();
            slot
        };

        if let Err(e) = self.write_row(&slot, row) {
            log::warn!("failed to write cached row for '{guess}': {e}");
            return;
        }
        self.mark_dirty();
    }

    /// Write the index if it changed and close every chunk file
    ///
    /// # Errors
    /// Returns an I/O error if the index cannot be written.
    pub fn flush(&mut self) -> io::Result<()> {
        let result = self.write_index();
        for (_, mut handle) in self.handles.drain() {
            if let Err(e) = handle.flush() {
                log::warn!("failed to flush chunk file: {e}");
            }
        }
        result
    }

    fn chunk_key(&mut self, guess: &Word) -> String {
        self.chunk_keys
            .entry(guess.text().to_string())
            .or_insert_with(|| {
                let digest = Sha256::digest(format!("guess:{}", guess.text()).as_bytes());
                hex::encode(digest)[..CHUNK_KEY_LENGTH].to_string()
            })
            .clone()
    }

    fn handle(&mut self, chunk: &str) -> io::Result<&mut File> {
        match self.handles.entry(chunk.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let file = OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(self.chunk_dir.join(format!("{chunk}.bin")))?;
                Ok(entry.insert(file))
            }
        }
    }

    fn read_row(&mut self, slot: &Slot) -> io::Result<PatternRow> {
        let offset = u64::from(slot.position) * self.row_bytes as u64;
        let mut buffer = vec![0u8; self.row_bytes];

        let file = self.handle(&slot.chunk)?;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buffer)?;

        Ok(buffer
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    fn write_row(&mut self, slot: &Slot, row: &[u16]) -> io::Result<()> {
        if row.len() * 2 != self.row_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("row has {} codes, expected {}", row.len(), self.row_bytes / 2),
            ));
        }

        let offset = u64::from(slot.position) * self.row_bytes as u64;
        let buffer: Vec<u8> = row.iter().flat_map(|code| code.to_le_bytes()).collect();

        let file = self.handle(&slot.chunk)?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&buffer)
    }

    fn mark_dirty(&mut self) {
        self.index_dirty = true;
        self.dirty_writes += 1;
        if self.dirty_writes >= INDEX_FLUSH_INTERVAL
            && let Err(e) = self.write_index()
        {
            log::warn!("failed to write pattern index: {e}");
        }
    }

    fn write_index(&mut self) -> io::Result<()> {
        if !self.index_dirty {
            return Ok(());
        }
        self.index.save(&self.index_path)?;
        log::debug!(
            "wrote pattern index {} ({} rows)",
            self.index_path.display(),
            self.index.len()
        );
        self.index_dirty = false;
        self.dirty_writes = 0;
        Ok(())
    }
}

impl RowSource for PatternCache {
    fn row(&mut self, guess: &Word, force: bool) -> PatternRow {
        if !force && let Some(row) = self.load(guess) {
            return row;
        }

        let row = compute_row(guess, self.dictionary.answers());
        self.store(guess, &row);
        row
    }
}

impl Drop for PatternCache {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!(
                "failed to flush pattern cache {}: {e}",
                self.directory.display()
            );
        }
    }
}

/// Cloneable handle onto one [`PatternCache`]
///
/// Every handle serializes lookups and writes through the same owner, so
/// parallel workers never race on index positions or chunk offsets. Rows are
/// computed outside the lock.
#[derive(Clone)]
pub struct SharedPatternCache {
    inner: Arc<Mutex<PatternCache>>,
    dictionary: Arc<Dictionary>,
}

impl SharedPatternCache {
    #[must_use]
    pub fn new(cache: PatternCache) -> Self {
        let dictionary = Arc::clone(&cache.dictionary);
        Self {
            inner: Arc::new(Mutex::new(cache)),
            dictionary,
        }
    }

    /// Flush the underlying cache
    ///
    /// # Errors
    /// Returns an I/O error if the index cannot be written.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    /// Number of guesses with an assigned row
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, PatternCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RowSource for SharedPatternCache {
    fn row(&mut self, guess: &Word, force: bool) -> PatternRow {
        if !force {
            let cached = self.lock().load(guess);
            if let Some(row) = cached {
                return row;
            }
        }

        let row = compute_row(guess, self.dictionary.answers());
        self.lock().store(guess, &row);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::InMemoryRows;
    use crate::test_support::TempDir;

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(
            Dictionary::new(
                &["crane", "slate", "irate", "abbey", "robot", "alpha"],
                &["slate", "irate", "abide", "floor", "alpha"],
            )
            .unwrap(),
        )
    }

    #[test]
    fn rows_match_in_memory_source() {
        let dir = TempDir::new("cache-fidelity");
        let dictionary = dictionary();
        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        let mut memory = InMemoryRows::new(Arc::clone(&dictionary));

        for guess in dictionary.guesses() {
            let computed = cache.row(guess, false);
            let cached = cache.row(guess, false);
            let expected = memory.row(guess, false);

            assert_eq!(&*computed, &*expected);
            assert_eq!(&*cached, &*expected);
        }
        assert_eq!(cache.len(), dictionary.guesses().len());
    }

    #[test]
    fn rows_survive_reopen() {
        let dir = TempDir::new("cache-reopen");
        let dictionary = dictionary();
        let guess = &dictionary.guesses()[3];

        let written = {
            let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
            cache.row(guess, false)
        };

        let mut reopened = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        assert_eq!(reopened.len(), 1);
        let loaded = reopened.load(guess).expect("row should be cached");
        assert_eq!(&*loaded, &*written);
    }

    #[test]
    fn layout_is_sharded_by_dictionary_hash() {
        let dir = TempDir::new("cache-layout");
        let dictionary = dictionary();
        let hash = dictionary.hash().to_string();

        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        cache.row(&dictionary.guesses()[0], false);
        cache.flush().unwrap();

        let expected = dir.path().join(&hash[..2]).join(&hash);
        assert_eq!(cache.directory(), expected);
        assert!(expected.join("index.json").is_file());

        let chunk_files: Vec<_> = fs::read_dir(expected.join("chunks")).unwrap().collect();
        assert_eq!(chunk_files.len(), 1);
        let chunk = chunk_files[0].as_ref().unwrap();
        assert_eq!(
            chunk.metadata().unwrap().len(),
            cache.row_bytes() as u64
        );
    }

    #[test]
    fn forced_recompute_overwrites_in_place() {
        let dir = TempDir::new("cache-force");
        let dictionary = dictionary();
        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();

        for guess in dictionary.guesses() {
            cache.row(guess, false);
        }
        let slot = cache.index.get("robot").cloned().unwrap();

        let forced = cache.row(&dictionary.guesses()[4], true);
        assert_eq!(cache.index.get("robot"), Some(&slot));
        assert_eq!(cache.len(), dictionary.guesses().len());
        assert_eq!(&*cache.load(&dictionary.guesses()[4]).unwrap(), &*forced);
    }

    #[test]
    fn truncated_chunk_is_recomputed() {
        let dir = TempDir::new("cache-truncated");
        let dictionary = dictionary();
        let guess = &dictionary.guesses()[0];

        let chunk_path = {
            let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
            cache.row(guess, false);
            let slot = cache.index.get(guess.text()).cloned().unwrap();
            cache.directory().join("chunks").join(format!("{}.bin", slot.chunk))
        };
        OpenOptions::new()
            .write(true)
            .open(&chunk_path)
            .unwrap()
            .set_len(3)
            .unwrap();

        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        assert!(cache.load(guess).is_none());

        let row = cache.row(guess, false);
        let mut memory = InMemoryRows::new(Arc::clone(&dictionary));
        assert_eq!(&*row, &*memory.row(guess, false));
        assert!(cache.load(guess).is_some());
    }

    #[test]
    fn tampered_index_never_writes_outside_chunks() {
        let dir = TempDir::new("cache-tampered");
        let dictionary = dictionary();
        let guess = &dictionary.guesses()[0];
        let row_bytes = dictionary.answers().len() * 2;

        let directory = PatternCache::dictionary_dir(dir.path(), dictionary.hash());
        fs::create_dir_all(&directory).unwrap();
        fs::write(
            directory.join("index.json"),
            format!(
                r#"{{"version": 1, "rowBytes": {row_bytes}, "entries": {{"{}": ["../../../escaped", 0]}}}}"#,
                guess.text()
            ),
        )
        .unwrap();

        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        assert!(cache.is_empty());

        let row = cache.row(guess, false);
        let mut memory = InMemoryRows::new(Arc::clone(&dictionary));
        assert_eq!(&*row, &*memory.row(guess, false));
        assert!(!dir.path().join("escaped.bin").exists());

        let slot = cache.index.get(guess.text()).cloned().unwrap();
        assert!(crate::patterns::index::is_chunk_key(&slot.chunk));
    }

    #[test]
    fn different_dictionaries_never_share_rows() {
        let dir = TempDir::new("cache-isolation");
        let first = dictionary();
        let second = Arc::new(Dictionary::new(&["crane"], &["crane", "slate"]).unwrap());

        let a = PatternCache::open(dir.path(), Arc::clone(&first)).unwrap();
        let b = PatternCache::open(dir.path(), Arc::clone(&second)).unwrap();
        assert_ne!(a.directory(), b.directory());
    }

    #[test]
    fn index_flushes_after_interval() {
        let dir = TempDir::new("cache-interval");
        let words: Vec<String> = (0..INDEX_FLUSH_INTERVAL)
            .map(|i| {
                let a = char::from(b'a' + (i / 26) as u8);
                let b = char::from(b'a' + (i % 26) as u8);
                format!("{a}{b}xyz")
            })
            .collect();
        let dictionary = Arc::new(Dictionary::new(&words, &words).unwrap());
        let mut cache = PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap();
        let index_path = cache.directory().join("index.json");

        // Each new row marks the index dirty twice (assignment and write)
        for guess in &dictionary.guesses()[..INDEX_FLUSH_INTERVAL / 2] {
            cache.row(guess, false);
        }
        assert!(index_path.is_file());

        let persisted = PatternIndex::load(&index_path, cache.row_bytes());
        assert_eq!(persisted.len(), INDEX_FLUSH_INTERVAL / 2);
    }

    #[test]
    fn shared_handles_assign_distinct_slots() {
        let dir = TempDir::new("cache-shared");
        let dictionary = dictionary();
        let shared =
            SharedPatternCache::new(PatternCache::open(dir.path(), Arc::clone(&dictionary)).unwrap());

        std::thread::scope(|scope| {
            for chunk in dictionary.guesses().chunks(2) {
                let mut handle = shared.clone();
                scope.spawn(move || {
                    for guess in chunk {
                        handle.row(guess, false);
                    }
                });
            }
        });
        shared.flush().unwrap();

        let cache = shared.lock();
        let mut slots: Vec<Slot> = dictionary
            .guesses()
            .iter()
            .map(|g| cache.index.get(g.text()).cloned().unwrap())
            .collect();
        slots.sort_by(|a, b| (&a.chunk, a.position).cmp(&(&b.chunk, b.position)));
        slots.dedup();
        assert_eq!(slots.len(), dictionary.guesses().len());
    }
}
