use crate::error::{CrackError, CrackResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Read-only word set. Every entry is lowercase and at least `min_len`
/// characters long.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    longest: usize,
}

impl Dictionary {
    pub fn load_from_file<P: AsRef<Path>>(path: P, min_len: usize) -> CrackResult<Self> {
        let path = path.as_ref();
        info!("📖 Loading Dictionary: {}", path.display());
        let file = File::open(path).map_err(|e| {
            CrackError::Validation(format!(
                "Could not open dictionary at '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_reader(file, min_len)
    }

    /// One word per line. Extra tab-separated columns (e.g. frequencies)
    /// are ignored.
    pub fn from_reader<R: Read>(reader: R, min_len: usize) -> CrackResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut dict = Self::default();
        let mut lines_read = 0;
        let mut skipped = 0;

        for result in rdr.records() {
            lines_read += 1;
            let rec = match result {
                Ok(rec) => rec,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if let Some(raw) = rec.get(0) {
                dict.insert(raw, min_len);
            }
        }

        debug!(
            "   -> Scanned {} lines ({} unreadable). Loaded {} words, longest {}.",
            lines_read,
            skipped,
            dict.len(),
            dict.longest
        );

        if dict.is_empty() {
            return Err(CrackError::Validation(format!(
                "Dictionary contains no words of {} or more characters",
                min_len
            )));
        }
        Ok(dict)
    }

    pub fn from_words<I, S>(words: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        for w in words {
            dict.insert(w.as_ref(), min_len);
        }
        dict
    }

    fn insert(&mut self, raw: &str, min_len: usize) {
        // Lowercasing can change the char count (e.g. 'İ'), so measure the stored form.
        let word = raw.trim().to_lowercase();
        let len = word.chars().count();
        if len >= min_len {
            self.longest = self.longest.max(len);
            self.words.insert(word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length in characters of the longest entry.
    pub fn longest_word(&self) -> usize {
        self.longest
    }
}
