#![allow(dead_code)]

use colcrack::config::{ScoringParams, SearchParams};
use colcrack::scorer::{Dictionary, DictionaryScorer};
use colcrack::search::Cracker;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const WORDS: &[&str] = &[
    "hello", "world", "the", "cat", "cats", "attack", "dawn", "at", "meet", "park",
];

pub fn dictionary(words: &[&str]) -> Dictionary {
    Dictionary::from_words(words.iter().copied(), 3)
}

pub fn scorer(words: &[&str]) -> DictionaryScorer {
    DictionaryScorer::new(Arc::new(dictionary(words)), ScoringParams::default())
        .expect("default scoring params are valid")
}

pub fn cracker(words: &[&str], min_key_size: usize, max_key_size: usize) -> Cracker {
    let params = SearchParams {
        min_key_size,
        max_key_size,
        threads: 2,
    };
    Cracker::new(scorer(words), params).expect("valid search range")
}

/// A dictionary file on disk, removed when dropped.
pub struct DictFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl DictFile {
    pub fn new(lines: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("dict.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{}", line).unwrap();
        }
        Self { _dir: dir, path }
    }
}
