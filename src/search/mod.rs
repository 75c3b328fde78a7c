pub mod runner;

pub use self::runner::{Cracker, NoProgress, SearchProgress};
use crate::cipher::Key;
use crate::error::{CrackError, CrackResult};
use serde::Serialize;
use std::collections::HashSet;

/// One decryption attempt: a key, what it decodes to, and how English-like
/// that looks to the dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub key: Key,
    pub plaintext: String,
    pub compact: String,
    pub score: f64,
}

impl Candidate {
    pub fn new(key: Key, plaintext: String, score: f64) -> Self {
        let compact = plaintext.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            key,
            plaintext,
            compact,
            score,
        }
    }
}

/// Highest score wins; on a tie the earliest candidate is kept.
pub fn select_best(candidates: &[Candidate]) -> CrackResult<(usize, &Candidate)> {
    let mut best: Option<(usize, &Candidate)> = None;
    for (idx, c) in candidates.iter().enumerate() {
        match best {
            Some((_, b)) if c.score <= b.score => {}
            _ => best = Some((idx, c)),
        }
    }
    best.ok_or(CrackError::NoCandidates)
}

/// Every candidate of a run, in generation order (key size ascending, then
/// lexicographic key order).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn best(&self) -> CrackResult<&Candidate> {
        select_best(&self.candidates).map(|(_, c)| c)
    }

    /// Candidates ordered by descending score, ties in generation order.
    pub fn ranked(&self) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// First candidate whose plaintext contains `sentence`.
    pub fn find_containing(&self, sentence: &str) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| c.plaintext.contains(sentence))
    }

    /// `(plaintext, key label)` pairs for the oracle, one per distinct
    /// plaintext. The first key that produced a plaintext labels it.
    pub fn key_labels(&self) -> Vec<(String, String)> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.candidates
            .iter()
            .filter(|c| seen.insert(c.plaintext.as_str()))
            .map(|c| (c.plaintext.clone(), c.key.label()))
            .collect()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
