pub mod loader;
pub mod types;

pub use self::loader::Dictionary;
pub use self::types::ScoreDetails;
use crate::config::ScoringParams;
use crate::error::CrackResult;
use std::collections::HashSet;
use std::sync::Arc;

/// Dictionary-substring plausibility score.
///
/// At every character offset the longest dictionary word starting there
/// (within `min_word_len..=max_word_len`) is found. Each distinct word is
/// credited once per text, worth `points_per_char` per character, no matter
/// how often it repeats.
#[derive(Debug, Clone)]
pub struct DictionaryScorer {
    dictionary: Arc<Dictionary>,
    params: ScoringParams,
}

impl DictionaryScorer {
    pub fn new(dictionary: Arc<Dictionary>, params: ScoringParams) -> CrackResult<Self> {
        params.validate()?;
        Ok(Self { dictionary, params })
    }

    pub fn score(&self, text: &str) -> f64 {
        scan(&self.dictionary, &self.params, text, |_| {}).0
    }

    pub fn score_details(&self, text: &str) -> ScoreDetails {
        let mut words = Vec::new();
        let (score, hits) = scan(&self.dictionary, &self.params, text, |w| {
            words.push(w.to_string())
        });
        ScoreDetails { score, words, hits }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }
}

/// Scores `text` against `dictionary` with the default word bounds.
pub fn score(text: &str, dictionary: &Dictionary) -> f64 {
    scan(dictionary, &ScoringParams::default(), text, |_| {}).0
}

fn scan(
    dictionary: &Dictionary,
    params: &ScoringParams,
    text: &str,
    mut on_credit: impl FnMut(&str),
) -> (f64, usize) {
    let folded;
    let text = if params.fold_case {
        folded = text.to_lowercase();
        folded.as_str()
    } else {
        text
    };

    // Byte offset of every char boundary, plus the end.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = bounds.len() - 1;

    let min_len = params.min_word_len;
    // Windows longer than the longest entry can never match.
    let max_len = params.max_word_len.min(dictionary.longest_word());

    let mut credited: HashSet<&str> = HashSet::new();
    let mut total = 0.0;
    let mut hits = 0;

    for start in 0..char_len {
        let mut best: Option<(&str, usize)> = None;
        let last = char_len.min(start + max_len);

        for end in (start + min_len)..=last {
            let word = &text[bounds[start]..bounds[end]];
            if dictionary.contains(word) {
                let len = end - start;
                match best {
                    Some((_, best_len)) if best_len >= len => {}
                    _ => best = Some((word, len)),
                }
            }
        }

        if let Some((word, len)) = best {
            hits += 1;
            if credited.insert(word) {
                total += len as f64 * params.points_per_char;
                on_credit(word);
            }
        }
    }

    (total, hits)
}
