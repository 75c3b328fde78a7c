use crate::cipher::{decode, permutation};
use crate::config::{SearchParams, RECOMMENDED_MAX_KEY_SIZE};
use crate::error::{CrackError, CrackResult};
use crate::scorer::DictionaryScorer;
use crate::search::{select_best, Candidate, CandidateSet};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Called once per finished key size. Return `false` to stop before the
/// next size; candidates gathered so far are kept.
pub trait SearchProgress: Send + Sync {
    fn on_key_size(&self, key_size: usize, permutations: usize, best: &Candidate) -> bool;
}

pub struct NoProgress;

impl SearchProgress for NoProgress {
    fn on_key_size(&self, _: usize, _: usize, _: &Candidate) -> bool {
        true
    }
}

/// Exhaustive columnar-transposition search over a range of key sizes.
pub struct Cracker {
    scorer: DictionaryScorer,
    params: SearchParams,
}

impl Cracker {
    pub fn new(scorer: DictionaryScorer, params: SearchParams) -> CrackResult<Self> {
        params.validate()?;
        Ok(Self { scorer, params })
    }

    pub fn scorer(&self) -> &DictionaryScorer {
        &self.scorer
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn search(&self, ciphertext: &str) -> CrackResult<CandidateSet> {
        self.search_with(ciphertext, &NoProgress)
    }

    /// Decodes and scores `ciphertext` under every key of every size in the
    /// configured range. Candidates come back in generation order whatever
    /// the thread count.
    pub fn search_with<P: SearchProgress>(
        &self,
        ciphertext: &str,
        progress: &P,
    ) -> CrackResult<CandidateSet> {
        let params = &self.params;
        params.validate()?;
        if params.max_key_size > RECOMMENDED_MAX_KEY_SIZE {
            warn!(
                "⚠️  Key size {} means {} permutations at the top end. This will be slow.",
                params.max_key_size,
                permutation::factorial(params.max_key_size)
            );
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.threads)
            .build()
            .map_err(|e| CrackError::Worker(e.to_string()))?;

        debug!(
            "Searching {} chars, key sizes {}..={} on {} threads",
            ciphertext.chars().count(),
            params.min_key_size,
            params.max_key_size,
            pool.current_num_threads()
        );

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut best: Option<usize> = None;

        for key_size in params.min_key_size..=params.max_key_size {
            let start = Instant::now();
            let keys = permutation::generate(key_size);
            let tested = keys.len();

            let batch: Vec<Candidate> = pool.install(|| {
                keys.into_par_iter()
                    .map(|key| {
                        let plaintext = decode(ciphertext, &key);
                        let score = self.scorer.score(&plaintext);
                        Candidate::new(key, plaintext, score)
                    })
                    .collect()
            });

            let offset = candidates.len();
            if let Ok((idx, c)) = select_best(&batch) {
                let improves = match best {
                    Some(b) => c.score > candidates[b].score,
                    None => true,
                };
                if improves {
                    best = Some(offset + idx);
                }
            }
            candidates.extend(batch);

            let Some(b) = best else { continue };
            let leader = &candidates[b];
            info!(
                "🔑 Key size {}: {} permutations in {:.2?}. Best {:.1} {} \"{}\"",
                key_size,
                tested,
                start.elapsed(),
                leader.score,
                leader.key,
                leader.compact
            );
            if !progress.on_key_size(key_size, tested, leader) {
                info!("🛑 Search stopped after key size {}", key_size);
                break;
            }
        }

        if candidates.is_empty() {
            return Err(CrackError::NoCandidates);
        }
        Ok(CandidateSet::new(candidates))
    }
}
