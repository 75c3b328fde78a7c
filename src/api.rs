use crate::error::{CrackError, CrackResult};
use crate::oracle::{self, Oracle, OracleOutcome, OracleStatus, Verdict};
use crate::search::{Candidate, CandidateSet, Cracker};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OracleReport {
    pub status: OracleStatus,
    pub verdict: Option<Verdict>,
    pub matched: Option<Candidate>,

    // Raw reply or failure reason, when there is one
    pub detail: Option<String>,
}

impl OracleReport {
    pub fn skipped() -> Self {
        Self {
            status: OracleStatus::Skipped,
            verdict: None,
            matched: None,
            detail: None,
        }
    }

    /// Turns an arbitration outcome into a report, looking the verdict up
    /// among the candidates.
    pub fn from_outcome(outcome: OracleOutcome, candidates: &CandidateSet) -> Self {
        match outcome {
            OracleOutcome::Verdict(verdict) => {
                let matched = oracle::resolve(&verdict, candidates).cloned();
                let status = if matched.is_some() {
                    OracleStatus::Matched
                } else {
                    OracleStatus::NoMatch
                };
                Self {
                    status,
                    verdict: Some(verdict),
                    matched,
                    detail: None,
                }
            }
            OracleOutcome::Unavailable(reason) => Self {
                status: OracleStatus::Unavailable,
                verdict: None,
                matched: None,
                detail: Some(reason),
            },
            OracleOutcome::UnexpectedFormat(reply) => Self {
                status: OracleStatus::UnexpectedFormat,
                verdict: None,
                matched: None,
                detail: Some(reply),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CrackReport {
    pub ciphertext: String,
    pub candidate_count: usize,
    pub best: Candidate,
    pub oracle: OracleReport,
}

pub struct CrackOutcome {
    pub candidates: CandidateSet,
    pub report: CrackReport,
}

/// Full pipeline: exhaustive search on the blocking pool, dictionary pick,
/// then at most one oracle consultation. Oracle trouble is reported, never
/// returned as an error.
pub async fn crack(
    cracker: Arc<Cracker>,
    ciphertext: String,
    oracle: Option<Arc<dyn Oracle>>,
) -> CrackResult<CrackOutcome> {
    let text = ciphertext.clone();
    let worker = cracker.clone();
    let candidates = tokio::task::spawn_blocking(move || worker.search(&text))
        .await
        .map_err(|e| CrackError::Worker(e.to_string()))??;

    let best = candidates.best()?.clone();
    info!(
        "🏆 Dictionary best: {} (score {:.1}) \"{}\"",
        best.key, best.score, best.plaintext
    );

    let oracle_report = match oracle {
        Some(oracle) => {
            let outcome = oracle::arbitrate(oracle.as_ref(), &candidates).await;
            let report = OracleReport::from_outcome(outcome, &candidates);
            match (&report.status, &report.matched) {
                (OracleStatus::Matched, Some(c)) => {
                    info!("🤖 Oracle pick: {} (score {:.1})", c.key, c.score)
                }
                (OracleStatus::NoMatch, _) => {
                    warn!("⚠️  Oracle sentence matches no candidate")
                }
                _ => {}
            }
            report
        }
        None => OracleReport::skipped(),
    };

    let report = CrackReport {
        ciphertext,
        candidate_count: candidates.len(),
        best,
        oracle: oracle_report,
    };
    Ok(CrackOutcome { candidates, report })
}
