pub mod canned;
pub mod http;
pub mod prompt;

pub use self::canned::CannedOracle;
pub use self::http::HttpOracle;
pub use self::prompt::{build_prompt, parse_verdict};
use crate::search::{Candidate, CandidateSet};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("No credential in environment variable {0}")]
    MissingCredential(String),

    #[error("Transport Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Oracle answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed Response: {0}")]
    Malformed(String),
}

/// A language model (or anything else) that picks the most plausible text
/// out of a prompt listing every candidate.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn consult(&self, prompt: &str) -> Result<String, OracleError>;
}

/// The sentence and key label the oracle settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub sentence: String,
    pub key_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleOutcome {
    Verdict(Verdict),
    Unavailable(String),
    UnexpectedFormat(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OracleStatus {
    Matched,
    NoMatch,
    UnexpectedFormat,
    Unavailable,
    Skipped,
}

/// Sends every distinct candidate to the oracle once and parses its pick.
/// Failures come back as outcomes; nothing here touches the candidates.
pub async fn arbitrate(oracle: &dyn Oracle, candidates: &CandidateSet) -> OracleOutcome {
    let entries = candidates.key_labels();
    let prompt = build_prompt(&entries);
    debug!(
        "Consulting oracle with {} distinct candidates ({} bytes)",
        entries.len(),
        prompt.len()
    );

    let reply = match oracle.consult(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("⚠️  Oracle unavailable: {}", e);
            return OracleOutcome::Unavailable(e.to_string());
        }
    };

    match parse_verdict(&reply) {
        Some(verdict) => OracleOutcome::Verdict(verdict),
        None => {
            warn!("⚠️  Oracle reply had an unexpected format");
            debug!("Reply was: {}", reply);
            OracleOutcome::UnexpectedFormat(reply)
        }
    }
}

/// First candidate whose plaintext contains the oracle's sentence.
pub fn resolve<'a>(verdict: &Verdict, candidates: &'a CandidateSet) -> Option<&'a Candidate> {
    candidates.find_containing(&verdict.sentence)
}
