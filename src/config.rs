use crate::error::{CrackError, CrackResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single column is the identity transposition, so searches start at two.
pub const MIN_KEY_SIZE: usize = 2;

/// Hard ceiling on the key size. 10! candidates already need several GB of plaintext.
pub const MAX_KEY_SIZE: usize = 10;

/// Above this the search still runs, but it takes a long time.
pub const RECOMMENDED_MAX_KEY_SIZE: usize = 6;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    #[serde(default)]
    pub oracle: OracleParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 2)]
    pub min_key_size: usize,
    #[arg(long, default_value_t = 6)]
    pub max_key_size: usize,

    // 0 = one worker per core
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            min_key_size: 2,
            max_key_size: 6,
            threads: 0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value_t = 3)]
    pub min_word_len: usize,
    #[arg(long, default_value_t = 10)]
    pub max_word_len: usize,
    #[arg(long, default_value_t = 0.5)]
    pub points_per_char: f64,

    /// Lowercase candidate text before dictionary lookups.
    #[arg(long, default_value_t = false)]
    pub fold_case: bool,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            min_word_len: 3,
            max_word_len: 10,
            points_per_char: 0.5,
            fold_case: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleParams {
    #[arg(long, default_value = "https://openrouter.ai/api/v1/chat/completions")]
    pub oracle_endpoint: String,
    #[arg(long, default_value = "meta-llama/llama-3.3-70b-instruct:free")]
    pub oracle_model: String,
    #[arg(long, default_value_t = 0.5)]
    pub oracle_temperature: f32,
    #[arg(long, default_value_t = 30)]
    pub oracle_timeout_secs: u64,

    /// Name of the environment variable holding the bearer token.
    #[arg(long, default_value = "OPENROUTER_API_KEY")]
    pub oracle_api_key_env: String,

    #[arg(long, default_value_t = false)]
    pub no_oracle: bool,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            oracle_endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            oracle_model: "meta-llama/llama-3.3-70b-instruct:free".to_string(),
            oracle_temperature: 0.5,
            oracle_timeout_secs: 30,
            oracle_api_key_env: "OPENROUTER_API_KEY".to_string(),
            no_oracle: false,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> CrackResult<()> {
        if self.min_key_size < MIN_KEY_SIZE
            || self.max_key_size < self.min_key_size
            || self.max_key_size > MAX_KEY_SIZE
        {
            return Err(CrackError::InvalidKeyRange {
                min: self.min_key_size,
                max: self.max_key_size,
            });
        }
        Ok(())
    }
}

impl ScoringParams {
    pub fn validate(&self) -> CrackResult<()> {
        if self.min_word_len == 0 {
            return Err(CrackError::Config("min_word_len must be at least 1".into()));
        }
        if self.max_word_len < self.min_word_len {
            return Err(CrackError::Config(format!(
                "max_word_len ({}) is below min_word_len ({})",
                self.max_word_len, self.min_word_len
            )));
        }
        if !self.points_per_char.is_finite() || self.points_per_char < 0.0 {
            return Err(CrackError::Config(format!(
                "points_per_char must be a non-negative number, got {}",
                self.points_per_char
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CrackResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> CrackResult<()> {
        self.search.validate()?;
        self.scoring.validate()
    }

    /// Copies every value the user typed on the command line over `self`.
    /// Values that only came from clap defaults are left alone.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search, min_key_size);
        update_if_present!(search, max_key_size);
        update_if_present!(search, threads);

        update_if_present!(scoring, min_word_len);
        update_if_present!(scoring, max_word_len);
        update_if_present!(scoring, points_per_char);
        update_if_present!(scoring, fold_case);

        update_if_present!(oracle, oracle_endpoint);
        update_if_present!(oracle, oracle_model);
        update_if_present!(oracle, oracle_temperature);
        update_if_present!(oracle, oracle_timeout_secs);
        update_if_present!(oracle, oracle_api_key_env);
        update_if_present!(oracle, no_oracle);
    }
}
