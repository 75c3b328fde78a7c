use crate::cmd::encrypt::resolve_key;
use crate::reports;
use clap::Args;
use colcrack::api;
use colcrack::cipher::{Grid, Key};
use colcrack::config::Config;
use colcrack::error::{CrackError, CrackResult};
use colcrack::oracle::{HttpOracle, Oracle};
use colcrack::scorer::{Dictionary, DictionaryScorer};
use colcrack::search::Cracker;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, required_unless_present = "plaintext")]
    pub ciphertext: Option<String>,

    /// Encrypt this first, then crack the result.
    #[arg(short, long, conflicts_with = "ciphertext")]
    pub plaintext: Option<String>,

    /// Key for --plaintext. Random when omitted.
    #[arg(short, long, requires = "plaintext")]
    pub key: Option<Key>,

    #[arg(short = 'S', long, requires = "plaintext")]
    pub seed: Option<u64>,

    /// Print every candidate grid. Only sensible for small key sizes.
    #[arg(long, default_value_t = false)]
    pub show_grids: bool,

    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub async fn run(args: CrackArgs, config: Config, dictionary_path: &str) -> CrackResult<()> {
    let ciphertext = match (&args.ciphertext, &args.plaintext) {
        (Some(c), _) => c.clone(),
        (None, Some(p)) => {
            let key = resolve_key(args.key.clone(), config.search.max_key_size, args.seed)?;
            let c = colcrack::cipher::encode(p, &key);
            info!("🔒 Encrypted with key {}: {}", key, c);
            c
        }
        (None, None) => {
            return Err(CrackError::Validation(
                "Either --ciphertext or --plaintext is required".into(),
            ))
        }
    };

    let dictionary = Dictionary::load_from_file(dictionary_path, config.scoring.min_word_len)?;
    info!("📚 {} dictionary words", dictionary.len());
    let scorer = DictionaryScorer::new(Arc::new(dictionary), config.scoring.clone())?;
    let cracker = Arc::new(Cracker::new(scorer, config.search.clone())?);

    let oracle: Option<Arc<dyn Oracle>> = if config.oracle.no_oracle {
        None
    } else {
        match HttpOracle::new(config.oracle.clone()) {
            Ok(o) => Some(Arc::new(o)),
            Err(e) => {
                warn!("⚠️  Oracle client unavailable: {}", e);
                None
            }
        }
    };

    info!("🔓 Cracking {} chars...", ciphertext.chars().count());
    let outcome = api::crack(cracker, ciphertext.clone(), oracle).await?;

    if args.show_grids {
        for c in outcome.candidates.iter() {
            reports::print_grid(&c.key, &Grid::from_ciphertext(&ciphertext, &c.key));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        return Ok(());
    }

    let ranked = outcome.candidates.ranked();
    let shown = args.top.min(ranked.len());
    reports::print_leaderboard(&ranked[..shown]);
    reports::print_oracle_report(&outcome.report);
    Ok(())
}
