use clap::Args;
use colcrack::cipher::{encode, Key};
use colcrack::config::MAX_KEY_SIZE;
use colcrack::error::{CrackError, CrackResult};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[arg(short, long)]
    pub plaintext: String,

    /// Column order, e.g. `31524` or `3,1,5,2,4`.
    #[arg(short, long, conflicts_with = "key_size")]
    pub key: Option<Key>,

    /// Random key of this size when no key is given.
    #[arg(long, default_value_t = 5)]
    pub key_size: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

/// Picks the explicit key or a random one of `key_size`.
pub fn resolve_key(key: Option<Key>, key_size: usize, seed: Option<u64>) -> CrackResult<Key> {
    if let Some(key) = key {
        return Ok(key);
    }
    if key_size == 0 || key_size > MAX_KEY_SIZE {
        return Err(CrackError::InvalidKey(format!(
            "key size {} is outside 1..={}",
            key_size, MAX_KEY_SIZE
        )));
    }
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    Ok(Key::random(key_size, &mut rng))
}

pub fn run(args: EncryptArgs) -> CrackResult<()> {
    let key = resolve_key(args.key, args.key_size, args.seed)?;
    let ciphertext = encode(&args.plaintext, &key);
    info!("🔒 Encrypted {} chars with key {}", args.plaintext.chars().count(), key);

    println!("Key:        {}", key);
    println!("Ciphertext: {}", ciphertext);
    Ok(())
}
