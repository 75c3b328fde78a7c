use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colcrack::config::Config;
use colcrack::error::CrackResult;
use std::path::Path;
use std::process;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "dict.txt")]
    dictionary: String,

    /// JSON file with search, scoring and oracle settings.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Crack(cmd::crack::CrackArgs),
    Encrypt(cmd::encrypt::EncryptArgs),
}

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Crack(args) => match matches.subcommand_matches("crack") {
            Some(sub) => match resolve_config(&cli, &args.config, sub) {
                Ok(config) => cmd::crack::run(args.clone(), config, &cli.dictionary).await,
                Err(e) => Err(e),
            },
            None => Ok(()),
        },
        Commands::Encrypt(args) => cmd::encrypt::run(args.clone()),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

/// File settings first, then anything typed on the command line on top.
fn resolve_config(
    cli: &Cli,
    cli_config: &Config,
    sub_matches: &clap::ArgMatches,
) -> CrackResult<Config> {
    let config = match &cli.config_file {
        Some(path) if Path::new(path).exists() => {
            info!("⚙️  Loading Config: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        Some(path) => {
            return Err(colcrack::error::CrackError::Config(format!(
                "Config file '{}' not found",
                path
            )))
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}
