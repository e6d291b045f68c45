use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shamir_recover::crypto::split::SplitOptions;
use shamir_recover::recover::{recover_core, split_core};
use shamir_recover::DivisionMode;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shamir-recover")]
#[command(about = "Recover a Shamir secret from base-encoded polynomial shares", long_about = None)]
struct Cli {
    /// Log per-share decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the secret of one or more share documents
    Recover {
        /// Share documents ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Truncate each interpolation term instead of failing on inexact shares
        #[arg(long)]
        lenient: bool,

        /// Print only the JSON result line per document
        #[arg(long)]
        json: bool,
    },

    /// Split a secret into a share document
    Split {
        /// Secret as a non-negative decimal integer
        #[arg(long)]
        secret: String,

        /// Total number of shares
        #[arg(short = 'n', long)]
        shares: u64,

        /// Threshold (shares needed to recover)
        #[arg(short = 'k', long)]
        threshold: u64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Indices to leave out, comma separated
        #[arg(long, value_delimiter = ',')]
        omit: Vec<u64>,

        /// Largest base a share may be written in (2-36)
        #[arg(long, default_value = "16")]
        max_base: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Recover {
            files,
            lenient,
            json,
        } => {
            let mode = if lenient {
                DivisionMode::Truncating
            } else {
                DivisionMode::Exact
            };
            recover_files(&files, mode, json)?;
        }
        Commands::Split {
            secret,
            shares,
            threshold,
            seed,
            omit,
            max_base,
        } => {
            let options = SplitOptions {
                max_base,
                omit,
                ..SplitOptions::default()
            };
            let cmd_result = split_core(&secret, shares, threshold, seed, &options)?;
            eprint!("{}", cmd_result.output);
            println!("{}", cmd_result.result);
        }
    }

    Ok(())
}

fn recover_files(files: &[PathBuf], mode: DivisionMode, json: bool) -> Result<()> {
    let mut failed = 0;

    for path in files {
        let source = path.display().to_string();
        let outcome = read_input(path).and_then(|text| recover_core(&source, &text, mode));

        match outcome {
            Ok(cmd_result) if json => println!("{}", cmd_result.result),
            Ok(cmd_result) => {
                println!("{}", cmd_result.output);
                println!("{}", cmd_result.result);
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} documents failed", failed, files.len());
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
