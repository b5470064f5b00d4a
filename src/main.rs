use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, prelude::*};
mod auth;
use djhash::{
    Algorithm, DEFAULT_ALGORITHM, DEFAULT_ITERATIONS, DEFAULT_SALT_LENGTH, KdfParams, Record,
    check_password, random_string,
};

const LOG_ENV: &str = "DJHASH_LOG";

#[derive(Debug, clap::Args)]
struct HashArgs {
    /// Salt to use instead of a random one (must not contain '$')
    #[arg(long)]
    salt: Option<String>,

    /// Length of the generated salt (default: 12)
    #[arg(long, env = "DJHASH_SALT_LENGTH", default_value_t = DEFAULT_SALT_LENGTH)]
    salt_length: usize,

    /// PBKDF2 iterations (default: 10000)
    #[arg(
        long,
        env = "DJHASH_ITERATIONS",
        default_value_t = DEFAULT_ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    iterations: u32,

    /// Digest algorithm (default: pbkdf2_sha256)
    #[arg(long, env = "DJHASH_ALGORITHM", default_value_t = DEFAULT_ALGORITHM)]
    algorithm: Algorithm,
}

impl HashArgs {
    fn to_kdf_params(&self) -> KdfParams {
        KdfParams::new(self.algorithm, self.iterations)
    }

    fn resolve_salt(&self) -> Result<String> {
        match &self.salt {
            Some(salt) => {
                if salt.contains(djhash::SEPARATOR) {
                    anyhow::bail!("salt must not contain '{}'", djhash::SEPARATOR);
                }
                Ok(salt.clone())
            }
            None => random_string(self.salt_length).context("failed to generate salt"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "djhash")]
#[command(
    version,
    about = "Django-compatible PBKDF2 password hashing and verification."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password into an encoded record
    Make {
        #[command(flatten)]
        params: HashArgs,
    },

    /// Checks a password against an encoded record
    #[command(arg_required_else_help = true)]
    Check { record: String },

    /// Shows the fields of an encoded record
    #[command(arg_required_else_help = true)]
    Inspect {
        record: String,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Lists supported algorithms
    Algorithms,
}

#[derive(Serialize)]
struct Inspection<'a> {
    #[serde(flatten)]
    record: &'a Record,
    needs_rehash: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Cli::parse();

    match args.command {
        Commands::Make { params } => {
            let salt = params.resolve_salt()?;
            let password = auth::read_password(true)?;
            let record = Record::create(&password, &salt, params.to_kdf_params());
            println!("{record}");
        }
        Commands::Check { record } => {
            let password = auth::read_password(false)?;
            if check_password(&password, &record) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Inspect { record, json } => {
            let record = Record::parse(&record).context("unable to parse record")?;
            let needs_rehash = record.needs_rehash(KdfParams::default());

            if json {
                let report = Inspection {
                    record: &record,
                    needs_rehash,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("algorithm:    {}", record.algorithm());
                println!("iterations:   {}", record.iterations());
                println!("salt:         {}", record.salt());
                println!("hash:         {}", record.hash());
                println!(
                    "needs rehash: {}",
                    if needs_rehash { "yes" } else { "no" }
                );
            }
        }
        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                if algorithm == DEFAULT_ALGORITHM {
                    println!("{algorithm} (default)");
                } else {
                    println!("{algorithm}");
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
