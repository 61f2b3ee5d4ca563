use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use hellocheck_core::hello::clienthello::parse_client_hello;
use hellocheck_core::verify::{self, CheckError, Scenario};

mod input;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "hellocheck")]
#[command(about = "Decode TLS ClientHello records and check duplicate suppression")]
struct Cli {
    /// Output format: "text" (human-readable) or "json" (one object per line)
    #[arg(short, long, global = true, default_value = "text")]
    output: String,

    /// Log skipped extensions and header fields
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cipher suites, supported versions and ALPN names of a ClientHello
    Decode {
        /// File holding one complete TLS record
        file: PathBuf,
        /// The file contains hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Check a ClientHello against a scenario's expected lists
    Verify {
        /// File holding one complete TLS record
        file: PathBuf,
        /// The file contains hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
        /// Scenario JSON [default: built-in reference scenario]
        #[arg(long)]
        scenario: Option<PathBuf>,
    },

    /// Write the ClientHello a conforming engine sends for a scenario
    Sample {
        /// Keep duplicate entries (what a non-conforming engine sends)
        #[arg(long)]
        naive: bool,
        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
        /// Destination file [default: stdout, hex only]
        #[arg(long)]
        out: Option<PathBuf>,
        /// Scenario JSON [default: built-in reference scenario]
        #[arg(long)]
        scenario: Option<PathBuf>,
    },

    /// Print the built-in reference scenario as JSON
    Scenario,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::parse(&cli.output)?;

    match cli.command {
        Commands::Decode { file, hex } => {
            let raw = input::read_record(&file, hex)?;
            let hello = parse_client_hello(&raw)
                .with_context(|| format!("Failed to decode {}", file.display()))?;
            output::print_handshake(&file, &hello, format)?;
        }

        Commands::Verify {
            file,
            hex,
            scenario,
        } => {
            let scenario = load_scenario(scenario.as_ref())?;
            let raw = input::read_record(&file, hex)?;
            match verify::check_client_hello(&raw, &scenario) {
                Ok(report) => output::print_report(&file, &report, format)?,
                Err(CheckError::Verify { report, error }) => {
                    output::print_report(&file, &report, format)?;
                    return Err(error.into());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to decode {}", file.display()))
                }
            }
        }

        Commands::Sample {
            naive,
            hex,
            out,
            scenario,
        } => {
            let scenario = load_scenario(scenario.as_ref())?;
            let raw = if naive {
                scenario.naive_hello()?
            } else {
                scenario.conformant_hello()?
            };
            match out {
                Some(path) => {
                    input::write_record(&path, &raw, hex)?;
                    info!("Wrote {} bytes to {}", raw.len(), path.display());
                }
                None if hex => println!("{}", hex::encode(&raw)),
                None => bail!("Refusing to write raw bytes to stdout; pass --hex or --out <FILE>"),
            }
        }

        Commands::Scenario => {
            println!("{}", Scenario::reference().to_json_pretty()?);
        }
    }

    Ok(())
}

fn load_scenario(path: Option<&PathBuf>) -> Result<Scenario> {
    match path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display())),
        None => Ok(Scenario::reference()),
    }
}
