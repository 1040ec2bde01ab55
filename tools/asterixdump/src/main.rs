mod commands;
mod format;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{decode::DecodeArgs, schema::SchemaArgs};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "asterixdump", about = "Decode ASTERIX data using XML category descriptors")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode hex text or a binary capture
    Decode(DecodeArgs),
    /// Print the layout of a category
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Decode(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}

/// Warnings are always shown; `-v` adds debug and `-vv` trace output.
fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Debug);
        assert_eq!(log_level(2), LevelFilter::Trace);
        assert_eq!(log_level(9), LevelFilter::Trace);
    }
}
