mod cli_utils;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_dump, cmd_lookup, cmd_metadata, cmd_validate};

#[derive(Parser)]
#[command(name = "mmdb-tool")]
#[command(about = "Inspect and query MaxMind DB (MMDB) files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an IP address and print the matched record (or a sub-path of it) as JSON
    Lookup {
        /// Path to the .mmdb file
        database: PathBuf,
        /// The IP address to look up
        address: String,
        /// Dotted path into the matched record, e.g. "country.iso_code"
        #[arg(long, default_value = "")]
        path: String,
        /// Print nothing; use the exit code to report whether a record was found
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the database's metadata record as JSON
    Metadata {
        /// Path to the .mmdb file
        database: PathBuf,
    },
    /// Look up an IP address and pretty-print the full matched record tree
    Dump {
        /// Path to the .mmdb file
        database: PathBuf,
        /// The IP address to look up
        address: String,
        /// Dotted path into the matched record (currently only the empty path is supported)
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Open the database and exercise every operation against boundary addresses
    Validate {
        /// Path to the .mmdb file
        database: PathBuf,
        /// Print machine-readable JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Lookup {
            database,
            address,
            path,
            quiet,
        } => cmd_lookup(database, address, path, quiet),
        Commands::Metadata { database } => cmd_metadata(database),
        Commands::Dump { database, address, path } => cmd_dump(database, address, path),
        Commands::Validate { database, json } => cmd_validate(database, json),
    }
}
