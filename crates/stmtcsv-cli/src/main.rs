mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stmtcsv",
    version,
    about = "Convert scanned bank-statement PDFs to a transaction CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert statement PDFs (or saved analysis responses) to transactions
    Convert {
        /// Statement PDFs, or pre-saved analysis responses (.json)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write transactions to a CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Write unrecognised rows to a CSV file for manual review
        #[arg(long = "junk-out", value_name = "FILE")]
        junk_out: Option<PathBuf>,

        /// Statement year appended to each date (default: read from the
        /// file name at --year-offset)
        #[arg(short, long)]
        year: Option<String>,

        /// Character offset of the 4-digit year within the file name
        #[arg(long, default_value_t = stmtcsv_core::model::DEFAULT_YEAR_OFFSET)]
        year_offset: usize,

        /// Region the analysis service is called in
        #[arg(long, default_value = stmtcsv_core::analysis::aws_cli::DEFAULT_REGION)]
        region: String,

        /// Output format: table (default) or json
        #[arg(short = 'o', long, default_value = "table")]
        output: String,
    },
    /// Dump every reconstructed table from a saved analysis response
    Tables {
        /// Path to a saved analysis response (.json)
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short = 'o', long, default_value = "table")]
        output: String,
    },
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stmtcsv_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            out,
            junk_out,
            year,
            year_offset,
            region,
            output,
        } => commands::convert::run(inputs, out, junk_out, year, year_offset, &region, &output),
        Commands::Tables { input_file, output } => commands::tables::run(input_file, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
