//! ronda CLI binary.
//!
//! Fetches a nested financial-data document, projects it into per-table CSV
//! files, and merges selected quarterly and daily sources onto the daily
//! price table.

mod cmd;
mod data;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Enrich daily price history with quarterly fundamentals and technical indicators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the financial-data document from a URL
    Fetch {
        /// Document URL
        #[arg(long)]
        url: String,

        /// Where to save the document
        #[arg(long, default_value = "document.json")]
        output: PathBuf,
    },

    /// Convert a fetched document into per-table CSV files
    Convert {
        /// Saved document path
        #[arg(long, default_value = "document.json")]
        input: PathBuf,

        /// Directory for the CSV files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Fallback symbol when the document carries none
        #[arg(long, default_value = "UNKNOWN")]
        symbol: String,
    },

    /// Merge selected sources onto the daily price table
    Merge {
        /// Directory holding the CSV files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Source names to merge, in order (default: all, quarterly first)
        #[arg(short, long, value_delimiter = ',')]
        sources: Vec<String>,

        /// Output CSV path
        #[arg(long, default_value = "merged_financial_data.csv")]
        output: PathBuf,

        /// Coverage report format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Fetch, convert, and merge in one pass
    Run {
        /// Document URL
        #[arg(long)]
        url: String,

        /// Where to save the document
        #[arg(long, default_value = "document.json")]
        document: PathBuf,

        /// Directory for the CSV files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Fallback symbol when the document carries none
        #[arg(long, default_value = "UNKNOWN")]
        symbol: String,

        /// Source names to merge, in order (default: all, quarterly first)
        #[arg(short, long, value_delimiter = ',')]
        sources: Vec<String>,

        /// Output CSV path
        #[arg(long, default_value = "merged_financial_data.csv")]
        output: PathBuf,

        /// Coverage report format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { url, output } => cmd::fetch::fetch_document(&url, &output).await,
        Commands::Convert {
            input,
            data_dir,
            symbol,
        } => cmd::convert::convert_document(&input, &data_dir, &symbol),
        Commands::Merge {
            data_dir,
            sources,
            output,
            format,
        } => cmd::merge::merge_sources(&data_dir, &sources, &output, &format),
        Commands::Run {
            url,
            document,
            data_dir,
            symbol,
            sources,
            output,
            format,
        } => {
            async {
                cmd::fetch::fetch_document(&url, &document).await?;
                cmd::convert::convert_document(&document, &data_dir, &symbol)?;
                cmd::merge::merge_sources(&data_dir, &sources, &output, &format)
            }
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
