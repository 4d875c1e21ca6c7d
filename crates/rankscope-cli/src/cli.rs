//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rankscope::{DEFAULT_ARCHIVE, DEFAULT_CHARTS_DIR, DEFAULT_EXTRACT_DIR, PipelineConfig};

/// Rankscope: statistics and charts for world top company rankings
#[derive(Parser)]
#[command(name = "rankscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: statistics and charts
    Run {
        #[command(flatten)]
        data: DataArgs,

        /// Directory charts are written to
        #[arg(long, default_value = DEFAULT_CHARTS_DIR)]
        charts_dir: PathBuf,

        /// Don't open charts after rendering
        #[arg(long)]
        no_open: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print descriptive statistics and the correlation matrix
    Describe {
        #[command(flatten)]
        data: DataArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the charts without printing statistics
    Charts {
        #[command(flatten)]
        data: DataArgs,

        /// Directory charts are written to
        #[arg(long, default_value = DEFAULT_CHARTS_DIR)]
        charts_dir: PathBuf,

        /// Don't open charts after rendering
        #[arg(long)]
        no_open: bool,
    },
}

/// Where the datasets come from.
#[derive(Args)]
pub struct DataArgs {
    /// Zip archive holding the ranking CSVs
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ARCHIVE)]
    pub archive: PathBuf,

    /// Directory the archive is extracted into
    #[arg(long, value_name = "DIR", default_value = DEFAULT_EXTRACT_DIR)]
    pub extract_to: PathBuf,

    /// Read the CSVs from the extraction directory without unpacking
    #[arg(long)]
    pub skip_extract: bool,
}

impl DataArgs {
    /// Pipeline configuration for these arguments.
    pub fn config(self) -> PipelineConfig {
        PipelineConfig::default()
            .with_archive(self.archive)
            .with_extract_dir(self.extract_to)
            .with_skip_extract(self.skip_extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["rankscope", "run"]);

        match cli.command {
            Commands::Run {
                data,
                charts_dir,
                no_open,
                json,
            } => {
                assert_eq!(data.archive, PathBuf::from("world top companies.zip"));
                assert_eq!(data.extract_to, PathBuf::from("world_top_companies/"));
                assert!(!data.skip_extract);
                assert_eq!(charts_dir, PathBuf::from("charts"));
                assert!(!no_open);
                assert!(!json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_describe_flags() {
        let cli = Cli::parse_from([
            "rankscope",
            "describe",
            "--extract-to",
            "data",
            "--skip-extract",
            "--json",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Describe { data, json } => {
                assert!(json);
                let config = data.config();
                assert!(config.skip_extract);
                assert_eq!(config.extract_dir, PathBuf::from("data"));
            }
            _ => panic!("expected describe"),
        }
    }
}
