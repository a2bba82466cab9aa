//! Command-line interface definition

use std::path::PathBuf;
use std::time::Duration;

use aeolens_core::presenter::Filter;
use aeolens_core::types::{Category, Priority};
use clap::{Args, Parser, Subcommand};

use crate::render::ViewOptions;

#[derive(Debug, Parser)]
#[command(name = "aeolens")]
#[command(author = "Pon Datalab")]
#[command(version, about = "aeolens — SEO & AEO audit reports for any page", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Analyze a page and print the report
    aeolens analyze example.com

    # Only high-priority AEO actions, as JSON
    aeolens analyze https://example.com/blog --category aeo --priority high --json

    # Save the JSON export, then view it again later
    aeolens analyze example.com --save reports/
    aeolens show reports/example.com__index.json --top 3")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a URL and print the report
    Analyze(AnalyzeArgs),
    /// Render a previously exported JSON report
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Page to analyze; `https://` is assumed when no scheme is given
    pub url: String,

    /// Simulated analysis time in milliseconds
    #[arg(long, env = "AEOLENS_DELAY_MS", default_value_t = 0)]
    pub delay_ms: u64,

    /// Give up on the analysis after this many seconds (0 disables)
    #[arg(long, env = "AEOLENS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the JSON report to PATH (a `.json` file or a directory)
    #[arg(short, long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

impl AnalyzeArgs {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Exported report file
    pub file: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Print the report as JSON instead of markdown
    #[arg(long)]
    pub json: bool,

    /// Recommendation category: all, seo, aeo
    #[arg(short, long, default_value = "all")]
    pub category: Filter<Category>,

    /// Recommendation priority: all, high, medium, low
    #[arg(short, long, default_value = "all")]
    pub priority: Filter<Priority>,

    /// Only consider the first N recommendations
    #[arg(short, long, allow_negative_numbers = true)]
    pub top: Option<i64>,
}

impl ViewArgs {
    pub fn options(&self) -> ViewOptions {
        ViewOptions {
            category: self.category,
            priority: self.priority,
            top: self.top,
        }
    }
}
