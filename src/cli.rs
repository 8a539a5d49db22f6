use crate::discover::discover;
use crate::stats::LedgerMode;
use crate::watch::{WatchList, DEFAULT_FILE_NAME};
use crate::window::MAX_DURATION_WEEKS;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use directories::BaseDirs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitcontrib")]
#[command(about = "Commit activity and contribution statistics across git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to the watch list (default: ~/.gitcontrib)")]
    pub watch_list: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress indicator")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn watch_list(&self) -> Result<WatchList> {
        if let Some(path) = &self.watch_list {
            return Ok(WatchList::new(path));
        }
        let dirs = BaseDirs::new().context("Cannot locate the home directory, use --watch-list")?;
        Ok(WatchList::new(dirs.home_dir().join(DEFAULT_FILE_NAME)))
    }
}

#[derive(Args, Clone, Default)]
pub struct StatsArgs {
    #[arg(short = 'f', long = "folder", help = "Repository to scan (repeatable, default: watch list)")]
    pub folders: Vec<PathBuf>,

    #[arg(short, long, help = "Only count commits of these comma-separated emails or names")]
    pub user: Option<String>,

    #[arg(
        short,
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DURATION_WEEKS)),
        help = "Number of weeks to scan (0 = 365 days)"
    )]
    pub weeks: u32,

    #[arg(
        short,
        long,
        default_value = "",
        allow_hyphen_values = true,
        help = "End the scan this far back: <int>[y/m/w/d]"
    )]
    pub delta: String,

    #[arg(short, long, help = "Merge all folders into a single result")]
    pub merge: bool,

    #[arg(long, help = "Regex of file paths to leave out of line counts (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(long, help = "Regex of file paths to count lines for (repeatable)")]
    pub include: Vec<String>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, value_enum, default_value_t, help = "How file stats are added to the author totals")]
    pub ledger_mode: LedgerMode,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute commit statistics
    Stats(StatsArgs),
    /// Find repositories under a folder and add them to the watch list
    Scan {
        #[arg(help = "Folder to search")]
        folder: PathBuf,
    },
    /// Print the watch list
    List,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats(args) => crate::stats::exec(&self.common, args),
            Commands::Scan { folder } => {
                let watch_list = self.common.watch_list()?;
                let repos = discover(&folder)
                    .with_context(|| format!("Failed to scan {}", folder.display()))?;
                for repo in &repos {
                    println!("Folder {} added to scan list", repo.display());
                }
                watch_list
                    .append(&repos)
                    .with_context(|| format!("Failed to update {}", watch_list.path().display()))
            }
            Commands::List => {
                let watch_list = self.common.watch_list()?;
                let repos = watch_list
                    .load()
                    .with_context(|| format!("Failed to read {}", watch_list.path().display()))?;
                println!("Git folders:\n");
                for repo in repos {
                    println!("- {}", repo.display());
                }
                Ok(())
            }
        }
    }
}
