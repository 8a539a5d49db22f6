pub mod cli;
pub mod discover;
pub mod error;
pub mod filter;
pub mod git;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod stats;
pub mod util;
pub mod watch;
pub mod window;

pub use error::{ContribError, Result};
pub use filter::PathFilter;
pub use ledger::ContributionLedger;
pub use stats::{launch, launch_at, LaunchOptions, LedgerMode, StatsResult};
pub use window::ScanWindow;
