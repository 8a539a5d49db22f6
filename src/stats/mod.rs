pub mod exec;
pub mod launch;
pub mod output;
pub mod progress;
pub mod result;
pub mod walk;

pub use exec::{exec, resolve_folders};
pub use launch::{launch, launch_at, LaunchOptions};
pub use output::{output_dashboard, output_json};
pub use progress::ScanProgress;
pub use result::StatsResult;
pub use walk::{AuthorFilter, LedgerMode, RepositoryWalker};
