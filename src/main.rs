use anyhow::Result;
use clap::Parser;
use gitcontrib::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    gitcontrib::logging::init(cli.common.verbose);
    cli.execute()
}
