use anyhow::Result;
use clap::Parser;
use setcover::infrastructure::{init_logger, run_bench, Cli};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.log_level)?;

    let config = args.experiment_config()?;
    run_bench(config)?;

    Ok(())
}
