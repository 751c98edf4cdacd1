// Infrastructure: wiring of a full benchmark run
// Seeds the PRNG, runs the experiment and logs the report

use anyhow::Context;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::application::{Experiment, ExperimentConfig, ExperimentReport};

pub fn run_bench(config: ExperimentConfig) -> anyhow::Result<ExperimentReport> {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let trials = config.trials;
    let experiment = Experiment::new(config).context("could not set up the experiment")?;
    log_banner(&experiment);

    let report = experiment
        .run(&mut rng)
        .with_context(|| format!("experiment of {} trials failed", trials))?;

    log_summary(&report);
    Ok(report)
}

fn log_banner(experiment: &Experiment) {
    let config = experiment.config();
    info!(
        "Set Cover comparison: {} trials, {} elements, {} subsets",
        config.trials,
        config.num_elements,
        match config.num_subsets {
            0 => "random".to_string(),
            k => k.to_string(),
        }
    );
    info!(
        "exact engine: {}, time limit: {:?}, seed: {:?}",
        experiment.exact_engine(),
        config.exact.time_limit,
        config.seed
    );
}

fn log_summary(report: &ExperimentReport) {
    info!(
        "{:<10} {:>6} {:>6} {:>10} {:>6} {:>6} {:>14}",
        "strategy", "trials", "solved", "mean size", "min", "max", "mean time"
    );
    for summary in report.summaries() {
        info!(
            "{:<10} {:>6} {:>6} {:>10.2} {:>6} {:>6} {:>14}",
            summary.strategy,
            summary.trials,
            summary.solved,
            summary.mean_cover_size,
            summary.min_cover_size,
            summary.max_cover_size,
            format!("{:.5}s", summary.mean_elapsed.as_secs_f64())
        );
    }

    let unsolved = report.records().iter().filter(|r| !r.is_solved()).count();
    if unsolved > 0 {
        warn!("{} exact trials ended without an optimum", unsolved);
    }
    let invalid = report
        .records()
        .iter()
        .filter(|r| r.is_solved() && !r.valid)
        .count();
    if invalid > 0 {
        warn!("{} trial records hold covers that miss elements", invalid);
    }
}
