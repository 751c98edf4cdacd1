use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::application::ExperimentConfig;
use crate::domain::EngineBackend;
use crate::solver::ExactConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare greedy, randomized and exact Set Cover solvers")]
pub struct Cli {
    /// Universe size of every generated instance
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub num_elements: usize,
    /// Subsets per instance, 0 draws a random count per trial
    #[arg(short = 'k', long, default_value_t = 100)]
    pub num_subsets: usize,
    #[arg(short, long, default_value_t = 10)]
    pub trials: usize,
    /// Seed for the PRNG, omit for a non-deterministic run
    #[arg(short, long)]
    pub seed: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = BackendArg::Auto)]
    pub backend: BackendArg,
    /// Time limit of the exact solver in seconds
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,
    /// Draw budget of the randomized solver
    #[arg(long)]
    pub max_draws: Option<usize>,
    /// Let the MIP engine print its own log
    #[arg(long)]
    pub engine_log: bool,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Auto,
    Highs,
    CoinCbc,
    MicroLp,
}

impl From<BackendArg> for EngineBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => EngineBackend::Auto,
            BackendArg::Highs => EngineBackend::Highs,
            BackendArg::CoinCbc => EngineBackend::CoinCbc,
            BackendArg::MicroLp => EngineBackend::MicroLp,
        }
    }
}

impl Cli {
    pub fn experiment_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut exact = ExactConfig::default()
            .with_backend(self.backend.into())
            .with_verbose(self.engine_log);
        if let Some(seconds) = self.time_limit {
            let limit = Duration::try_from_secs_f64(seconds)
                .map_err(|e| anyhow::anyhow!("invalid time limit {seconds}: {e}"))?;
            exact = exact.with_time_limit(limit);
        }

        Ok(ExperimentConfig {
            num_elements: self.num_elements,
            num_subsets: self.num_subsets,
            trials: self.trials,
            seed: self.seed,
            exact,
            random_max_draws: self.max_draws,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_experiment() {
        let cli = Cli::parse_from(["setcover-bench"]);
        let config = cli.experiment_config().unwrap();
        assert_eq!(config.num_elements, 1000);
        assert_eq!(config.num_subsets, 100);
        assert_eq!(config.trials, 10);
        assert_eq!(config.exact.backend, EngineBackend::Auto);
        assert_eq!(config.exact.time_limit, None);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "setcover-bench",
            "-n",
            "50",
            "-k",
            "0",
            "--seed",
            "3",
            "--backend",
            "micro-lp",
            "--time-limit",
            "1.5",
            "--log-level",
            "debug",
        ]);
        let config = cli.experiment_config().unwrap();
        assert_eq!(config.num_elements, 50);
        assert_eq!(config.num_subsets, 0);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.exact.backend, EngineBackend::MicroLp);
        assert_eq!(config.exact.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_negative_time_limit() {
        let cli = Cli::parse_from(["setcover-bench", "--time-limit=-2"]);
        assert!(cli.experiment_config().is_err());
    }
}
