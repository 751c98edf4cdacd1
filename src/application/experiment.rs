use std::fmt;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::Rng;

use crate::application::generator::InstanceGenerator;
use crate::domain::{Cover, ExactStatus, Result};
use crate::solver::{ExactConfig, ExactSolver, GreedySolver, RandomSolver};

/// Strategy compared by the experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Greedy,
    Randomized,
    Exact,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Greedy, Strategy::Randomized, Strategy::Exact];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => f.pad("greedy"),
            Strategy::Randomized => f.pad("randomized"),
            Strategy::Exact => f.pad("exact"),
        }
    }
}

/// Configuration of a batch of trials
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub num_elements: usize,
    /// `0` picks a random subset count for every trial
    pub num_subsets: usize,
    pub trials: usize,
    /// Seed for the PRNG. If undefined, the harness seeds from OS entropy
    pub seed: Option<u64>,
    pub exact: ExactConfig,
    /// Draw budget of the randomized solver, `None` keeps its default
    pub random_max_draws: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_elements: 1000,
            num_subsets: 100,
            trials: 10,
            seed: None,
            exact: ExactConfig::default(),
            random_max_draws: None,
        }
    }
}

/// Result of one strategy on one trial instance
#[derive(Debug, Clone)]
pub struct TrialRecord {
    pub trial: usize,
    pub strategy: Strategy,
    pub cover: Cover,
    pub elapsed: Duration,
    /// Whether the cover's union is the universe
    pub valid: bool,
    /// Only set for the exact strategy
    pub exact_status: Option<ExactStatus>,
}

impl TrialRecord {
    pub fn cover_size(&self) -> usize {
        self.cover.len()
    }

    /// False for an exact trial that ended without an optimum
    pub fn is_solved(&self) -> bool {
        self.exact_status.map_or(true, |status| status.is_optimal())
    }
}

/// Per-strategy aggregate over every trial.
///
/// Cover sizes only count solved trials, times count all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub trials: usize,
    pub solved: usize,
    pub mean_cover_size: f64,
    pub min_cover_size: usize,
    pub max_cover_size: usize,
    pub mean_elapsed: Duration,
}

/// Ordered trial records of one experiment run
#[derive(Debug, Clone, Default)]
pub struct ExperimentReport {
    records: Vec<TrialRecord>,
}

impl ExperimentReport {
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn push(&mut self, record: TrialRecord) {
        self.records.push(record);
    }

    pub fn records_for(&self, strategy: Strategy) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(move |r| r.strategy == strategy)
    }

    /// Cover size per trial, in trial order
    pub fn cover_sizes(&self, strategy: Strategy) -> Vec<usize> {
        self.records_for(strategy).map(TrialRecord::cover_size).collect()
    }

    pub fn summary(&self, strategy: Strategy) -> Option<StrategySummary> {
        let records: Vec<&TrialRecord> = self.records_for(strategy).collect();
        let trials = records.len();
        if trials == 0 {
            return None;
        }

        let sizes = records.iter().filter(|r| r.is_solved()).map(|r| r.cover_size());
        let solved = sizes.clone().count();
        let total_size: usize = sizes.clone().sum();
        let total_elapsed: Duration = records.iter().map(|r| r.elapsed).sum();

        Some(StrategySummary {
            strategy,
            trials,
            solved,
            mean_cover_size: if solved == 0 {
                0.0
            } else {
                total_size as f64 / solved as f64
            },
            min_cover_size: sizes.clone().min().unwrap_or(0),
            max_cover_size: sizes.max().unwrap_or(0),
            mean_elapsed: total_elapsed / trials as u32,
        })
    }

    /// Summaries in greedy, randomized, exact order, skipping strategies without records
    pub fn summaries(&self) -> Vec<StrategySummary> {
        Strategy::ALL
            .iter()
            .filter_map(|&s| self.summary(s))
            .collect()
    }
}

/// Runs every strategy on a fresh instance per trial
pub struct Experiment {
    config: ExperimentConfig,
    generator: InstanceGenerator,
    greedy: GreedySolver,
    random: RandomSolver,
    exact: ExactSolver,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        let exact = ExactSolver::from_config(config.exact.clone())?;
        Self::with_exact_solver(config, exact)
    }

    /// Uses `exact` as is, ignoring `config.exact`
    pub fn with_exact_solver(config: ExperimentConfig, exact: ExactSolver) -> Result<Self> {
        let generator = InstanceGenerator::new(config.num_elements, config.num_subsets)?;
        let random = match config.random_max_draws {
            Some(max) => RandomSolver::new().with_max_draws(max),
            None => RandomSolver::new(),
        };
        Ok(Self {
            config,
            generator,
            greedy: GreedySolver::new(),
            random,
            exact,
        })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn exact_engine(&self) -> &str {
        self.exact.engine_name()
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ExperimentReport> {
        let mut report = ExperimentReport::default();

        for trial in 1..=self.config.trials {
            let instance = self.generator.generate(rng)?;
            info!(
                "trial {}: {} elements, {} subsets",
                trial,
                instance.universe_size(),
                instance.num_subsets()
            );

            let start = Instant::now();
            let cover = self.greedy.solve(&instance);
            let elapsed = start.elapsed();
            report.push(TrialRecord {
                trial,
                strategy: Strategy::Greedy,
                valid: instance.is_cover(&cover),
                cover,
                elapsed,
                exact_status: None,
            });

            let start = Instant::now();
            let cover = self.random.solve(&instance, rng)?;
            let elapsed = start.elapsed();
            report.push(TrialRecord {
                trial,
                strategy: Strategy::Randomized,
                valid: instance.is_cover(&cover),
                cover,
                elapsed,
                exact_status: None,
            });

            let start = Instant::now();
            let result = self.exact.solve(&instance)?;
            let elapsed = start.elapsed();
            let status = result.status;
            let (cover, valid) = if result.is_optimal() {
                let cover = result.into_cover()?;
                let valid = instance.is_cover(&cover);
                (cover, valid)
            } else {
                warn!("trial {}: exact solve ended with status {}", trial, status);
                (Cover::new(), false)
            };
            report.push(TrialRecord {
                trial,
                strategy: Strategy::Exact,
                valid,
                cover,
                elapsed,
                exact_status: Some(status),
            });

            for record in report.records().iter().filter(|r| r.trial == trial) {
                info!(
                    "trial {}: {:<10} size {:>4} in {:?}",
                    trial,
                    record.strategy,
                    record.cover_size(),
                    record.elapsed
                );
            }
        }

        Ok(report)
    }
}
