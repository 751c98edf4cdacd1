// Application layer: instance generation and the comparison harness

pub mod experiment;
pub mod generator;

pub use experiment::{
    Experiment, ExperimentConfig, ExperimentReport, Strategy, StrategySummary, TrialRecord,
};
pub use generator::{generate, InstanceGenerator};
