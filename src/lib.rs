// Domain layer: instances, covers and the engine contract
pub mod domain;

// Application layer: instance generation and the comparison harness
pub mod application;

// Cover strategies
pub mod solver;

// Engine adapters: concrete implementations of MipEngine
pub mod engine;

// Infrastructure layer: command line, logging and benchmark wiring
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    Cover, Element, EngineBackend, EngineError, ExactStatus, Instance, MipEngine, SetCoverError,
    SolverResult, Subset, SubsetKey,
};

pub use application::{generate, Experiment, ExperimentConfig, InstanceGenerator, Strategy};

pub use solver::{
    exact, greedy, random_approx, ExactConfig, ExactSolver, GreedySolver, RandomSolver,
};

pub use engine::EngineFactory;
