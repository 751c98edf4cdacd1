// Cover strategies: greedy heuristic, randomized baseline, exact program

pub mod exact;
pub mod greedy;
pub mod randomized;

pub use exact::{exact, ExactConfig, ExactSolver, SELECTION_THRESHOLD};
pub use greedy::{greedy, GreedySolver};
pub use randomized::{random_approx, RandomSolver};
