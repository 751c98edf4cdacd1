// Domain value objects shared by the solvers and the engine adapters

use std::fmt;

/// Identifier of a universe element. Universes are always `1..=N`.
pub type Element = usize;

/// Identifier of a subset inside an [`Instance`](super::Instance).
pub type SubsetKey = usize;

/// Terminal status of an exact solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactStatus {
    /// Proven minimum cover found
    Optimal,
    /// No assignment satisfies every covering row
    Infeasible,
    /// Objective can be decreased without bound
    Unbounded,
    /// Engine stopped without a usable answer
    NotSolved,
    /// Caller-supplied time limit reached
    TimedOut,
}

impl ExactStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, ExactStatus::Optimal)
    }
}

impl fmt::Display for ExactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExactStatus::Optimal => write!(f, "Optimal"),
            ExactStatus::Infeasible => write!(f, "Infeasible"),
            ExactStatus::Unbounded => write!(f, "Unbounded"),
            ExactStatus::NotSolved => write!(f, "Not Solved"),
            ExactStatus::TimedOut => write!(f, "Time Limit Reached"),
        }
    }
}

/// MIP engine used by the exact solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineBackend {
    /// First engine compiled into the crate (HiGHS, then CBC, then microlp)
    #[default]
    Auto,
    /// HiGHS through the `highs` crate
    Highs,
    /// COIN-OR CBC through `good_lp`
    CoinCbc,
    /// Pure Rust branch and bound through `good_lp`
    MicroLp,
}

impl fmt::Display for EngineBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineBackend::Auto => write!(f, "Auto"),
            EngineBackend::Highs => write!(f, "HiGHS"),
            EngineBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            EngineBackend::MicroLp => write!(f, "microlp"),
        }
    }
}
