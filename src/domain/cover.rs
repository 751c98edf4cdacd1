use std::collections::BTreeSet;

use super::engine_service::EngineError;
use super::error::{Result, SetCoverError};
use super::models::EngineStatistics;
use super::value_objects::{ExactStatus, SubsetKey};

/// Set of selected subset keys, kept in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    keys: BTreeSet<SubsetKey>,
}

impl Cover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the key was already selected.
    pub fn insert(&mut self, key: SubsetKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: SubsetKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SubsetKey> + '_ {
        self.keys.iter().copied()
    }

    pub fn keys(&self) -> &BTreeSet<SubsetKey> {
        &self.keys
    }
}

impl FromIterator<SubsetKey> for Cover {
    fn from_iter<T: IntoIterator<Item = SubsetKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Outcome of the exact solver
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub status: ExactStatus,
    /// Minimum cover size as reported by the engine, set when optimal
    pub objective_value: Option<f64>,
    /// Selected subsets; empty unless the status is optimal
    pub cover: Cover,
    pub time_limit: Option<std::time::Duration>,
    pub statistics: EngineStatistics,
}

impl SolverResult {
    pub fn len(&self) -> usize {
        self.cover.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cover.is_empty()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Converts the result into its cover, turning every non-optimal status
    /// into the matching error.
    pub fn into_cover(self) -> Result<Cover> {
        match self.status {
            ExactStatus::Optimal => Ok(self.cover),
            ExactStatus::Infeasible => Err(SetCoverError::Infeasible(
                "no selection of subsets covers every element".to_string(),
            )),
            ExactStatus::Unbounded => Err(SetCoverError::Infeasible(
                "engine reported the covering program as unbounded".to_string(),
            )),
            ExactStatus::TimedOut => Err(SetCoverError::TimedOut {
                limit: self.time_limit,
            }),
            ExactStatus::NotSolved => Err(EngineError::ExecutionFailed(
                "engine stopped without solving the covering program".to_string(),
            )
            .into()),
        }
    }
}
