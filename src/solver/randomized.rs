use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use crate::domain::{Cover, Element, Instance, Result, SetCoverError, SubsetKey};

/// Draw budget per subset used when no explicit budget is configured
pub const DRAWS_PER_SUBSET: usize = 1000;

/// Randomized baseline.
///
/// Draws subset keys uniformly with replacement and keeps every draw until the
/// universe is covered. Repeated draws are no-ops for the cover but still count
/// against the draw budget.
#[derive(Debug, Clone, Copy)]
pub struct RandomSolver {
    max_draws: DrawBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawBudget {
    /// `DRAWS_PER_SUBSET` times the number of subsets
    PerSubset,
    Fixed(usize),
    Unbounded,
}

impl Default for RandomSolver {
    fn default() -> Self {
        Self {
            max_draws: DrawBudget::PerSubset,
        }
    }
}

impl RandomSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = DrawBudget::Fixed(max_draws);
        self
    }

    /// Removes the draw budget. Termination then relies on every element
    /// belonging to some subset, which a valid [`Instance`] guarantees.
    pub fn unbounded(mut self) -> Self {
        self.max_draws = DrawBudget::Unbounded;
        self
    }

    pub fn max_draws(&self, instance: &Instance) -> Option<usize> {
        match self.max_draws {
            DrawBudget::PerSubset => Some(instance.num_subsets().saturating_mul(DRAWS_PER_SUBSET)),
            DrawBudget::Fixed(n) => Some(n),
            DrawBudget::Unbounded => None,
        }
    }

    pub fn solve<R: Rng + ?Sized>(&self, instance: &Instance, rng: &mut R) -> Result<Cover> {
        let keys: Vec<SubsetKey> = instance.keys().collect();
        let max_draws = self.max_draws(instance);

        let mut selected = Cover::new();
        let mut uncovered: BTreeSet<Element> = instance.universe().collect();
        let mut draws = 0usize;

        while !uncovered.is_empty() {
            if max_draws.is_some_and(|max| draws >= max) {
                return Err(SetCoverError::NonTermination { draws });
            }
            draws += 1;

            let key = keys[rng.random_range(0..keys.len())];
            if !selected.insert(key) {
                continue;
            }
            if let Some(subset) = instance.subset(key) {
                for element in subset.members() {
                    uncovered.remove(element);
                }
            }
        }

        debug!("random selected {} subsets after {} draws", selected.len(), draws);
        Ok(selected)
    }
}

/// Runs [`RandomSolver`] with its default draw budget
pub fn random_approx<R: Rng + ?Sized>(instance: &Instance, rng: &mut R) -> Result<Cover> {
    RandomSolver::new().solve(instance, rng)
}
