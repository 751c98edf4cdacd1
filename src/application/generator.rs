use std::collections::BTreeMap;

use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::domain::{Element, Instance, Result, SetCoverError, SubsetKey};

/// Random Set-Cover instances over `{1..=num_elements}`.
///
/// Each subset samples between 1 and `num_elements / 2` distinct elements.
/// Elements missed by every subset are then appended to a uniformly chosen
/// subset, so every generated instance is coverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceGenerator {
    num_elements: usize,
    /// `0` draws the subset count uniformly from `1..=num_elements` per instance
    num_subsets: usize,
}

impl InstanceGenerator {
    pub fn new(num_elements: usize, num_subsets: usize) -> Result<Self> {
        if num_elements == 0 {
            return Err(SetCoverError::InvalidArgument(
                "num_elements must be positive".to_string(),
            ));
        }
        Ok(Self {
            num_elements,
            num_subsets,
        })
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn num_subsets(&self) -> usize {
        self.num_subsets
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Instance> {
        let n = self.num_elements;
        let num_subsets = match self.num_subsets {
            0 => rng.random_range(1..=n),
            k => k,
        };
        let max_size = (n / 2).max(1);

        let mut subsets: BTreeMap<SubsetKey, Vec<Element>> = BTreeMap::new();
        let mut covered = vec![false; n];

        for key in 1..=num_subsets {
            let size = rng.random_range(1..=max_size);
            let elements: Vec<Element> = index::sample(rng, n, size)
                .into_iter()
                .map(|i| i + 1)
                .collect();
            for &element in &elements {
                covered[element - 1] = true;
            }
            subsets.insert(key, elements);
        }

        let mut repaired = 0usize;
        for (i, _) in covered.iter().enumerate().filter(|&(_, &c)| !c) {
            let key = rng.random_range(1..=num_subsets);
            if let Some(elements) = subsets.get_mut(&key) {
                elements.push(i + 1);
                repaired += 1;
            }
        }

        debug!(
            "generated {} subsets over {} elements, {} elements repaired",
            num_subsets, n, repaired
        );
        Instance::new(n, subsets)
    }
}

/// Generates one instance. `num_subsets == 0` picks the count at random.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    num_elements: usize,
    num_subsets: usize,
) -> Result<Instance> {
    InstanceGenerator::new(num_elements, num_subsets)?.generate(rng)
}
