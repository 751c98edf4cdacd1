use std::collections::{BTreeMap, BTreeSet};

use super::cover::Cover;
use super::error::{Result, SetCoverError};
use super::value_objects::{Element, SubsetKey};

/// A named collection of universe elements.
///
/// `elements` keeps the sequence as it was built (coverage repair may append
/// elements a second time), `members` is the distinct view used by the solvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    elements: Vec<Element>,
    members: BTreeSet<Element>,
}

impl Subset {
    fn new(elements: Vec<Element>) -> Self {
        let members = elements.iter().copied().collect();
        Self { elements, members }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn members(&self) -> &BTreeSet<Element> {
        &self.members
    }

    pub fn contains(&self, element: Element) -> bool {
        self.members.contains(&element)
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A Set-Cover instance over the universe `{1..=universe_size}`.
///
/// Construction validates that every subset is non-empty, only holds universe
/// elements, and that the union of all subsets is exactly the universe. Once
/// built an instance is never mutated. Subsets are enumerated in ascending key
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    universe_size: usize,
    subsets: BTreeMap<SubsetKey, Subset>,
}

impl Instance {
    pub fn new(universe_size: usize, subsets: BTreeMap<SubsetKey, Vec<Element>>) -> Result<Self> {
        if universe_size == 0 {
            return Err(SetCoverError::InvalidArgument(
                "universe must contain at least one element".to_string(),
            ));
        }
        if subsets.is_empty() {
            return Err(SetCoverError::InvalidArgument(
                "instance must contain at least one subset".to_string(),
            ));
        }

        let mut covered = vec![false; universe_size];
        for (key, elements) in &subsets {
            if elements.is_empty() {
                return Err(SetCoverError::InvalidArgument(format!(
                    "subset {} is empty",
                    key
                )));
            }
            for &element in elements {
                if element == 0 || element > universe_size {
                    return Err(SetCoverError::InvalidArgument(format!(
                        "subset {} contains element {} outside the universe 1..={}",
                        key, element, universe_size
                    )));
                }
                covered[element - 1] = true;
            }
        }

        if let Some(missing) = covered.iter().position(|&c| !c) {
            return Err(SetCoverError::InvalidArgument(format!(
                "element {} is not covered by any subset",
                missing + 1
            )));
        }

        let subsets = subsets
            .into_iter()
            .map(|(key, elements)| (key, Subset::new(elements)))
            .collect();

        Ok(Self {
            universe_size,
            subsets,
        })
    }

    /// Builds an instance from `(key, elements)` pairs. Later duplicates of a
    /// key replace earlier ones.
    pub fn from_subsets<I, E>(universe_size: usize, subsets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SubsetKey, E)>,
        E: Into<Vec<Element>>,
    {
        let subsets = subsets.into_iter().map(|(k, e)| (k, e.into())).collect();
        Self::new(universe_size, subsets)
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    pub fn universe(&self) -> impl Iterator<Item = Element> {
        1..=self.universe_size
    }

    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    pub fn subset(&self, key: SubsetKey) -> Option<&Subset> {
        self.subsets.get(&key)
    }

    /// Subsets in ascending key order
    pub fn subsets(&self) -> impl Iterator<Item = (SubsetKey, &Subset)> {
        self.subsets.iter().map(|(&key, subset)| (key, subset))
    }

    /// Subset keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = SubsetKey> + '_ {
        self.subsets.keys().copied()
    }

    /// Elements left uncovered by `cover`. Keys unknown to the instance are ignored.
    pub fn uncovered_by(&self, cover: &Cover) -> BTreeSet<Element> {
        let mut uncovered: BTreeSet<Element> = self.universe().collect();
        for key in cover.iter() {
            if let Some(subset) = self.subsets.get(&key) {
                for element in subset.members() {
                    uncovered.remove(element);
                }
            }
        }
        uncovered
    }

    pub fn is_cover(&self, cover: &Cover) -> bool {
        cover.iter().all(|key| self.subsets.contains_key(&key)) && self.uncovered_by(cover).is_empty()
    }
}
