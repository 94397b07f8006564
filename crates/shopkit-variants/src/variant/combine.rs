//! Cartesian combination enumeration.
//!
//! Enumeration order is a documented contract, not an accident: the first
//! axis varies slowest and the last varies fastest (odometer order).
//! Positional SKU fallback and tabular row order both depend on it.

use crate::ids::AttributeId;
use serde::{Deserialize, Serialize};

/// One attribute axis participating in generation: the attribute and its
/// selected values, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
    /// The attribute this axis selects values of.
    pub attribute_id: AttributeId,
    /// Selected values, in enumeration order.
    pub values: Vec<String>,
}

impl AttributeSelection {
    pub fn new<I, S>(attribute_id: AttributeId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute_id,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// One (attribute, value) assignment within a combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombinationPair {
    /// The attribute being assigned.
    pub attribute_id: AttributeId,
    /// The assigned value.
    pub value: String,
}

impl CombinationPair {
    pub fn new(attribute_id: AttributeId, value: impl Into<String>) -> Self {
        Self {
            attribute_id,
            value: value.into(),
        }
    }
}

/// One specific assignment of exactly one value to each participating
/// attribute, in the attributes' canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    /// The (attribute, value) pairs, one per participating attribute.
    pub pairs: Vec<CombinationPair>,
}

impl Combination {
    pub fn new(pairs: Vec<CombinationPair>) -> Self {
        Self { pairs }
    }

    /// Number of participating attributes.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the value assigned to an attribute.
    pub fn value_for(&self, attribute_id: &AttributeId) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| &p.attribute_id == attribute_id)
            .map(|p| p.value.as_str())
    }

    /// The assigned values in combination order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.value.as_str())
    }
}

/// The number of combinations `axes` would produce, or `None` on overflow.
///
/// Callers wanting a combinatorial-explosion guard check this before
/// constructing a [`CombinationGenerator`]; the generator itself enforces no
/// ceiling. Empty input counts as zero, matching the generator's yield.
pub fn combination_count(axes: &[AttributeSelection]) -> Option<u128> {
    if axes.is_empty() {
        return Some(0);
    }
    axes.iter()
        .try_fold(1u128, |acc, axis| acc.checked_mul(axis.values.len() as u128))
}

/// Lazy enumeration of the cartesian product of attribute value sets.
///
/// Yields every combination exactly once, in odometer order. An empty axis
/// list, or any axis with zero values, produces the empty sequence. The
/// generator is cheap to clone, which restarts enumeration from the top.
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    axes: Vec<AttributeSelection>,
    /// Per-axis value cursor; `None` once exhausted.
    odometer: Option<Vec<usize>>,
    remaining: u128,
}

impl CombinationGenerator {
    /// Build a generator over the given axes.
    pub fn new(axes: Vec<AttributeSelection>) -> Self {
        // `remaining` only feeds size_hint; enumeration itself never
        // depends on it, so saturating on overflow is harmless.
        let remaining = combination_count(&axes).unwrap_or(u128::MAX);
        let odometer = if remaining == 0 {
            None
        } else {
            Some(vec![0; axes.len()])
        };
        Self {
            axes,
            odometer,
            remaining,
        }
    }

    /// Combinations not yet yielded.
    pub fn remaining(&self) -> u128 {
        self.remaining
    }

    /// Advance the odometer: last axis fastest, carrying leftward.
    fn advance(&mut self) {
        let Some(odometer) = self.odometer.as_mut() else {
            return;
        };
        for (slot, axis) in odometer.iter_mut().zip(&self.axes).rev() {
            *slot += 1;
            if *slot < axis.values.len() {
                return;
            }
            *slot = 0;
        }
        // Carried past the slowest axis: sequence complete.
        self.odometer = None;
    }
}

impl Iterator for CombinationGenerator {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        let odometer = self.odometer.as_ref()?;
        let pairs = odometer
            .iter()
            .zip(&self.axes)
            .map(|(&slot, axis)| {
                CombinationPair::new(axis.attribute_id.clone(), axis.values[slot].clone())
            })
            .collect();
        self.remaining = self.remaining.saturating_sub(1);
        self.advance();
        Some(Combination::new(pairs))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
