//! Price resolution for combinations.

use crate::ids::AttributeId;
use crate::variant::Combination;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse table of per-value additive price adjustments.
///
/// Absence means a zero adjustment. Adjustments are independent of each
/// other, so the order pairs are applied in never matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRules {
    adjustments: HashMap<AttributeId, HashMap<String, f64>>,
}

impl PriceRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an adjustment for one attribute value.
    pub fn set(
        &mut self,
        attribute_id: AttributeId,
        value: impl Into<String>,
        adjustment: f64,
    ) {
        self.adjustments
            .entry(attribute_id)
            .or_default()
            .insert(value.into(), adjustment);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, attribute_id: AttributeId, value: impl Into<String>, adjustment: f64) -> Self {
        self.set(attribute_id, value, adjustment);
        self
    }

    /// The adjustment for one (attribute, value) pair; 0 when absent.
    pub fn adjustment_for(&self, attribute_id: &AttributeId, value: &str) -> f64 {
        self.adjustments
            .get(attribute_id)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

/// Compute the final price of one combination: the base price plus the sum of
/// the per-value adjustments its pairs match.
///
/// No rounding is applied here; callers round for display. A result that is
/// zero, negative, or non-finite is returned as-is; refusing to persist it
/// is the builder's job. Callers must pass a finite, positive `base_price`,
/// since this function does not repair a bad one.
pub fn resolve_price(base_price: f64, combination: &Combination, rules: &PriceRules) -> f64 {
    combination
        .pairs
        .iter()
        .fold(base_price, |price, pair| {
            price + rules.adjustment_for(&pair.attribute_id, &pair.value)
        })
}
