//! Attribute deduplication policy.
//!
//! Raw attribute lists accumulate near-duplicates from repeated ad-hoc
//! authoring ("Color" created three times with different value sets). Before
//! attributes are offered for selection they pass through
//! [`AttributeCatalog::normalize`], which collapses them down to one
//! definition per display key.
//!
//! The policy is a heuristic, and lossy: values carried only by a
//! non-surviving duplicate are discarded.

use crate::catalog::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recognized names of "common" attributes.
///
/// An attribute whose machine name or display name contains one of these
/// terms (case-insensitive) wins deduplication collisions against attributes
/// that match none. The default set covers the axes retail catalogs name over
/// and over, in English and Chinese; the vocabulary is locale-dependent, so
/// callers can supply their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonVocabulary {
    terms: Vec<String>,
}

impl CommonVocabulary {
    /// Build a vocabulary from caller-supplied terms.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(|t| t.into().to_lowercase()).collect(),
        }
    }

    /// Check whether an attribute counts as common.
    pub fn is_common(&self, attribute: &Attribute) -> bool {
        let name = attribute.name.to_lowercase();
        let display = attribute
            .display_name
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        self.terms
            .iter()
            .any(|term| name.contains(term.as_str()) || display.contains(term.as_str()))
    }
}

impl Default for CommonVocabulary {
    fn default() -> Self {
        Self::new([
            "color",
            "颜色",
            "size",
            "尺寸",
            "尺码",
            "configuration",
            "配置",
        ])
    }
}

/// Collapses raw attribute definitions into one canonical list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeCatalog {
    vocabulary: CommonVocabulary,
}

impl AttributeCatalog {
    /// Create a catalog with a custom vocabulary.
    pub fn new(vocabulary: CommonVocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this catalog ranks with.
    pub fn vocabulary(&self) -> &CommonVocabulary {
        &self.vocabulary
    }

    /// Collapse `raw` into one attribute per comparison key.
    ///
    /// Candidates are ranked newest-first (ties keep the original list
    /// order). When two keys collide the earlier-ranked candidate survives,
    /// except that a common attribute always beats a non-common one
    /// regardless of recency. Survivors come back common-first, then
    /// alphabetically by display key.
    ///
    /// Deterministic given identical input including creation timestamps.
    /// Empty input yields empty output; there are no error conditions.
    pub fn normalize(&self, raw: Vec<Attribute>) -> Vec<Attribute> {
        let mut ranked = raw;
        // Stable sort: equal timestamps stay in original list order.
        ranked.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut survivors: Vec<Attribute> = Vec::new();
        let mut slot_by_key: HashMap<String, usize> = HashMap::new();

        for candidate in ranked {
            let key = candidate.comparison_key();
            match slot_by_key.get(&key) {
                None => {
                    slot_by_key.insert(key, survivors.len());
                    survivors.push(candidate);
                }
                Some(&slot) => {
                    // The holder outranks the candidate by recency; only a
                    // common challenger displaces a non-common holder.
                    if self.vocabulary.is_common(&candidate)
                        && !self.vocabulary.is_common(&survivors[slot])
                    {
                        survivors[slot] = candidate;
                    }
                }
            }
        }

        survivors.sort_by(|a, b| {
            let a_common = self.vocabulary.is_common(a);
            let b_common = self.vocabulary.is_common(b);
            b_common
                .cmp(&a_common)
                .then_with(|| a.comparison_key().cmp(&b.comparison_key()))
        });
        survivors
    }
}
