//! SKU rendering.
//!
//! Two modes: pattern substitution over `{attributeKey}` placeholders, and a
//! positional fallback that joins the combination's values with hyphens.

use crate::catalog::Attribute;
use crate::variant::Combination;
use serde::{Deserialize, Serialize};

/// Renders SKU strings for combinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuGenerator {
    pattern: Option<String>,
}

impl SkuGenerator {
    /// Build a generator, selecting fallback mode when the pattern is absent
    /// or blank.
    pub fn from_pattern(pattern: Option<String>) -> Self {
        Self {
            pattern: pattern.filter(|p| !p.trim().is_empty()),
        }
    }

    /// A generator that always uses the positional fallback.
    pub fn fallback() -> Self {
        Self { pattern: None }
    }

    pub fn is_pattern_mode(&self) -> bool {
        self.pattern.is_some()
    }

    /// Render the SKU for one combination.
    ///
    /// In pattern mode, each `{attributeKey}` placeholder whose key matches a
    /// participating attribute's machine name or display name
    /// (case-insensitive) is replaced with that pair's value. Placeholders
    /// matching nothing stay verbatim; literal pattern characters are never
    /// altered. In fallback mode the values are joined with single hyphens in
    /// combination order, with no attribute-name prefix.
    pub fn render(&self, combination: &Combination, attributes: &[Attribute]) -> String {
        match &self.pattern {
            Some(pattern) => substitute(pattern, combination, attributes),
            None => combination.values().collect::<Vec<_>>().join("-"),
        }
    }
}

fn substitute(pattern: &str, combination: &Combination, attributes: &[Attribute]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match resolve_placeholder(key, combination, attributes) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // No closing brace: the remainder is literal text.
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Find the combination value a placeholder key refers to.
fn resolve_placeholder<'a>(
    key: &str,
    combination: &'a Combination,
    attributes: &[Attribute],
) -> Option<&'a str> {
    let key = key.trim().to_lowercase();
    combination.pairs.iter().find_map(|pair| {
        let attribute = attributes.iter().find(|a| a.id == pair.attribute_id)?;
        let matches = attribute.name.to_lowercase() == key
            || attribute.display_key().trim().to_lowercase() == key;
        matches.then_some(pair.value.as_str())
    })
}
