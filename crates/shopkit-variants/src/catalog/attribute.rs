//! Attribute definition types.

use crate::ids::AttributeId;
use serde::{Deserialize, Serialize};

/// The value domain of an attribute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttributeKind {
    /// Free-form text values.
    Text,
    /// Color swatch values.
    Color,
    /// Image swatch values.
    Image,
    /// Dropdown selection values.
    #[default]
    Select,
    /// Numeric values.
    Number,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Color => "color",
            AttributeKind::Image => "image",
            AttributeKind::Select => "select",
            AttributeKind::Number => "number",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(AttributeKind::Text),
            "color" => Some(AttributeKind::Color),
            "image" => Some(AttributeKind::Image),
            "select" => Some(AttributeKind::Select),
            "number" => Some(AttributeKind::Number),
            _ => None,
        }
    }
}

/// A named, typed axis of product variation (e.g. color) with an ordered set
/// of permitted values.
///
/// `id` is the stable identity. `name` and `display_name` are human-facing
/// and are not guaranteed unique across raw input; [`AttributeCatalog`]
/// collapses near-duplicates before attributes are offered for selection.
///
/// [`AttributeCatalog`]: crate::catalog::AttributeCatalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    /// Unique attribute identifier.
    pub id: AttributeId,
    /// Machine name (e.g. "color").
    pub name: String,
    /// Human-facing display name, when it differs from the machine name.
    pub display_name: Option<String>,
    /// Value domain of this axis.
    pub kind: AttributeKind,
    /// Permitted values, in insertion order.
    ///
    /// Order is significant: it drives combination enumeration order and the
    /// positional SKU fallback.
    pub values: Vec<String>,
    /// Whether a value must be chosen for every variant.
    pub is_required: bool,
    /// Sort position in admin/selection UIs.
    pub display_order: i32,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Attribute {
    /// Create a new attribute with no values.
    pub fn new(id: AttributeId, name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: None,
            kind,
            values: Vec::new(),
            is_required: false,
            display_order: 0,
            created_at: current_timestamp(),
        }
    }

    /// Set the display name (builder-style).
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the permitted values (builder-style).
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.add_value(value);
        }
        self
    }

    /// The human-facing key: display name, falling back to the machine name.
    pub fn display_key(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Lowercased, trimmed display key used for deduplication.
    pub fn comparison_key(&self) -> String {
        self.display_key().trim().to_lowercase()
    }

    /// Check whether this attribute can participate in generation.
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Append a value, preserving order and skipping exact duplicates.
    pub fn add_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    /// Remove a value. Returns whether it was present.
    pub fn remove_value(&mut self, value: &str) -> bool {
        let len_before = self.values.len();
        self.values.retain(|v| v != value);
        self.values.len() < len_before
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> Attribute {
        Attribute::new(AttributeId::new("attr-color"), "color", AttributeKind::Color)
    }

    #[test]
    fn test_display_key_falls_back_to_name() {
        let mut attr = color();
        assert_eq!(attr.display_key(), "color");
        attr.display_name = Some("Color".to_string());
        assert_eq!(attr.display_key(), "Color");
    }

    #[test]
    fn test_comparison_key_normalizes() {
        let attr = color().with_display_name("  Color ");
        assert_eq!(attr.comparison_key(), "color");
    }

    #[test]
    fn test_add_value_skips_duplicates() {
        let mut attr = color();
        attr.add_value("Red");
        attr.add_value("Blue");
        attr.add_value("Red");
        assert_eq!(attr.values, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_remove_value() {
        let mut attr = color().with_values(["Red", "Blue"]);
        assert!(attr.remove_value("Red"));
        assert!(!attr.remove_value("Green"));
        assert_eq!(attr.values, vec!["Blue"]);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            AttributeKind::Text,
            AttributeKind::Color,
            AttributeKind::Image,
            AttributeKind::Select,
            AttributeKind::Number,
        ] {
            assert_eq!(AttributeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(AttributeKind::parse("swatch"), None);
    }
}
