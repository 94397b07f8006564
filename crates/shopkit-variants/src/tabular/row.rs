//! Import row model and the fixed column contract.

use serde::{Deserialize, Serialize};

/// One decoded data row of the exchange format.
///
/// Cell-level degradation happens during parsing (bad numerics become
/// defaults, blank optional cells are omitted); an `ImportRow` is always
/// structurally complete. Whether its content is *valid* is decided later by
/// the variant builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    /// SKU cell, or the synthetic `SKU-<rowIndex>` placeholder.
    pub sku: String,
    /// Price cell; 0 when absent or unparsable.
    pub price: f64,
    /// Compare-at price; omitted when blank or unparsable.
    pub compare_price: Option<f64>,
    /// Stock cell; 0 when absent or unparsable.
    pub stock: i64,
    /// Image URLs, comma-separated in the cell, trimmed, empties dropped.
    pub images: Vec<String>,
    /// True iff the cell was `true`, `1` or `启用` (case-insensitive).
    pub is_active: bool,
    /// Attribute display key → cell value, in column order. Blank cells are
    /// omitted rather than stored as empty strings.
    pub attributes: Vec<(String, String)>,
}

impl ImportRow {
    /// Look up an attribute cell by display key, case-insensitively.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        let key = key.trim().to_lowercase();
        self.attributes
            .iter()
            .find(|(k, _)| k.trim().to_lowercase() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the row carries any attribute columns at all.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// The recognized fixed columns of the exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderRole {
    Sku,
    Price,
    Stock,
    ComparePrice,
    Images,
    IsActive,
}

impl HeaderRole {
    /// Resolve a header cell to a fixed role.
    ///
    /// Case-insensitive, embedded whitespace ignored; English names and one
    /// fixed set of localized aliases are accepted. Anything unresolved is an
    /// attribute column.
    pub(crate) fn resolve(header: &str) -> Option<Self> {
        let key: String = header.split_whitespace().collect::<String>().to_lowercase();
        match key.as_str() {
            "sku" => Some(HeaderRole::Sku),
            "price" => Some(HeaderRole::Price),
            "stock" | "库存" => Some(HeaderRole::Stock),
            "compareprice" | "原价" => Some(HeaderRole::ComparePrice),
            "images" | "图片" => Some(HeaderRole::Images),
            "isactive" | "状态" => Some(HeaderRole::IsActive),
            _ => None,
        }
    }
}
