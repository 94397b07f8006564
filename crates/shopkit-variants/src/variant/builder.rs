//! Bulk variant building.
//!
//! The orchestration entry point for both generation paths: enumerate
//! combinations from a request, or decode an imported table. Both produce the
//! same validated [`VariantDraft`] records for a persistence collaborator.
//!
//! The two paths deliberately report errors differently. Generation is
//! trusted input, so any bad combination fails the whole batch and nothing is
//! returned. Imports are untrusted external data driving a preview screen, so
//! every row's problems are collected and reported together.

use crate::catalog::Attribute;
use crate::error::{BatchIssue, BatchIssueKind, EngineError, RowIssue, RowIssueKind};
use crate::ids::{ProductId, VariantId};
use crate::tabular::{self, ImportRow};
use crate::variant::{
    resolve_price, AttributeSelection, CombinationGenerator, CombinationPair, PriceRules,
    SkuGenerator,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One immutable variant-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Product the variants belong to.
    pub product_id: ProductId,
    /// Participating attributes and their selected values, in order.
    pub attributes: Vec<AttributeSelection>,
    /// Base price before per-value adjustments. Must be finite and positive.
    pub base_price: f64,
    /// Initial stock for every generated variant; 0 when absent.
    pub default_stock: Option<i64>,
    /// SKU template; the positional fallback is used when absent or blank.
    pub sku_pattern: Option<String>,
    /// Per-value price adjustments; absent means no adjustments.
    pub price_rules: Option<PriceRules>,
}

impl GenerationRequest {
    /// Create a request with no stock, pattern, or price rules.
    pub fn new(product_id: ProductId, attributes: Vec<AttributeSelection>, base_price: f64) -> Self {
        Self {
            product_id,
            attributes,
            base_price,
            default_stock: None,
            sku_pattern: None,
            price_rules: None,
        }
    }
}

/// A validated variant record ready for persistence.
///
/// Drafts are created in bulk per combination (or per imported row) and are
/// immutable in their attribute combination from then on; later price/stock
/// edits happen in the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDraft {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Parent product.
    pub product_id: ProductId,
    /// Unique (per product) stock keeping unit.
    pub sku: String,
    /// Final price after rule application.
    pub price: f64,
    /// Compare-at price, when the source carried one.
    pub compare_price: Option<f64>,
    /// Stock on hand.
    pub stock: i64,
    /// Image URLs carried through from import. Storage is someone else's job.
    pub images: Vec<String>,
    /// The combination this variant realizes, in canonical order.
    pub attributes: Vec<CombinationPair>,
    /// Whether the variant is sellable.
    pub is_active: bool,
    /// Whether this is the product's default variant.
    pub is_default: bool,
}

/// Orchestrates combination generation, pricing, SKU rendering, and
/// validation into persistence-ready drafts.
///
/// Holds the known attribute definitions, which both paths need: the
/// generation path resolves SKU placeholder keys against them, the import
/// path resolves attribute column headers.
#[derive(Debug, Clone)]
pub struct BulkVariantBuilder {
    attributes: Vec<Attribute>,
}

impl BulkVariantBuilder {
    /// Create a builder over the known attribute definitions.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// The attribute definitions this builder resolves against.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Generate validated drafts from an attribute-driven request.
    ///
    /// All-or-nothing: if any combination resolves to an invalid price or a
    /// colliding SKU, the whole batch is rejected with every issue listed and
    /// no drafts are returned. Generated drafts are active; the first one is
    /// the product's default.
    pub fn build_from_attributes(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<VariantDraft>, EngineError> {
        if !request.base_price.is_finite() || request.base_price <= 0.0 {
            return Err(EngineError::InvalidBasePrice(request.base_price));
        }

        let axes: Vec<AttributeSelection> = request
            .attributes
            .iter()
            .map(dedupe_axis_values)
            .filter(|axis| !axis.values.is_empty())
            .collect();

        let rules = request.price_rules.clone().unwrap_or_default();
        let sku_generator = SkuGenerator::from_pattern(request.sku_pattern.clone());
        let default_stock = request.default_stock.unwrap_or(0);

        let mut drafts = Vec::new();
        for (index, combination) in CombinationGenerator::new(axes).enumerate() {
            let price = resolve_price(request.base_price, &combination, &rules);
            let sku = sku_generator.render(&combination, &self.attributes);
            drafts.push(VariantDraft {
                id: VariantId::generate(),
                product_id: request.product_id.clone(),
                sku,
                price,
                compare_price: None,
                stock: default_stock,
                images: Vec::new(),
                attributes: combination.pairs,
                is_active: true,
                is_default: index == 0,
            });
        }

        let issues = validate_batch(&drafts);
        if !issues.is_empty() {
            debug!(
                drafts = drafts.len(),
                issues = issues.len(),
                "rejecting generated batch"
            );
            return Err(EngineError::InvalidBatch(issues));
        }

        debug!(drafts = drafts.len(), product = %request.product_id, "generated variant drafts");
        Ok(drafts)
    }

    /// Build validated drafts from imported exchange-format text.
    ///
    /// Structural parse failures abort the import. Everything else is
    /// validated row by row, collecting issues so the whole file's problems
    /// are reported together; a single bad row fails the import but never
    /// hides the others. Imported drafts are never the product default.
    pub fn build_from_table(
        &self,
        product_id: &ProductId,
        text: &str,
    ) -> Result<Vec<VariantDraft>, EngineError> {
        let rows = tabular::parse(text)?;

        let mut drafts = Vec::new();
        let mut issues = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let row_index = index + 1;
            match self.draft_from_row(product_id, row) {
                Ok(draft) => drafts.push(draft),
                Err(kinds) => {
                    issues.extend(
                        kinds
                            .into_iter()
                            .map(|kind| RowIssue { row_index, kind }),
                    );
                }
            }
        }

        if !issues.is_empty() {
            debug!(rows = rows.len(), issues = issues.len(), "rejecting import");
            return Err(EngineError::InvalidImport(issues));
        }

        debug!(drafts = drafts.len(), product = %product_id, "imported variant drafts");
        Ok(drafts)
    }

    /// Validate one imported row, reporting every problem it has.
    fn draft_from_row(
        &self,
        product_id: &ProductId,
        row: &ImportRow,
    ) -> Result<VariantDraft, Vec<RowIssueKind>> {
        let mut problems = Vec::new();

        if row.sku.trim().is_empty() {
            problems.push(RowIssueKind::BlankSku);
        }
        if !row.price.is_finite() || row.price <= 0.0 {
            problems.push(RowIssueKind::InvalidPrice { price: row.price });
        }

        let mut pairs = Vec::new();
        if !row.has_attributes() {
            problems.push(RowIssueKind::NoAttributeColumns);
        } else {
            for (column, value) in &row.attributes {
                match self.find_attribute(column) {
                    Some(attribute) => {
                        pairs.push(CombinationPair::new(attribute.id.clone(), value.clone()));
                    }
                    None => problems.push(RowIssueKind::UnknownAttribute {
                        column: column.clone(),
                    }),
                }
            }
        }

        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(VariantDraft {
            id: VariantId::generate(),
            product_id: product_id.clone(),
            sku: row.sku.clone(),
            price: row.price,
            compare_price: row.compare_price,
            stock: row.stock,
            images: row.images.clone(),
            attributes: pairs,
            is_active: row.is_active,
            is_default: false,
        })
    }

    /// Resolve an attribute display key against the known definitions,
    /// case-insensitively on machine name and display name.
    fn find_attribute(&self, key: &str) -> Option<&Attribute> {
        let key = key.trim().to_lowercase();
        self.attributes.iter().find(|attribute| {
            attribute.name.to_lowercase() == key
                || attribute
                    .display_name
                    .as_deref()
                    .is_some_and(|display| display.trim().to_lowercase() == key)
        })
    }
}

/// Drop duplicate values within one axis, preserving first-seen order, so
/// the distinctness invariant holds against sloppy request payloads.
fn dedupe_axis_values(axis: &AttributeSelection) -> AttributeSelection {
    let mut seen = Vec::new();
    for value in &axis.values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    AttributeSelection {
        attribute_id: axis.attribute_id.clone(),
        values: seen,
    }
}

/// Batch validation: prices strictly positive and finite, SKUs unique by
/// exact comparison.
fn validate_batch(drafts: &[VariantDraft]) -> Vec<BatchIssue> {
    let mut issues = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, draft) in drafts.iter().enumerate() {
        if !draft.price.is_finite() || draft.price <= 0.0 {
            issues.push(BatchIssue {
                combination_index: index,
                sku: draft.sku.clone(),
                kind: BatchIssueKind::InvalidPrice { price: draft.price },
            });
        }
        match first_seen.get(draft.sku.as_str()) {
            Some(&first_index) => issues.push(BatchIssue {
                combination_index: index,
                sku: draft.sku.clone(),
                kind: BatchIssueKind::DuplicateSku { first_index },
            }),
            None => {
                first_seen.insert(draft.sku.as_str(), index);
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttributeKind;
    use crate::ids::AttributeId;

    fn known_attributes() -> Vec<Attribute> {
        vec![
            Attribute::new(AttributeId::new("attr-color"), "color", AttributeKind::Color)
                .with_display_name("Color")
                .with_values(["red", "blue"]),
            Attribute::new(AttributeId::new("attr-size"), "size", AttributeKind::Select)
                .with_display_name("Size")
                .with_values(["S", "M", "L"]),
        ]
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            ProductId::new("prod-1"),
            vec![
                AttributeSelection::new(AttributeId::new("attr-color"), ["red", "blue"]),
                AttributeSelection::new(AttributeId::new("attr-size"), ["S", "M", "L"]),
            ],
            20.0,
        )
    }

    fn builder() -> BulkVariantBuilder {
        BulkVariantBuilder::new(known_attributes())
    }

    #[test]
    fn test_generates_all_combinations_with_prices_and_skus() {
        let mut request = request();
        request.price_rules = Some(PriceRules::new().with(AttributeId::new("attr-color"), "red", 5.0));

        let drafts = builder().build_from_attributes(&request).unwrap();
        assert_eq!(drafts.len(), 6);

        // Odometer order: color varies slowest.
        let skus: Vec<&str> = drafts.iter().map(|d| d.sku.as_str()).collect();
        assert_eq!(skus, vec!["red-S", "red-M", "red-L", "blue-S", "blue-M", "blue-L"]);

        let red_m = &drafts[1];
        assert_eq!(red_m.price, 25.0);
        let blue_m = &drafts[4];
        assert_eq!(blue_m.price, 20.0);

        assert!(drafts[0].is_default);
        assert!(drafts[1..].iter().all(|d| !d.is_default));
        assert!(drafts.iter().all(|d| d.is_active));
    }

    #[test]
    fn test_sku_pattern_applies_to_every_combination() {
        let mut request = request();
        request.sku_pattern = Some("PROD-{color}-{size}".to_string());

        let drafts = builder().build_from_attributes(&request).unwrap();
        assert_eq!(drafts[5].sku, "PROD-blue-L");
    }

    #[test]
    fn test_default_stock_applies() {
        let mut request = request();
        request.default_stock = Some(10);
        let drafts = builder().build_from_attributes(&request).unwrap();
        assert!(drafts.iter().all(|d| d.stock == 10));
    }

    #[test]
    fn test_empty_value_sets_are_filtered() {
        let mut request = request();
        request.attributes[1].values.clear();
        let drafts = builder().build_from_attributes(&request).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].attributes.len(), 1);
    }

    #[test]
    fn test_duplicate_axis_values_are_deduplicated() {
        let mut request = request();
        request.attributes[0].values = vec!["red".into(), "red".into(), "blue".into()];
        let drafts = builder().build_from_attributes(&request).unwrap();
        assert_eq!(drafts.len(), 6);
    }

    #[test]
    fn test_invalid_base_price_is_batch_fatal() {
        let mut request = request();
        request.base_price = 0.0;
        let err = builder().build_from_attributes(&request).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBasePrice(p) if p == 0.0));
    }

    #[test]
    fn test_negative_resolved_price_rejects_whole_batch() {
        let mut request = request();
        request.price_rules =
            Some(PriceRules::new().with(AttributeId::new("attr-size"), "L", -30.0));

        let err = builder().build_from_attributes(&request).unwrap_err();
        let EngineError::InvalidBatch(issues) = err else {
            panic!("expected InvalidBatch");
        };
        // red-L and blue-L both land at -10.
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| matches!(i.kind, BatchIssueKind::InvalidPrice { price } if price == -10.0)));
        assert_eq!(issues[0].combination_index, 2);
        assert_eq!(issues[0].sku, "red-L");
    }

    #[test]
    fn test_collapsing_pattern_reports_duplicate_skus() {
        let mut request = request();
        request.sku_pattern = Some("FIXED".to_string());

        let err = builder().build_from_attributes(&request).unwrap_err();
        let EngineError::InvalidBatch(issues) = err else {
            panic!("expected InvalidBatch");
        };
        assert_eq!(issues.len(), 5);
        assert!(issues
            .iter()
            .all(|i| matches!(i.kind, BatchIssueKind::DuplicateSku { first_index: 0 })));
    }

    #[test]
    fn test_no_axes_yields_empty_batch() {
        let request = GenerationRequest::new(ProductId::new("prod-1"), Vec::new(), 20.0);
        let drafts = builder().build_from_attributes(&request).unwrap();
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_import_builds_drafts_from_rows() {
        let text = "SKU,Color,Size,Price,Stock,Is Active\nA1,red,S,19.99,5,true\nA2,blue,M,21.5,3,false\n";
        let drafts = builder()
            .build_from_table(&ProductId::new("prod-1"), text)
            .unwrap();

        assert_eq!(drafts.len(), 2);
        let first = &drafts[0];
        assert_eq!(first.sku, "A1");
        assert_eq!(first.price, 19.99);
        assert_eq!(first.stock, 5);
        assert!(first.is_active);
        assert!(!first.is_default);
        assert_eq!(
            first.attributes,
            vec![
                CombinationPair::new(AttributeId::new("attr-color"), "red"),
                CombinationPair::new(AttributeId::new("attr-size"), "S"),
            ]
        );
        assert!(!drafts[1].is_active);
    }

    #[test]
    fn test_import_resolves_headers_case_insensitively() {
        let text = "SKU,COLOR,size,Price\nA1,red,S,10\n";
        let drafts = builder()
            .build_from_table(&ProductId::new("prod-1"), text)
            .unwrap();
        assert_eq!(drafts[0].attributes[0].attribute_id, AttributeId::new("attr-color"));
    }

    #[test]
    fn test_import_collects_every_row_error() {
        let text = "SKU,Color,Fit,Price\n\
                    A1,red,slim,10\n\
                    A2,red,slim,notanumber\n\
                    A3,,,12\n";
        let err = builder()
            .build_from_table(&ProductId::new("prod-1"), text)
            .unwrap_err();
        let EngineError::InvalidImport(issues) = err else {
            panic!("expected InvalidImport");
        };

        // Row 1: unknown "Fit" column. Row 2: same, plus the defaulted price
        // of 0 is invalid. Row 3: blank cells leave no attribute columns.
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].row_index, 1);
        assert!(matches!(
            issues[0].kind,
            RowIssueKind::UnknownAttribute { ref column } if column == "Fit"
        ));
        assert!(issues
            .iter()
            .any(|i| i.row_index == 2 && matches!(i.kind, RowIssueKind::InvalidPrice { price } if price == 0.0)));
        assert!(issues
            .iter()
            .any(|i| i.row_index == 3 && i.kind == RowIssueKind::NoAttributeColumns));
    }

    #[test]
    fn test_import_malformed_table_is_fatal() {
        let err = builder()
            .build_from_table(&ProductId::new("prod-1"), "SKU,Color,Price\nA1,\"red,10\n")
            .unwrap_err();
        assert!(matches!(err, EngineError::Table(_)));
    }
}
