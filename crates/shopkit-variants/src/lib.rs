//! Product attribute and variant combination engine for Shopkit.
//!
//! This crate is the algorithmic core of the catalog: given a set of
//! selectable attributes and their permitted values, it enumerates every
//! variant combination, prices each one from a base price plus per-value
//! adjustments, renders a stable SKU per combination, and moves the same
//! records losslessly through a flat tabular (CSV) exchange format.
//!
//! - **Catalog**: attribute definitions and the deduplication policy
//! - **Variant**: combination enumeration, pricing, SKUs, the bulk builder
//! - **Tabular**: the CSV exchange codec
//!
//! Everything here is synchronous and side-effect-free over immutable
//! inputs: one request in, one validated draft list (or one structured error
//! list) out. Persistence, transport, and UI belong to the surrounding
//! application.
//!
//! # Example
//!
//! ```
//! use shopkit_variants::prelude::*;
//!
//! let attributes = vec![
//!     Attribute::new(AttributeId::new("attr-color"), "color", AttributeKind::Color)
//!         .with_display_name("Color"),
//!     Attribute::new(AttributeId::new("attr-size"), "size", AttributeKind::Select)
//!         .with_display_name("Size"),
//! ];
//!
//! let request = GenerationRequest::new(
//!     ProductId::new("prod-1"),
//!     vec![
//!         AttributeSelection::new(AttributeId::new("attr-color"), ["red", "blue"]),
//!         AttributeSelection::new(AttributeId::new("attr-size"), ["S", "M", "L"]),
//!     ],
//!     20.0,
//! );
//!
//! let builder = BulkVariantBuilder::new(attributes);
//! let drafts = builder.build_from_attributes(&request)?;
//! assert_eq!(drafts.len(), 6);
//! assert_eq!(drafts[0].sku, "red-S");
//! # Ok::<(), shopkit_variants::EngineError>(())
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod tabular;
pub mod variant;

pub use error::{EngineError, TableError};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{
        BatchIssue, BatchIssueKind, EngineError, RowIssue, RowIssueKind, TableError,
    };
    pub use crate::ids::{AttributeId, ProductId, VariantId};

    // Catalog
    pub use crate::catalog::{Attribute, AttributeCatalog, AttributeKind, CommonVocabulary};

    // Variant
    pub use crate::variant::{
        combination_count, resolve_price, AttributeSelection, BulkVariantBuilder, Combination,
        CombinationGenerator, CombinationPair, GenerationRequest, PriceRules, SkuGenerator,
        VariantDraft,
    };

    // Tabular
    pub use crate::tabular::ImportRow;
}
