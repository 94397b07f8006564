//! Variant generation module.
//!
//! Contains combination enumeration, price resolution, SKU rendering, and
//! the bulk builder that orchestrates them.

mod builder;
mod combine;
mod price;
mod sku;

pub use builder::{BulkVariantBuilder, GenerationRequest, VariantDraft};
pub use combine::{
    combination_count, AttributeSelection, Combination, CombinationGenerator, CombinationPair,
};
pub use price::{resolve_price, PriceRules};
pub use sku::SkuGenerator;
