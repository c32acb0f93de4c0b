// ABOUTME: Purchasable variant record: unit configuration, price, and stock.
// ABOUTME: Many variants belong to one product; at most one is selected at a time.

use super::{Price, VariantId};
use serde::Deserialize;

/// A purchasable unit configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantRecord {
    pub id: VariantId,

    /// Unit of sale, e.g. "kg" or "piece".
    pub unit: String,

    /// How many units this variant contains.
    pub amount: u32,

    /// Price in minor currency units.
    pub price: Price,

    /// Units currently in stock.
    pub stock: u32,
}

impl VariantRecord {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
