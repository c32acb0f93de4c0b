// ABOUTME: Price in integer minor-currency units plus the display-price resolution result.
// ABOUTME: Display formats minor units as major units with two decimals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price in minor currency units (e.g. cents). Integer arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Resolved display price for a product's variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDisplay {
    /// No variants exist; there is nothing purchasable to price.
    Unavailable,
    /// A single price: a variant is selected, or all variants share one price.
    Exact(Price),
    /// Closed interval [min, max] over all variant prices.
    Range(Price, Price),
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceDisplay::Unavailable => write!(f, "not available"),
            PriceDisplay::Exact(p) => write!(f, "{p}"),
            PriceDisplay::Range(min, max) => write!(f, "{min}\u{2013}{max}"),
        }
    }
}
