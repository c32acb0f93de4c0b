// ABOUTME: Variant selection and display-price resolution for a product's variant list.
// ABOUTME: Pure functions; no async, no collaborators.

use crate::types::{PriceDisplay, VariantId, VariantRecord};

/// Resolve the active variant.
///
/// `None` only when `variants` is empty. A selected id is matched exactly;
/// a stale id (no longer in the list) falls back to the first variant
/// deterministically, never to an arbitrary or empty selection.
pub fn select_variant<'a>(
    variants: &'a [VariantRecord],
    selected: Option<&VariantId>,
) -> Option<&'a VariantRecord> {
    let first = variants.first()?;

    match selected {
        Some(id) => Some(variants.iter().find(|v| &v.id == id).unwrap_or(first)),
        None => Some(first),
    }
}

/// Resolve the displayed price.
///
/// No variants: `Unavailable`. An explicit selection pins the price to the
/// selected variant (stale ids pin to the first, matching [`select_variant`]).
/// Without a selection, a shared price collapses to `Exact`; otherwise the
/// closed interval over all variant prices is shown.
pub fn price_display(variants: &[VariantRecord], selected: Option<&VariantId>) -> PriceDisplay {
    if variants.is_empty() {
        return PriceDisplay::Unavailable;
    }

    if selected.is_some() {
        // select_variant returns Some because variants is non-empty.
        if let Some(variant) = select_variant(variants, selected) {
            return PriceDisplay::Exact(variant.price);
        }
    }

    let mut prices = variants.iter().map(|v| v.price);
    let Some(first) = prices.next() else {
        return PriceDisplay::Unavailable;
    };
    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

    if min == max {
        PriceDisplay::Exact(min)
    } else {
        PriceDisplay::Range(min, max)
    }
}

/// Whether the product has anything purchasable.
pub fn has_variants(variants: &[VariantRecord]) -> bool {
    !variants.is_empty()
}
