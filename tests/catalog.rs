// ABOUTME: Integration tests for variant selection and price display resolution.
// ABOUTME: Covers exact/range/unavailable display plus proptest over arbitrary price lists.

use proptest::prelude::*;
use vitrin::catalog::{has_variants, price_display, select_variant};
use vitrin::types::{Price, PriceDisplay, VariantId, VariantRecord};

fn variant(id: &str, price: u64) -> VariantRecord {
    VariantRecord {
        id: VariantId::new(id),
        unit: "kg".to_string(),
        amount: 1,
        price: Price::from_minor_units(price),
        stock: 10,
    }
}

fn variants(prices: &[u64]) -> Vec<VariantRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| variant(&format!("v{i}"), *p))
        .collect()
}

mod selection {
    use super::*;

    #[test]
    fn no_variants_selects_nothing() {
        assert!(select_variant(&[], None).is_none());
        assert!(select_variant(&[], Some(&VariantId::new("v0"))).is_none());
        assert!(!has_variants(&[]));
    }

    #[test]
    fn defaults_to_first_variant() {
        let list = variants(&[300, 700]);
        let selected = select_variant(&list, None).unwrap();
        assert_eq!(selected.id.as_str(), "v0");
    }

    #[test]
    fn matches_selected_id_exactly() {
        let list = variants(&[300, 700, 450]);
        let id = VariantId::new("v2");
        let selected = select_variant(&list, Some(&id)).unwrap();
        assert_eq!(selected.price, Price::from_minor_units(450));
    }

    #[test]
    fn stale_id_falls_back_to_first_deterministically() {
        let list = variants(&[300, 700]);
        let stale = VariantId::new("removed");
        let selected = select_variant(&list, Some(&stale)).unwrap();
        assert_eq!(selected.id.as_str(), "v0");
    }
}

mod display {
    use super::*;

    #[test]
    fn empty_list_is_unavailable() {
        assert_eq!(price_display(&[], None), PriceDisplay::Unavailable);
    }

    #[test]
    fn uniform_prices_collapse_to_exact() {
        let list = variants(&[500, 500, 500]);
        assert_eq!(
            price_display(&list, None),
            PriceDisplay::Exact(Price::from_minor_units(500))
        );
    }

    #[test]
    fn mixed_prices_show_closed_range() {
        let list = variants(&[300, 700]);
        assert_eq!(
            price_display(&list, None),
            PriceDisplay::Range(Price::from_minor_units(300), Price::from_minor_units(700))
        );
    }

    #[test]
    fn selection_pins_the_exact_price() {
        let list = variants(&[300, 450, 700]);
        let id = VariantId::new("v1");
        assert_eq!(
            price_display(&list, Some(&id)),
            PriceDisplay::Exact(Price::from_minor_units(450))
        );
    }

    #[test]
    fn stale_selection_pins_to_the_first_variant() {
        let list = variants(&[300, 700]);
        let stale = VariantId::new("gone");
        assert_eq!(
            price_display(&list, Some(&stale)),
            PriceDisplay::Exact(Price::from_minor_units(300))
        );
    }
}

proptest! {
    #[test]
    fn display_matches_true_min_max(prices in proptest::collection::vec(0u64..10_000, 1..20)) {
        let list = variants(&prices);
        let min = *prices.iter().min().unwrap();
        let max = *prices.iter().max().unwrap();

        match price_display(&list, None) {
            PriceDisplay::Exact(p) => {
                prop_assert_eq!(min, max);
                prop_assert_eq!(p, Price::from_minor_units(min));
            }
            PriceDisplay::Range(lo, hi) => {
                prop_assert!(min < max);
                prop_assert_eq!(lo, Price::from_minor_units(min));
                prop_assert_eq!(hi, Price::from_minor_units(max));
            }
            PriceDisplay::Unavailable => prop_assert!(false, "non-empty list reported unavailable"),
        }
    }

    #[test]
    fn any_selection_yields_an_exact_price_from_the_list(
        prices in proptest::collection::vec(0u64..10_000, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let list = variants(&prices);
        let id = list[pick.index(list.len())].id.clone();

        match price_display(&list, Some(&id)) {
            PriceDisplay::Exact(p) => {
                prop_assert!(prices.contains(&p.minor_units()));
            }
            other => prop_assert!(false, "expected Exact, got {:?}", other),
        }
    }
}
