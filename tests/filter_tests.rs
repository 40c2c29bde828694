mod common;

use common::listing;
use hotel_storefront::application::filter::ListingFilterEngine;
use hotel_storefront::domain::listing::{FilterSpec, ListingRecord, SortOrder};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn catalog() -> Vec<ListingRecord> {
    vec![
        listing("paris", "Paris, France", dec!(450), dec!(4.8)),
        listing("coast", "Northern Spain Coast", dec!(120), dec!(4.4)),
        listing("tokyo", "Tokyo, Japan", dec!(720), dec!(4.5)),
        listing("madrid", "Madrid, Spain", dec!(120), dec!(3.5)),
        listing("sydney", "Sydney, Australia", dec!(890), dec!(4.9)),
    ]
}

#[test]
fn test_apply_is_pure_and_repeatable() {
    let mut rng = rand::thread_rng();
    let locations = ["Paris, France", "Rome, Italy", "Madrid, Spain", "Kyoto, Japan"];

    for _ in 0..50 {
        let listings: Vec<ListingRecord> = (0..rng.gen_range(0..40))
            .map(|i| {
                listing(
                    &format!("h{i}"),
                    locations[rng.gen_range(0..locations.len())],
                    Decimal::from(rng.gen_range(0..1000u32)),
                    Decimal::new(rng.gen_range(0..=50), 1),
                )
            })
            .collect();
        let snapshot = listings.clone();

        let sort = match rng.gen_range(0..3) {
            0 => SortOrder::Default,
            1 => SortOrder::Ascending,
            _ => SortOrder::Descending,
        };
        let spec = FilterSpec::new()
            .with_location(["ALL", "spain", "Japan"][rng.gen_range(0..3)])
            .with_price_range(dec!(100), dec!(800))
            .with_min_star_rating(rng.gen_range(0..=5))
            .with_sort_order(sort);

        let first = ListingFilterEngine::apply(&listings, &spec);
        let second = ListingFilterEngine::apply(&listings, &spec);

        assert_eq!(first, second);
        assert_eq!(listings, snapshot);
        assert!(first.len() <= listings.len());
    }
}

#[test]
fn test_location_filter_uses_containment() {
    let spec = FilterSpec::new().with_location("Spain");
    let result = ListingFilterEngine::apply(&catalog(), &spec);
    assert_eq!(result.ids(), vec!["coast", "madrid"]);

    let spec = FilterSpec::new().with_location("ALL");
    let result = ListingFilterEngine::apply(&catalog(), &spec);
    assert_eq!(result.len(), catalog().len());
}

#[test]
fn test_all_passes_records_without_location() {
    let listings = vec![ListingRecord::new("unknown").with_price(dec!(80))];

    let all = ListingFilterEngine::apply(&listings, &FilterSpec::new().with_location("ALL"));
    assert_eq!(all.ids(), vec!["unknown"]);

    let spain = ListingFilterEngine::apply(&listings, &FilterSpec::new().with_location("Spain"));
    assert!(spain.is_empty());
}

#[test]
fn test_price_range_is_inclusive() {
    let listings = vec![listing("h", "Rome, Italy", dec!(100), dec!(4))];
    let passes = |min, max| {
        !ListingFilterEngine::apply(&listings, &FilterSpec::new().with_price_range(min, max))
            .is_empty()
    };

    assert!(passes(dec!(100), dec!(100)));
    assert!(!passes(dec!(101), dec!(200)));
    assert!(!passes(dec!(0), dec!(99)));
}

#[test]
fn test_inverted_price_range_yields_empty_result() {
    let spec = FilterSpec::new().with_price_range(dec!(500), dec!(100));
    assert!(ListingFilterEngine::apply(&catalog(), &spec).is_empty());
}

#[test]
fn test_star_rating_rounds_half_up() {
    let listings = vec![
        listing("four-five", "Rome, Italy", dec!(100), dec!(4.5)),
        listing("four-four", "Rome, Italy", dec!(100), dec!(4.4)),
    ];
    let spec = FilterSpec::new().with_min_star_rating(5);

    let result = ListingFilterEngine::apply(&listings, &spec);
    assert_eq!(result.ids(), vec!["four-five"]);
}

#[test]
fn test_ascending_sort_is_stable() {
    let listings = vec![
        listing("a", "Rome, Italy", dec!(100), dec!(4)),
        listing("b", "Rome, Italy", dec!(100), dec!(4)),
        listing("c", "Rome, Italy", dec!(50), dec!(4)),
    ];
    let spec = FilterSpec::new().with_sort_order(SortOrder::Ascending);

    let result = ListingFilterEngine::apply(&listings, &spec);
    assert_eq!(result.ids(), vec!["c", "a", "b"]);
}

#[test]
fn test_sort_applies_after_filtering() {
    let spec = FilterSpec::new()
        .with_min_star_rating(5)
        .with_sort_order(SortOrder::Descending);

    let result = ListingFilterEngine::apply(&catalog(), &spec);
    assert_eq!(result.ids(), vec!["sydney", "tokyo", "paris"]);
}

#[test]
fn test_no_matches_returns_empty_result() {
    let spec = FilterSpec::new().with_location("Greece");
    let result = ListingFilterEngine::apply(&catalog(), &spec);
    assert!(result.is_empty());

    let empty = ListingFilterEngine::apply(&[], &FilterSpec::new());
    assert!(empty.is_empty());
}

#[test]
fn test_paging_through_sorted_result() {
    let spec = FilterSpec::new().with_sort_order(SortOrder::Ascending);
    let result = ListingFilterEngine::apply(&catalog(), &spec);

    let second_page: Vec<&str> = result.page(2, 2).iter().map(|l| l.id.as_str()).collect();
    assert_eq!(second_page, vec!["paris", "tokyo"]);
    assert_eq!(result.page(3, 2).len(), 1);
}
