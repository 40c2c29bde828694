use crate::domain::listing::{
    FEATURED_LOCATIONS, FilterSpec, FilteredResult, ListingRecord, LocationFilter, SortOrder,
};

/// Derives the ordered hotel view shown in the listing grid.
///
/// The engine holds no state: every call depends only on its arguments, never
/// mutates the input, and returns freshly cloned records.
pub struct ListingFilterEngine;

impl ListingFilterEngine {
    /// Filters `listings` by location, price and star rating, then sorts by price.
    ///
    /// Sorting is stable, so records with equal prices keep their filtered order.
    /// `SortOrder::Default` leaves the filtered order untouched.
    pub fn apply(listings: &[ListingRecord], spec: &FilterSpec) -> FilteredResult {
        let mut filtered: Vec<ListingRecord> = listings
            .iter()
            .filter(|listing| spec.matches(listing))
            .cloned()
            .collect();

        match spec.sort_order {
            SortOrder::Default => {}
            SortOrder::Ascending => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::Descending => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        FilteredResult::new(filtered)
    }

    /// Counts, for every featured destination tab, the listings that pass the
    /// location clause on its own.
    pub fn location_counts(listings: &[ListingRecord]) -> Vec<(&'static str, usize)> {
        FEATURED_LOCATIONS
            .iter()
            .map(|&tab| {
                let filter = LocationFilter::new(tab);
                let count = listings
                    .iter()
                    .filter(|listing| filter.matches(listing.location.as_deref()))
                    .count();
                (tab, count)
            })
            .collect()
    }
}
