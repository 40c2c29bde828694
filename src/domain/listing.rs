use crate::error::StorefrontError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel location value that disables location filtering.
pub const ALL_LOCATIONS: &str = "ALL";

/// Destination tabs offered above the hotel grid.
pub const FEATURED_LOCATIONS: [&str; 11] = [
    ALL_LOCATIONS,
    "France",
    "Italy",
    "Australia",
    "Japan",
    "Sri Lanaka",
    "Turkey",
    "USA",
    "Spain",
    "Germany",
    "Greece",
];

/// A hotel listing as returned by the remote search API.
///
/// Only `location`, `price` and `rating` take part in filtering. They are optional
/// because the remote API does not guarantee them; a missing value simply fails the
/// corresponding filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Unique identifier of the hotel.
    pub id: String,
    /// Display name. Ignored by filtering.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Nightly price, non-negative.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Average guest rating between 0.0 and 5.0.
    #[serde(default)]
    pub rating: Option<Decimal>,
}

impl ListingRecord {
    /// Creates a listing with only an id; the remaining fields are unset.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            location: None,
            price: None,
            rating: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the nightly price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the raw average rating, before star rounding.
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Location clause of a [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationFilter {
    #[default]
    All,
    /// Case-insensitive substring match against the listing location.
    Contains(String),
}

impl LocationFilter {
    /// Builds a filter from a tab value, mapping the `ALL` sentinel to [`LocationFilter::All`].
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL_LOCATIONS {
            Self::All
        } else {
            Self::Contains(value)
        }
    }

    pub fn matches(&self, location: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Contains(needle) => location
                .is_some_and(|location| location.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LOCATIONS),
            Self::Contains(needle) => f.write_str(needle),
        }
    }
}

/// Inclusive price bounds.
///
/// Callers are expected to keep `min <= max`. An inverted range is not an error:
/// no price can satisfy it, so every listing fails the price clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Inclusive on both ends. `min > max` is kept as given and matches nothing.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, price: Option<Decimal>) -> bool {
        price.is_some_and(|price| self.min <= price && price <= self.max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::MAX)
    }
}

/// Rule used to round a listing rating before comparing it with the star threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingRounding {
    /// 4.5 rounds to 5, 4.4 rounds to 4.
    #[default]
    HalfUp,
    /// Banker's rounding: 4.5 rounds to 4, 3.5 rounds to 4.
    HalfEven,
}

impl RatingRounding {
    pub fn round(&self, rating: Decimal) -> Decimal {
        let strategy = match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        };
        rating.round_dp_with_strategy(0, strategy)
    }
}

/// Highest selectable star threshold.
pub const MAX_STAR_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep the order in which listings were received.
    #[default]
    Default,
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = StorefrontError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            other => Err(StorefrontError::ValidationError(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        };
        f.write_str(name)
    }
}

/// Filter and sort settings built by the caller for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub location_filter: LocationFilter,
    pub price_range: PriceRange,
    /// Minimum rounded rating, 0 disables the rating clause.
    pub min_star_rating: u8,
    /// Sorts by price only.
    pub sort_order: SortOrder,
    pub rating_rounding: RatingRounding,
}

impl FilterSpec {
    /// Creates a spec that passes every listing with a price, in input order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location_filter = LocationFilter::new(location);
        self
    }

    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    /// Minimum rounded star rating; 0 disables the clause.
    pub fn with_min_star_rating(mut self, stars: u8) -> Self {
        self.min_star_rating = stars;
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_rating_rounding(mut self, rounding: RatingRounding) -> Self {
        self.rating_rounding = rounding;
        self
    }

    pub fn rating_matches(&self, rating: Option<Decimal>) -> bool {
        if self.min_star_rating == 0 {
            return true;
        }
        rating.is_some_and(|rating| {
            self.rating_rounding.round(rating) >= Decimal::from(self.min_star_rating)
        })
    }

    /// All three clauses ANDed.
    pub fn matches(&self, listing: &ListingRecord) -> bool {
        self.location_filter.matches(listing.location.as_deref())
            && self.price_range.contains(listing.price)
            && self.rating_matches(listing.rating)
    }
}

/// Ordered view produced by the filter engine. Always a fresh copy of the input records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredResult {
    listings: Vec<ListingRecord>,
}

impl FilteredResult {
    pub fn new(listings: Vec<ListingRecord>) -> Self {
        Self { listings }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn as_slice(&self) -> &[ListingRecord] {
        &self.listings
    }

    pub fn ids(&self) -> Vec<&str> {
        self.listings.iter().map(|l| l.id.as_str()).collect()
    }

    /// Returns the 1-based page `number` of `size` records.
    ///
    /// Page 0, a zero size, or a page past the end yields an empty slice.
    pub fn page(&self, number: usize, size: usize) -> &[ListingRecord] {
        if number == 0 || size == 0 {
            return &[];
        }
        let start = (number - 1).saturating_mul(size);
        if start >= self.listings.len() {
            return &[];
        }
        let end = start.saturating_add(size).min(self.listings.len());
        &self.listings[start..end]
    }

    pub fn into_inner(self) -> Vec<ListingRecord> {
        self.listings
    }
}

impl IntoIterator for FilteredResult {
    type Item = ListingRecord;
    type IntoIter = std::vec::IntoIter<ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}
