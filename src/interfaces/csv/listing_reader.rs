use crate::domain::listing::ListingRecord;
use crate::error::{Result, StorefrontError};
use std::io::Read;

/// Reads listing records from a CSV source.
///
/// Expects the header `id,name,location,price,rating`. Empty cells and missing
/// columns deserialize as absent fields rather than errors.
pub struct ListingReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ListingReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one listing per row.
    pub fn listings(self) -> impl Iterator<Item = Result<ListingRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(StorefrontError::from))
    }
}
