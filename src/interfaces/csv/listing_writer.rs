use crate::domain::listing::ListingRecord;
use crate::error::Result;
use std::io::Write;

/// Writes listing records as CSV with the same header the reader expects.
pub struct ListingWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_listings<'a>(
        &mut self,
        listings: impl IntoIterator<Item = &'a ListingRecord>,
    ) -> Result<()> {
        let mut wrote_any = false;
        for listing in listings {
            self.writer.serialize(listing)?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["id", "name", "location", "price", "rating"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
