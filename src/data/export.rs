//! CSV export of a price series

use crate::error::Result;
use crate::format::to_fixed;
use crate::types::PricePoint;
use std::io::Write;

/// Write `timestamp,datetime,price` rows, price to 4 decimals
pub fn write_series_csv<W: Write>(series: &[PricePoint], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["timestamp", "datetime", "price"])?;
    for point in series {
        csv.write_record([
            point.timestamp.to_string(),
            point.datetime().to_rfc3339(),
            to_fixed(point.price, 4),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
