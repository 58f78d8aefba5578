//! The row-stream boundary.
//!
//! The core crates never look at CSV syntax. They consume and produce rows
//! (ordered cell sequences) through plain iterators and the [`RowSink`]
//! trait; the `csv` crate does the byte-level work at the process edges.

use std::io;

use crate::error::Result;

/// One record of a tabular stream: an ordered sequence of cells.
///
/// Cells are kept as text. Integers are parsed lazily and only where an
/// integer is actually expected (the reference column of a mapping store).
pub type Row = Vec<String>;

/// Destination for rows, one at a time, in order.
pub trait RowSink {
    fn write_row(&mut self, row: &[String]) -> Result<()>;

    /// Pushes buffered rows down to the underlying medium.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: RowSink + ?Sized> RowSink for &mut T {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        (**self).write_row(row)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<W: io::Write> RowSink for csv::Writer<W> {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.write_record(row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        csv::Writer::flush(self)?;
        Ok(())
    }
}

/// In-memory sink; rows are collected in order.
impl RowSink for Vec<Row> {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.push(row.to_vec());
        Ok(())
    }
}

/// Adapts a `csv` reader into a row iterator, header row included.
///
/// The reader must be built with `has_headers(false)` so the first row
/// reaches the consumer; header interpretation belongs to [`Header`].
///
/// [`Header`]: crate::header::Header
pub fn read_rows<R: io::Read>(reader: csv::Reader<R>) -> impl Iterator<Item = Result<Row>> {
    reader.into_records().map(|record| {
        let record = record?;
        Ok(record.iter().map(str::to_string).collect())
    })
}
