//! CSV row sink.

use crate::err::Result;
use crate::event_record::{EVENT_FIELD_NAMES, EventRecord};

use std::io::Write;

/// Destination for flattened records, one at a time.
///
/// The batch driver hands one sink per output file to the processor; in
/// merged mode a single sink outlives the whole batch.
pub trait RecordSink {
    fn write_record(&mut self, record: &EventRecord) -> Result<()>;
}

/// Adapter between [`EventRecord`] and a `csv` writer.
///
/// The writer owns quoting and line termination, so rows containing the
/// delimiter, quotes, or newlines come out escaped and no doubled line
/// endings are produced.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvOutput<W> {
    pub fn with_writer(target: W) -> Self {
        CsvOutput {
            writer: csv::Writer::from_writer(target),
        }
    }

    /// Writes the fixed header row. Called exactly once per output file.
    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(EVENT_FIELD_NAMES)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        Ok(self.writer.into_inner().map_err(|e| e.into_error())?)
    }
}

impl<W: Write> RecordSink for CsvOutput<W> {
    fn write_record(&mut self, record: &EventRecord) -> Result<()> {
        self.writer.write_record(record.fields())?;
        Ok(())
    }
}
