//! A streaming converter for exported Windows Event Viewer XML logs.
//!
//! Exported logs (`wevtutil qe ... /f:xml`, or "Save All Events As..." in
//! the Event Viewer) are flattened into fixed-schema CSV rows. Parsing is
//! incremental: only one event subtree is held in memory at a time, so
//! document size does not drive peak memory.
//!
//! ```no_run
//! use evtxml::{CsvOutput, process_file};
//! use std::path::Path;
//!
//! # fn main() -> evtxml::Result<()> {
//! let mut sink = CsvOutput::with_writer(std::io::stdout());
//! sink.write_header()?;
//!
//! let report = process_file(Path::new("Application.xml"), &mut sink)?;
//! eprintln!("{} events", report.records);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod csv_output;
pub mod err;
pub mod event_record;
pub mod event_stream;
pub mod model;

pub use convert::{FileReport, process_file};
pub use csv_output::{CsvOutput, RecordSink};
pub use err::{EvtxmlError, Result};
pub use event_record::{EVENT_FIELD_NAMES, EventRecord};
pub use event_stream::EventStream;
pub use model::{XmlAttribute, XmlElement, local_name};
