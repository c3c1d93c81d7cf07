//! Per-file conversion driver.

use crate::csv_output::RecordSink;
use crate::err::{EvtxmlError, Result};
use crate::event_record::EventRecord;
use crate::event_stream::EventStream;

use log::{debug, warn};

use std::path::Path;

/// Outcome of converting one source file.
#[derive(Debug)]
pub struct FileReport {
    /// Rows written to the sink.
    pub records: usize,
    /// The failure that stopped this file early, if any. A broken document
    /// contributes the rows completed before the failure and the batch
    /// moves on; it is never raised out of [`process_file`].
    pub error: Option<EvtxmlError>,
}

impl FileReport {
    fn stopped(records: usize, error: EvtxmlError) -> Self {
        FileReport {
            records,
            error: Some(error),
        }
    }
}

/// Streams every event in `path` through the extractor into `sink`.
///
/// Document-level failures (unreadable file, malformed XML) are captured in
/// the returned [`FileReport`]; sink failures propagate, since a broken
/// output environment ends the whole run.
pub fn process_file<S: RecordSink>(path: impl AsRef<Path>, sink: &mut S) -> Result<FileReport> {
    let path = path.as_ref();

    let stream = match EventStream::from_path(path) {
        Ok(stream) => stream,
        Err(error) => {
            warn!("skipping {}: {error}", path.display());
            return Ok(FileReport::stopped(0, error));
        }
    };

    let mut records = 0;
    for event in stream {
        let event = match event {
            Ok(event) => event,
            Err(error) => {
                warn!(
                    "stopping {} after {records} events: {error}",
                    path.display()
                );
                return Ok(FileReport::stopped(records, error));
            }
        };

        sink.write_record(&EventRecord::from_element(&event))?;
        records += 1;
    }

    debug!("{}: {records} events", path.display());
    Ok(FileReport {
        records,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_output::CsvOutput;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct CollectingSink {
        records: Vec<EventRecord>,
    }

    impl RecordSink for CollectingSink {
        fn write_record(&mut self, record: &EventRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn write_sample(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn counts_every_converted_event() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(
            &dir,
            "system.xml",
            r#"<Events>
              <Event><System><EventID>1</EventID><Computer>A</Computer></System></Event>
              <Event><System><EventID>2</EventID><Computer>B</Computer></System></Event>
            </Events>"#,
        );

        let mut sink = CollectingSink {
            records: Vec::new(),
        };
        let report = process_file(&sample, &mut sink).unwrap();

        assert_eq!(report.records, 2);
        assert!(report.error.is_none());
        assert_eq!(sink.records[0].event_id, "1");
        assert_eq!(sink.records[1].computer, "B");
    }

    #[test]
    fn malformed_file_reports_zero_records_and_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "broken.xml", "<Events><Event><<<");

        let mut sink = CollectingSink {
            records: Vec::new(),
        };
        let report = process_file(&sample, &mut sink).unwrap();

        assert_eq!(report.records, 0);
        assert!(report.error.is_some());
        assert!(report.error.unwrap().is_document_error());
    }

    #[test]
    fn file_broken_mid_stream_keeps_completed_events() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(
            &dir,
            "partial.xml",
            "<Events><Event><System><EventID>1</EventID></System></Event><Event><System>",
        );

        let mut sink = CollectingSink {
            records: Vec::new(),
        };
        let report = process_file(&sample, &mut sink).unwrap();

        assert_eq!(report.records, 1);
        assert!(report.error.is_some());
    }

    #[test]
    fn missing_file_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CollectingSink {
            records: Vec::new(),
        };

        let report = process_file(dir.path().join("nope.xml"), &mut sink).unwrap();
        assert_eq!(report.records, 0);
        assert!(matches!(
            report.error,
            Some(EvtxmlError::FailedToOpenFile { .. })
        ));
    }

    #[test]
    fn rows_land_in_the_supplied_csv_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(
            &dir,
            "app.xml",
            r#"<Events><Event>
              <System><Provider Name="MsiInstaller"/><EventID>1033</EventID></System>
              <EventData><Data>Product X</Data></EventData>
            </Event></Events>"#,
        );

        let mut sink = CsvOutput::with_writer(Vec::new());
        sink.write_header().unwrap();
        let report = process_file(&sample, &mut sink).unwrap();
        assert_eq!(report.records, 1);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "TimeCreated,ProviderName,EventID,Level,Task,Keywords,Computer,RecordId,Message,Data"
        );
        assert_eq!(lines.next().unwrap(), ",MsiInstaller,1033,,,,,,,Product X");
        assert_eq!(lines.next(), None);
    }
}
