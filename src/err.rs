use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvtxmlError>;

#[derive(Debug, Error)]
pub enum EvtxmlError {
    #[error("Failed to open file {}: {source}", path.display())]
    FailedToOpenFile { source: io::Error, path: PathBuf },

    #[error("An I/O error has occurred: {0}")]
    Io(#[from] io::Error),

    #[error("Offset {offset}: document is not well-formed XML: {source}")]
    MalformedXml {
        source: quick_xml::Error,
        offset: u64,
    },

    #[error("Offset {offset}: malformed attribute: {source}")]
    MalformedAttribute {
        source: quick_xml::events::attributes::AttrError,
        offset: u64,
    },

    #[error("Offset {offset}: document ended while `{tag}` was still open")]
    TruncatedDocument { tag: String, offset: u64 },

    #[error("Writing CSV row failed with: {0}")]
    Csv(#[from] csv::Error),
}

impl EvtxmlError {
    /// Whether this error describes a broken source document, as opposed to
    /// a failure of the environment (output I/O, CSV serialization).
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            EvtxmlError::FailedToOpenFile { .. }
                | EvtxmlError::MalformedXml { .. }
                | EvtxmlError::MalformedAttribute { .. }
                | EvtxmlError::TruncatedDocument { .. }
        )
    }
}
