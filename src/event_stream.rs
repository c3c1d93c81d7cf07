//! Streaming extraction of `Event` elements from an exported log document.
//!
//! Exported Event Viewer logs can hold tens of thousands of events; reading
//! the whole tree up front is not an option. [`EventStream`] drives
//! `quick-xml` one event at a time and only materializes a subtree between
//! an `Event` open tag and its close. The completed subtree is handed to the
//! caller by value, so nothing accumulates inside the stream between yields.

use crate::err::{EvtxmlError, Result};
use crate::model::{XmlAttribute, XmlElement, local_name};

use log::{debug, trace};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const EVENT_TAG: &str = "Event";

pub struct EventStream<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    // Open elements of the event currently being assembled.
    // Empty whenever the cursor is outside an `Event` subtree.
    stack: Vec<XmlElement>,
    finished: bool,
}

impl EventStream<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("streaming events from {}", path.display());

        let file = File::open(path).map_err(|source| EvtxmlError::FailedToOpenFile {
            source,
            path: path.to_path_buf(),
        })?;

        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> EventStream<R> {
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        EventStream {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            stack: Vec::new(),
            finished: false,
        }
    }

    fn read_next(&mut self) -> Result<Option<XmlElement>> {
        loop {
            self.buf.clear();
            let offset = self.reader.buffer_position() as u64;

            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| EvtxmlError::MalformedXml { source, offset })?;

            match event {
                XmlEvent::Start(ref e) => {
                    if self.stack.is_empty() && !is_event_tag(e) {
                        continue;
                    }
                    let element = element_from_start(e, offset)?;
                    self.stack.push(element);
                }
                XmlEvent::Empty(ref e) => {
                    if let Some(parent) = self.stack.last_mut() {
                        let element = element_from_start(e, offset)?;
                        parent.children.push(element);
                    } else if is_event_tag(e) {
                        trace!("yielding empty event at offset {offset}");
                        return Ok(Some(element_from_start(e, offset)?));
                    }
                }
                XmlEvent::Text(ref e) => {
                    if let Some(top) = self.stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|source| EvtxmlError::MalformedXml {
                                source: source.into(),
                                offset,
                            })?;
                        top.text.push_str(&text);
                    }
                }
                XmlEvent::CData(ref e) => {
                    if let Some(top) = self.stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                XmlEvent::End(_) => {
                    if let Some(closed) = self.stack.pop() {
                        match self.stack.last_mut() {
                            Some(parent) => parent.children.push(closed),
                            None => {
                                trace!("yielding event closed at offset {offset}");
                                return Ok(Some(closed));
                            }
                        }
                    }
                }
                XmlEvent::Eof => {
                    if let Some(open) = self.stack.last() {
                        return Err(EvtxmlError::TruncatedDocument {
                            tag: open.name.clone(),
                            offset,
                        });
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Result<XmlElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                // A parse failure poisons the rest of the document.
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn is_event_tag(e: &BytesStart<'_>) -> bool {
    local_name(&String::from_utf8_lossy(e.name().as_ref())) == EVENT_TAG
}

fn element_from_start(e: &BytesStart<'_>, offset: u64) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());

    for attr in e.attributes() {
        let attr = attr.map_err(|source| EvtxmlError::MalformedAttribute { source, offset })?;
        let value = attr
            .unescape_value()
            .map_err(|source| EvtxmlError::MalformedXml {
                source: source.into(),
                offset,
            })?;

        element.attributes.push(XmlAttribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: value.into_owned(),
        });
    }

    Ok(element)
}
