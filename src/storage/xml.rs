//! XML file operations
//!
//! Expected layout: a root element holding one element per record, each
//! with `name`, `height` and `weight` children. Tag names of the root and
//! record elements are not checked.
//!
//! ```xml
//! <data>
//!     <person>
//!         <name>Alice</name>
//!         <height>70</height>
//!         <weight>150</weight>
//!     </person>
//! </data>
//! ```

use crate::error::EtlError;
use crate::etl::Extractor;
use crate::record::{Record, Table};

use eyre::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::{Path, PathBuf};

const ROOT_DEPTH: usize = 1;
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Height,
    Weight,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Field::Name),
            b"height" => Some(Field::Height),
            b"weight" => Some(Field::Weight),
            _ => None,
        }
    }
}

/// Child values collected for one record element
#[derive(Default)]
struct RecordFields {
    name: Option<String>,
    height: Option<String>,
    weight: Option<String>,
}

impl RecordFields {
    /// Start a child element; the first occurrence of each tag wins
    fn open(&mut self, field: Field) -> bool {
        let slot = self.slot(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(String::new());
        true
    }

    fn push_text(&mut self, field: Field, text: &str) {
        if let Some(value) = self.slot(field) {
            value.push_str(text);
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
        }
    }

    fn finish(self, index: usize) -> Result<Record, String> {
        let name = self
            .name
            .ok_or_else(|| format!("record {index}: missing <name> element"))?;
        let height = parse_number(index, "height", self.height)?;
        let weight = parse_number(index, "weight", self.weight)?;
        Ok(Record::new(name.trim(), height, weight))
    }
}

fn parse_number(index: usize, tag: &str, text: Option<String>) -> Result<f64, String> {
    let text = text.ok_or_else(|| format!("record {index}: missing <{tag}> element"))?;
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("record {index}: <{tag}> value {:?} is not a number", text))?;
    if !value.is_finite() {
        return Err(format!("record {index}: <{tag}> value {:?} is not finite", text));
    }
    Ok(value)
}

/// Parse every record element under the document root
fn parse_records(content: &str) -> Result<Table, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut current: Option<RecordFields> = None;
    let mut field: Option<Field> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML near byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                depth += 1;
                match depth {
                    ROOT_DEPTH => seen_root = true,
                    RECORD_DEPTH => current = Some(RecordFields::default()),
                    FIELD_DEPTH => {
                        field = Field::from_tag(start.local_name().as_ref()).filter(|f| {
                            current.as_mut().is_some_and(|fields| fields.open(*f))
                        });
                    }
                    _ => {}
                }
            }
            Event::Empty(empty) => match depth + 1 {
                ROOT_DEPTH => seen_root = true,
                RECORD_DEPTH => {
                    let index = records.len() + 1;
                    records.push(RecordFields::default().finish(index)?);
                }
                FIELD_DEPTH => {
                    if let (Some(f), Some(fields)) =
                        (Field::from_tag(empty.local_name().as_ref()), current.as_mut())
                    {
                        fields.open(f);
                    }
                }
                _ => {}
            },
            Event::Text(text) if depth == FIELD_DEPTH => {
                if let (Some(f), Some(fields)) = (field, current.as_mut()) {
                    let text = text.unescape().map_err(|e| e.to_string())?;
                    fields.push_text(f, &text);
                }
            }
            Event::CData(cdata) if depth == FIELD_DEPTH => {
                if let (Some(f), Some(fields)) = (field, current.as_mut()) {
                    fields.push_text(f, &String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                match depth {
                    RECORD_DEPTH => {
                        if let Some(fields) = current.take() {
                            let index = records.len() + 1;
                            records.push(fields.finish(index)?);
                        }
                    }
                    FIELD_DEPTH => field = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err("document has no root element".to_string());
    }
    if depth != 0 {
        return Err("unexpected end of document".to_string());
    }

    Ok(records)
}

/// Read records from an XML file
pub struct XmlReader {
    path: PathBuf,
}

impl XmlReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all record elements, in document order
    pub fn read(&self) -> Result<Table> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| EtlError::Read {
            path: self.path.clone(),
            source,
        })?;

        let records =
            parse_records(&content).map_err(|reason| EtlError::parse(&self.path, None, reason))?;

        log::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

impl Extractor for XmlReader {
    type Item = Record;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}
