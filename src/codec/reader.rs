//! Document reader
//!
//! Parses the XML storage document back into typed entries.

use super::payload::decode_payload;
use super::{DTYPE_ATTR, KEY_TAG, RECORD_TAG, VALUE_TAG};
use crate::error::{StoreError, StoreResult};
use crate::store::{DType, Entry, Value};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Read and decode the document at `path`
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_file<P: AsRef<Path>>(path: P) -> StoreResult<Option<Vec<Entry>>> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No storage file at {:?}", path);
            return Ok(None);
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(StoreError::corrupt(format!("{:?} is not valid UTF-8", path)));
        }
        Err(e) => return Err(e.into()),
    };

    let entries = decode_document(&text)?;
    info!("Decoded {} entries from {:?}", entries.len(), path);
    Ok(Some(entries))
}

/// Decode an XML document into entries, in document order
pub fn decode_document(text: &str) -> StoreResult<Vec<Entry>> {
    let mut reader = Reader::from_str(text);
    let mut parser = DocumentParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close()?;
            }
            Event::End(_) => parser.close()?,
            Event::Text(t) => {
                if parser.capturing() {
                    parser.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if parser.capturing() {
                    let raw = std::str::from_utf8(&c)
                        .map_err(|e| StoreError::corrupt(format!("CDATA is not UTF-8: {}", e)))?;
                    parser.text.push_str(raw);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

/// Which child of a record is being read
enum Field {
    Key,
    Value { tag: Option<String> },
}

/// Value element as found in the document, before type dispatch
struct RawValue {
    tag: Option<String>,
    text: String,
}

#[derive(Default)]
struct RecordBuilder {
    key: Option<String>,
    value: Option<RawValue>,
}

/// Event-driven state for one document
///
/// Depth 1 is the root, depth 2 a record, depth 3 a key or value element.
#[derive(Default)]
struct DocumentParser {
    depth: usize,
    seen_root: bool,
    record: Option<RecordBuilder>,
    field: Option<Field>,
    text: String,
    entries: Vec<Entry>,
}

impl DocumentParser {
    fn open(&mut self, e: &BytesStart<'_>) -> StoreResult<()> {
        self.depth += 1;

        match self.depth {
            1 => {
                if self.seen_root {
                    return Err(StoreError::corrupt("junk after document element"));
                }
                self.seen_root = true;
            }
            2 if e.name().as_ref() == RECORD_TAG.as_bytes() => {
                self.record = Some(RecordBuilder::default());
            }
            3 if self.record.is_some() => {
                let name = e.name();
                if name.as_ref() == KEY_TAG.as_bytes() {
                    self.field = Some(Field::Key);
                    self.text.clear();
                } else if name.as_ref() == VALUE_TAG.as_bytes() {
                    let tag = match e.try_get_attribute(DTYPE_ATTR)? {
                        Some(attr) => Some(attr.unescape_value()?.into_owned()),
                        None => None,
                    };
                    self.field = Some(Field::Value { tag });
                    self.text.clear();
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        match self.depth {
            0 => return Err(StoreError::corrupt("unmatched closing tag")),
            3 => {
                if let Some(field) = self.field.take() {
                    let text = std::mem::take(&mut self.text);
                    if let Some(record) = self.record.as_mut() {
                        match field {
                            Field::Key => record.key = Some(text),
                            Field::Value { tag } => record.value = Some(RawValue { tag, text }),
                        }
                    }
                }
            }
            2 => {
                if let Some(record) = self.record.take() {
                    let position = self.entries.len();
                    self.entries.push(record.build(position)?);
                }
            }
            _ => {}
        }

        self.depth -= 1;
        Ok(())
    }

    /// Text is only kept directly inside a key or value element
    fn capturing(&self) -> bool {
        self.field.is_some() && self.depth == 3
    }

    fn finish(self) -> StoreResult<Vec<Entry>> {
        if !self.seen_root {
            return Err(StoreError::corrupt("no root element"));
        }
        if self.depth != 0 {
            return Err(StoreError::corrupt("document ends before its root is closed"));
        }
        Ok(self.entries)
    }
}

impl RecordBuilder {
    fn build(self, position: usize) -> StoreResult<Entry> {
        let key = self.key.ok_or_else(|| {
            StoreError::corrupt(format!("record {} is missing its key element", position))
        })?;
        let raw = self.value.ok_or_else(|| {
            StoreError::corrupt(format!("record '{}' is missing its value element", key))
        })?;

        let value = decode_value(raw.tag.as_deref(), raw.text)?;
        Ok(Entry::new(key, value))
    }
}

/// Rebuild a value from its text, dispatching on the tag first
///
/// Unknown or missing tags keep the raw text, except that the literal
/// `None` reads as null.
fn decode_value(tag: Option<&str>, text: String) -> StoreResult<Value> {
    let dtype = tag.and_then(DType::from_tag);
    if dtype.is_none() {
        if let Some(unknown) = tag {
            debug!("Unknown dtype '{}', keeping raw text", unknown);
        }
    }

    match dtype {
        Some(DType::Int) => text.trim().parse::<i64>().map(Value::Integer).map_err(|e| {
            StoreError::corrupt(format!("invalid int literal '{}': {}", text, e))
        }),
        Some(DType::Float) => text.trim().parse::<f64>().map(Value::Float).map_err(|e| {
            StoreError::corrupt(format!("invalid float literal '{}': {}", text, e))
        }),
        Some(DType::Bool) => Ok(Value::Bool(text == "True")),
        Some(dtype @ (DType::Dict | DType::List | DType::Tuple)) => decode_payload(dtype, &text),
        Some(DType::NoneType) => Ok(Value::Null),
        Some(DType::Str) => Ok(Value::Str(text)),
        None if text == "None" => Ok(Value::Null),
        None => Ok(Value::Str(text)),
    }
}
