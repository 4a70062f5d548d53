//! Document writer
//!
//! Serializes entries to the XML storage document and writes it to disk.

use super::payload::encode_payload;
use super::{DTYPE_ATTR, KEY_TAG, RECORD_TAG, ROOT_TAG, VALUE_TAG};
use crate::error::{StoreError, StoreResult};
use crate::store::{Entry, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialize entries, in order, to an XML document
///
/// The output depends only on the entries, so encoding an unchanged store
/// twice yields identical bytes.
pub fn encode_document<'a, I>(entries: I) -> StoreResult<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new(RECORD_TAG)))?;

        write_text_element(&mut writer, BytesStart::new(KEY_TAG), entry.key())?;

        let mut value = BytesStart::new(VALUE_TAG);
        value.push_attribute((DTYPE_ATTR, entry.dtype().as_str()));
        write_text_element(&mut writer, value, &encode_value(entry.value())?)?;

        writer.write_event(Event::End(BytesEnd::new(RECORD_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes)
        .map_err(|e| StoreError::corrupt(format!("encoded document is not UTF-8: {}", e)))
}

/// Encode entries and overwrite the file at `path`
pub fn write_file<'a, P, I>(path: P, entries: I) -> StoreResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Entry>,
{
    let document = encode_document(entries)?;
    fs::write(path.as_ref(), document.as_bytes())?;
    debug!("Wrote {} bytes to {:?}", document.len(), path.as_ref());
    Ok(())
}

/// Text placed inside the value element
fn encode_value(value: &Value) -> StoreResult<String> {
    if value.dtype().is_container() {
        encode_payload(value)
    } else {
        Ok(value.to_string())
    }
}

/// Write `<tag>text</tag>`, or `<tag/>` for empty text
///
/// Empty elements are self-closing so indentation never ends up inside them.
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    text: &str,
) -> StoreResult<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_encode_layout() {
        let mut store = MemoryStore::new();
        store.set("age", Value::from(25));
        store.set("t", Value::from((1, 2, 3)));
        store.set("none_key", Value::Null);

        let document = encode_document(store.iter()).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<holdkv>\n  \
<keyval>\n    <key>age</key>\n    <value dtype=\"int\">25</value>\n  </keyval>\n  \
<keyval>\n    <key>t</key>\n    <value dtype=\"tuple\">[1,2,3]</value>\n  </keyval>\n  \
<keyval>\n    <key>none_key</key>\n    <value dtype=\"NoneType\">None</value>\n  </keyval>\n\
</holdkv>\n";
        assert_eq!(document, expected);
    }

    #[test]
    fn test_encode_escapes_markup() {
        let mut store = MemoryStore::new();
        store.set("key with spaces & symbols!@#$%", Value::from("<b>"));

        let document = encode_document(store.iter()).unwrap();
        assert!(document.contains("<key>key with spaces &amp; symbols!@#$%</key>"));
        assert!(document.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_encode_empty_key_self_closes() {
        let mut store = MemoryStore::new();
        store.set("", Value::from(""));

        let document = encode_document(store.iter()).unwrap();
        assert!(document.contains("<key/>"));
        assert!(document.contains("<value dtype=\"str\"/>"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_writer.xml");

        let mut store = MemoryStore::new();
        store.set("key1", Value::from("value1"));
        write_file(&path, store.iter()).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
