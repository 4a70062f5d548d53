//! Storage codec
//!
//! Converts the ordered entries of a store to and from an XML document.
//! Each record carries the key, the value text and a `dtype` attribute naming
//! the value's type, so the original type is rebuilt on load:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <holdkv>
//!   <keyval>
//!     <key>age</key>
//!     <value dtype="int">25</value>
//!   </keyval>
//! </holdkv>
//! ```
//!
//! Lists, maps and tuples are stored as a JSON payload inside the value element.

mod payload;
mod reader;
mod writer;

pub use reader::{decode_document, read_file};
pub use writer::{encode_document, write_file};

/// Root element name (not checked on load)
pub const ROOT_TAG: &str = "holdkv";
/// Record element name
pub const RECORD_TAG: &str = "keyval";
/// Key element name
pub const KEY_TAG: &str = "key";
/// Value element name
pub const VALUE_TAG: &str = "value";
/// Attribute holding the type tag
pub const DTYPE_ATTR: &str = "dtype";
