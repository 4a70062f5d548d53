//! holdkv - A small embedded key-value store with typed XML persistence
//!
//! holdkv keeps typed values in memory and saves them to an XML file with a
//! type tag next to each value, so integers, floats, booleans, null, lists,
//! maps and tuples come back as what they were:
//! - `store` holds the in-memory data model (values, tags, ordered entries)
//! - `codec` turns entries into the XML document and back
//! - `hold` ties the two together with auto-sync and auto-reload
//!
//! ```no_run
//! use holdkv::{Hold, Value};
//!
//! fn main() -> holdkv::StoreResult<()> {
//!     let mut hold = Hold::open_path("data.xml")?;
//!     hold.set("age", 25)?;
//!     hold.set("t", (1, 2, "x"))?;
//!     assert_eq!(hold.get("age")?, &Value::Integer(25));
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod hold;
pub mod store;
pub mod view;

/// Re-export commonly used types
pub use config::{HoldConfig, Mode};
pub use error::{StoreError, StoreResult};
pub use hold::{Entries, Hold};
pub use store::{DType, Entry, Value};
