//! ODM value types
//!
//! Defines the value model shared by the document layer: plain scalars,
//! sequences and mappings plus the library's opaque types (`ObjectId`,
//! `Binary`), and the structural comparator used for change detection.

pub mod binary;
pub mod equal;
pub mod error;
pub mod object_id;
pub mod value;

pub use binary::{Binary, ByteView, SUBTYPE_GENERIC};
pub use equal::deep_equal;
pub use error::TypeError;
pub use object_id::ObjectId;
pub use value::{Kind, Map, Value};
