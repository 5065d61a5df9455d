//! # bitdump
//!
//! Decodes hardware word dumps: text files with one record per line and one
//! whitespace-separated token per word. A declarative schema names each
//! word, its repeat count, the base its tokens are written in and the bit
//! slices of its fields. Lines are split into cells against the schema, and
//! any cell can be decoded into its named fields.
//!
//! ## Example
//!
//! ```
//! use bitdump::schema::FormatSchema;
//! use bitdump::slice::Slice;
//! use bitdump::value::Radix;
//! use bitdump::word::WordSpec;
//! use bitdump::Interpreter;
//!
//! let schema = FormatSchema::new(vec![
//!     WordSpec::new("bx", Radix::DECIMAL),
//!     WordSpec::new("muon", Radix::HEX)
//!         .width(64)
//!         .field("phi", Slice::range(9, 0))
//!         .field("charge_sign", Slice::bit(34)),
//! ])
//! .unwrap();
//!
//! let interpreter = Interpreter::new(&schema);
//! let row = interpreter.parse_line("5 100000400");
//! assert_eq!(row.cells[1].column.word.name, "muon");
//!
//! let decoded = interpreter.decode_cell(&row.cells[1]).unwrap();
//! assert_eq!(decoded.field("phi").unwrap().value, 0);
//! assert_eq!(decoded.field("charge_sign").unwrap().value, 1);
//! ```

pub mod canonical;
pub mod decoder;
pub mod errors;
pub mod field;
pub mod interpreter;
pub mod parser;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod slice;
pub mod value;
pub mod word;

pub use canonical::canonical;
pub use errors::{Error, LookupError, ParseError, SchemaError};
pub use interpreter::{Interpreter, Selection};
