//! Delimited text reading utilities.

mod encoding;
mod reader;

pub use encoding::{decode_bytes, resolve_encoding};
pub use reader::{ReadOptions, parse_delimited, read_delimited, read_inputs};
