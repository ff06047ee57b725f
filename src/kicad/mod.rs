//! KiCad footprint text handling.
//!
//! This module turns laid-out pads into `.kicad_mod` footprint text and
//! reads pads back from it:
//!
//! - [`writer`] — Pad lines, outlines and complete footprint documents
//! - [`reader`] — Pad records parsed back from footprint text
//! - [`sexp`] — The S-expression syntax both sides share
//!
//! Only the parts of the format this generator emits are supported; this is
//! not a full `.kicad_mod` grammar.

pub mod error;
pub mod reader;
pub mod sexp;
pub mod writer;

pub use error::{KicadError, KicadResult};
pub use reader::{parse_pads, read_footprint_file};
pub use crate::footprint::format_mm;
pub use writer::{footprint_path, pad_line, write_footprint_file, FootprintDocument};
