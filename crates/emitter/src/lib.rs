//! # Emitter
//!
//! Selects devices of one vendor by name and serializes them, with their
//! subdevices, as a comma-terminated list of C initializer-list entries meant
//! to be `#include`d inside an array definition.
//!
//! ## Example
//!
//! ```rust
//! use pcitab_emitter::{NameFilter, emit};
//! use pcitab_ids::Hierarchy;
//!
//! let hierarchy = Hierarchy::parse("8086  Intel Corporation\n\t1912  HD Graphics\n").unwrap();
//! let mut out = Vec::new();
//! emit(hierarchy.vendor("8086").unwrap(), &NameFilter::new(["Graphics"]), &mut out).unwrap();
//!
//! assert_eq!(out, br#"{"0x1912",{{"",u8"HD Graphics"}}},"#);
//! ```

mod emitter;
mod error;
mod escape;
mod filter;

pub use crate::emitter::{EmitSummary, Emitter, emit};
pub use crate::error::{EmitError, EmitErrorExt};
pub use crate::escape::{escape_quotes, unescape_quotes};
pub use crate::filter::NameFilter;

pub type Result<T> = std::result::Result<T, EmitError>;
