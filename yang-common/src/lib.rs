//! Shared types for the YANG front-end compiler: byte spans, the decimal/
//! integer numeric core, range parsing, and the lex/parse error ceiling.

pub mod error;
pub mod number;
pub mod span;
pub mod yrange;

pub use error::{ErrorCounter, RawError, MAX_ERRORS};
pub use number::{Number, NumberKind};
pub use span::{LineIndex, Span};
pub use yrange::{parse_ranges, RangeDomain, RangeError, YRange, YangRange};
