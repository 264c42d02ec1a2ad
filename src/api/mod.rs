//! Purpose: Define the stable public API boundary for Formic.
//! Exports: Sources, schemas, parse entry points, and the rejection outcome.
//! Role: Public, additive-only surface; callers never reach into core paths directly.
//! Invariants: This module is the only public path intended for downstream use.
//! Invariants: Failure outcomes crossing this boundary carry no field-level detail.

mod parse;
mod reject;
mod source;

pub use crate::core::entries::RawEntries;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::object::{FieldValue, ParsedObject};
pub use crate::core::schema::{FieldFormat, FieldRule, Issue, Schema};
pub use parse::{
    DEFAULT_BODY_LIMIT, EntriesParser, ParseOptions, parse_entries, parse_entries_value,
    parse_form, parse_form_value, parse_query, parse_query_value,
};
pub use reject::{DEFAULT_ERROR_MESSAGE, DEFAULT_ERROR_STATUS, Rejection};
pub use source::{FormSource, QuerySource};
