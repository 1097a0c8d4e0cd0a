//! HTML parsing infrastructure
//!
//! Turns the fetched listing markup into [`AdRecord`](crate::domain::ad::AdRecord)s.

pub mod ad_list_parser;

pub use ad_list_parser::{AdListParser, ParseError};
