//! Response decoder module
//!
//! # Overview
//!
//! The decode module turns one raw XML page body from the CareerNet API
//! into typed records. Each `<content>` element becomes a
//! [`SchoolRecord`](crate::types::SchoolRecord); every field is
//! individually optional, and only a structurally unparseable body is an
//! error.

mod parser;

pub use parser::{parse_page, ParsedPage};
