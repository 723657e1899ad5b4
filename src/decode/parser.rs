//! XML page parser
//!
//! The source wraps records in `<content>` elements with optional text
//! children. `totalCount`, when present, reflects the overall dataset
//! size, not the page size, and the server reports it inconsistently —
//! callers must not trust it exclusively.

use crate::error::{Error, Result};
use crate::types::{OptionStringExt, SchoolRecord};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One decoded page of the directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Records in document order
    pub records: Vec<SchoolRecord>,
    /// Advertised overall dataset size, if the page carried one
    pub total_count: Option<u64>,
}

/// Text children of a `<content>` block that we extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SchoolName,
    Region,
    TotalCount,
    Major,
    Subject,
    Chart,
    Cert,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"schoolName" => Some(Self::SchoolName),
            b"region" => Some(Self::Region),
            b"totalCount" => Some(Self::TotalCount),
            b"major" => Some(Self::Major),
            b"subject" => Some(Self::Subject),
            b"chart" => Some(Self::Chart),
            b"cert" => Some(Self::Cert),
            _ => None,
        }
    }
}

/// Parse one page body into records.
///
/// Absent or empty fields become `None`, never a parse error. Only a body
/// that cannot be read as XML at all fails, and that failure is retryable
/// at the fetch layer.
pub fn parse_page(body: &str) -> Result<ParsedPage> {
    if !body.trim_start().starts_with('<') {
        return Err(Error::xml_parse("body does not appear to be XML"));
    }

    let mut reader = Reader::from_str(body);
    let mut page = ParsedPage::default();
    let mut current: Option<SchoolRecord> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Err(e) => return Err(Error::xml_parse(format!("malformed page body: {e}"))),
            Ok(Event::Eof) => {
                // EOF inside an open record means the body was cut short.
                if current.is_some() {
                    return Err(Error::xml_parse("truncated page body"));
                }
                break;
            }
            Ok(Event::Start(start)) => match start.name().as_ref() {
                b"content" => {
                    current = Some(SchoolRecord::default());
                }
                name => {
                    if current.is_some() {
                        field = Field::from_name(name);
                        text.clear();
                    }
                }
            },
            Ok(Event::Text(t)) => {
                if field.is_some() {
                    let chunk = t
                        .unescape()
                        .map_err(|e| Error::xml_parse(format!("bad text node: {e}")))?;
                    text.push_str(&chunk);
                }
            }
            Ok(Event::End(end)) => {
                if end.name().as_ref() == b"content" {
                    if let Some(record) = current.take() {
                        page.records.push(record);
                    }
                    field = None;
                } else if let (Some(f), Some(record)) = (field.take(), current.as_mut()) {
                    assign(record, &mut page.total_count, f, text.trim());
                }
            }
            Ok(_) => {}
        }
    }

    Ok(page)
}

fn assign(record: &mut SchoolRecord, total_count: &mut Option<u64>, field: Field, value: &str) {
    let value = value.to_string().none_if_empty();
    match field {
        Field::SchoolName => record.school_name = value,
        Field::Region => record.region = value,
        Field::Major => record.major = value,
        Field::Subject => record.subject = value,
        Field::Chart => record.chart = value,
        Field::Cert => record.cert = value,
        Field::TotalCount => {
            // First well-formed value wins; later pages may disagree.
            if total_count.is_none() {
                *total_count = value.and_then(|v| v.parse().ok());
            }
        }
    }
}
