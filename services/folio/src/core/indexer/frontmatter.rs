//! Front matter parsing.
//!
//! A post starts with a YAML block between two `---` lines, followed
//! by the markdown body:
//!
//! ```text
//! ---
//! title: Intro to Kafka
//! date: 2024-03-15
//! tags: kafka, backend
//! category: Backend
//! ---
//! Body text...
//! ```
//!
//! Field defaults are applied here, at parse time, so consumers never
//! deal with loosely typed metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

const DELIMITER: &str = "---";

/// A scalar YAML value rendered as text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_yaml::Number),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// A single-valued field; a list keeps its first element
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SingleField {
    One(Scalar),
    List(Vec<Scalar>),
}

impl SingleField {
    fn first(self) -> Option<Scalar> {
        match self {
            SingleField::One(value) => Some(value),
            SingleField::List(items) => items.into_iter().next(),
        }
    }
}

/// `tags` may be a list or one comma-delimited string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TagField {
    List(Vec<Scalar>),
    Delimited(Scalar),
}

/// Raw header as authored
#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    #[serde(default)]
    title: Option<SingleField>,
    #[serde(default)]
    description: Option<SingleField>,
    #[serde(default)]
    date: Option<SingleField>,
    #[serde(default)]
    tags: Option<TagField>,
    #[serde(default)]
    category: Option<SingleField>,
    #[serde(default)]
    thumbnail: Option<SingleField>,
}

/// Typed post metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    /// `None` when missing or blank
    pub title: Option<String>,
    pub description: String,
    /// `None` when no date was given
    pub date: Option<DateTime<Utc>>,
    /// Trimmed, blank entries dropped, authored order
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

/// A parsed content item
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem<'a> {
    pub meta: FrontMatter,
    pub body: &'a str,
}

/// Split `raw` into front matter and body and parse the header.
///
/// Text without a leading `---` line has empty metadata and is all
/// body. Errors describe why the header was rejected.
pub fn parse(raw: &str) -> Result<ParsedItem<'_>, String> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((header, body)) = split(text)? else {
        return Ok(ParsedItem {
            meta: FrontMatter::default(),
            body: text,
        });
    };

    let value: serde_yaml::Value = if header.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(header).map_err(|e| format!("invalid front matter: {e}"))?
    };

    let raw_meta: RawFrontMatter = match value {
        serde_yaml::Value::Null => RawFrontMatter::default(),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| format!("invalid front matter: {e}"))?,
        _ => return Err("front matter must be a mapping of fields".to_string()),
    };

    Ok(ParsedItem {
        meta: FrontMatter::try_from(raw_meta)?,
        body,
    })
}

/// Locate the header block. `Ok(None)` when the text has no header.
fn split(text: &str) -> Result<Option<(&str, &str)>, String> {
    let mut lines = text.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Ok(None),
    }

    let header_start = text
        .find('\n')
        .map(|i| i + 1)
        .unwrap_or(text.len());
    let mut offset = header_start;

    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok(Some((header, body)));
        }
        offset += line.len();
    }

    Err("front matter is not terminated by a '---' line".to_string())
}

impl TryFrom<RawFrontMatter> for FrontMatter {
    type Error = String;

    fn try_from(raw: RawFrontMatter) -> Result<Self, Self::Error> {
        let date = match raw.date.and_then(SingleField::first).map(Scalar::into_text) {
            Some(text) if !text.trim().is_empty() => Some(parse_date(text.trim())?),
            _ => None,
        };

        Ok(Self {
            title: non_blank(raw.title),
            description: raw
                .description
                .and_then(SingleField::first)
                .map(Scalar::into_text)
                .unwrap_or_default(),
            date,
            tags: raw.tags.map(normalize_tags).unwrap_or_default(),
            category: non_blank(raw.category),
            thumbnail: non_blank(raw.thumbnail),
        })
    }
}

fn non_blank(value: Option<SingleField>) -> Option<String> {
    value
        .and_then(SingleField::first)
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty())
}

/// Trim every tag, drop blanks, keep authored order and case
fn normalize_tags(field: TagField) -> Vec<String> {
    let raw: Vec<String> = match field {
        TagField::List(items) => items.into_iter().map(Scalar::into_text).collect(),
        TagField::Delimited(s) => s.into_text().split(',').map(str::to_string).collect(),
    };

    raw.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts RFC 3339, YAML timestamps with a space before the offset
/// (`2024-03-15 10:30:00 +02:00`), `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds (as UTC), and
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%d %H:%M:%S%.f %:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f %z",
        "%Y-%m-%d %H:%M:%S%.f%z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("unrecognized date '{text}'"))
}
