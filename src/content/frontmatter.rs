//! Front-matter parsing

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::helpers::date::parse_date_string;

/// Errors from splitting a document into front-matter and body
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// An opening `---` line with no closing delimiter
    #[error("unterminated front-matter block")]
    Unterminated,

    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Custom deserializer that accepts any YAML scalar where a string is
/// expected, so `date: 2024` and `date: "2024"` read the same way
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Front-matter data from a post document
///
/// The keys consumers rely on are typed; everything else is kept verbatim
/// in `extra`, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a document into front-matter and body.
    ///
    /// A document may begin with a YAML block delimited by `---` lines.
    /// The body is everything after the closing delimiter line, verbatim.
    /// A document without a leading `---` parses to a default front-matter
    /// with the full text as body; an opening delimiter that is never
    /// closed is an error.
    pub fn parse(document: &str) -> Result<(Self, &str), FrontMatterError> {
        let Some(rest) = strip_opening_delimiter(document) else {
            return Ok((Self::default(), document));
        };

        let Some((block, body)) = split_at_closing_delimiter(rest) else {
            return Err(FrontMatterError::Unterminated);
        };

        if block.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(block)?;
        Ok((fm, body))
    }

    /// Parse the `date` field, if present and recognizable
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Strip a leading `---` delimiter line, returning the text after it
fn strip_opening_delimiter(document: &str) -> Option<&str> {
    let rest = document.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Find the closing `---` line; returns (yaml block, body after the line)
fn split_at_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
