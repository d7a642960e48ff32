use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::Serialize;
use serde_json::Value;

/// Outcome of one completed HTTP exchange, whatever the status code.
#[derive(Debug, Serialize)]
pub struct HttpResult {
    pub status: u16,
    pub headers: BTreeMap<String, HeaderField>,
    pub body: ResponseBody,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    Single(String),
    /// `set-cookie` keeps each occurrence separate.
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parse as JSON when well-formed, keep the text otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).into_owned();
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }
}

/// Repeated headers are folded into one comma-separated value, except
/// `set-cookie` which becomes a list.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, HeaderField> {
    let mut fields = BTreeMap::new();

    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect();

        let field = if *name == SET_COOKIE {
            HeaderField::Multiple(values)
        } else {
            HeaderField::Single(values.join(", "))
        };
        fields.insert(name.as_str().to_string(), field);
    }

    fields
}

/// UTC, millisecond precision, `Z` suffix.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
