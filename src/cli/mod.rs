//! # Command-line arguments
//!
//! Turns the raw token list into a [`Config`]. Tokens are consumed in
//! `--flag value` pairs; unknown flags are skipped together with their value,
//! so wrapper scripts can pass extra options without breaking the run.

use std::fmt::{self, Display};

use tracing::warn;

pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_PATH: &str = "/";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Deadline applied to the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Millis(u64),
    /// Produced by a `--timeout` value that is not a positive integer.
    Unbounded,
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::Millis(DEFAULT_TIMEOUT_MS)
    }
}

impl Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Millis(ms) => write!(f, "{ms}ms"),
            Timeout::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Request parameters resolved from flags and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
    /// In flag order, at most one entry per name ignoring ASCII case.
    pub headers: Vec<(String, String)>,
    pub base_url: String,
    pub timeout: Timeout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            path: DEFAULT_PATH.to_string(),
            body: None,
            headers: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Timeout::default(),
        }
    }
}

/// Parse the tokens that follow the program name.
///
/// Never fails: anything unusable falls back to the default for that field.
pub fn parse_args<I, S>(args: I) -> Config
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut config = Config::default();

    for pair in tokens.chunks(2) {
        // A trailing flag with nothing after it carries no value.
        let [flag, value] = pair else {
            continue;
        };

        match flag.as_str() {
            "--method" if !value.is_empty() => config.method = value.clone(),
            "--path" if !value.is_empty() => config.path = value.clone(),
            "--body" => {
                config.body = if value.is_empty() {
                    None
                } else {
                    Some(value.clone())
                };
            }
            "--header" => match parse_header(value) {
                Some((key, value)) => set_header(&mut config.headers, key, value),
                None => warn!("Ignoring malformed header `{value}`"),
            },
            "--base-url" => config.base_url = value.clone(),
            "--timeout" => config.timeout = parse_timeout(value),
            _ => {}
        }
    }

    config
}

/// Header names are case-insensitive: a later flag replaces any earlier one
/// with the same name.
fn set_header(headers: &mut Vec<(String, String)>, key: String, value: String) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&key));
    headers.push((key, value));
}

/// Split `Name: Value` on the first colon, trimming both halves.
fn parse_header(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Integer-prefix parse: `" 250ms"` reads as 250.
fn parse_timeout(raw: &str) -> Timeout {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return Timeout::Unbounded;
    }

    match digits.parse::<u64>() {
        Ok(0) | Err(_) => Timeout::Unbounded,
        Ok(ms) => Timeout::Millis(ms),
    }
}
