use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::cli::Config;
use crate::error::{RequestError, Result};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A validated request, ready to hand to the client.
#[derive(Debug)]
pub struct RequestPlan {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestPlan {
    pub fn from_config(config: &Config) -> Result<Self> {
        let method = Method::from_bytes(config.method.as_bytes())
            .map_err(|err| RequestError::InvalidMethod(format!("`{}`: {err}", config.method)))?;

        let url = resolve_url(&config.base_url, &config.path)?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(RequestError::UnsupportedScheme(format!("{other}:"))),
        }

        let headers = build_headers(&config.headers, config.body.as_deref())?;

        Ok(Self {
            method,
            url,
            headers,
            body: config.body.clone(),
        })
    }
}

/// Resolve `path` against `base_url`. An absolute `path` wins outright.
pub fn resolve_url(base_url: &str, path: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(path) {
        return Ok(url);
    }

    let base = Url::parse(base_url)
        .map_err(|err| RequestError::InvalidUrl(format!("`{base_url}`: {err}")))?;
    base.join(path)
        .map_err(|err| RequestError::InvalidUrl(format!("`{path}`: {err}")))
}

/// Overlay the configured headers on the JSON content type, then add the
/// body length when there is a body.
///
/// Every header is inserted, so a configured name replaces the default or an
/// earlier value whatever its case.
pub fn build_headers(configured: &[(String, String)], body: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    for (key, value) in configured {
        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|err| RequestError::InvalidHeader(format!("name `{key}`: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| RequestError::InvalidHeader(format!("value for `{key}`: {err}")))?;
        headers.insert(header_name, header_value);
    }

    if let Some(body) = body {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    }

    Ok(headers)
}
