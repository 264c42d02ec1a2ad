//! Purpose: Funnel every accepted input shape into one entries stream.
//! Exports: `FormSource`, `QuerySource`.
//! Role: Boundary between routing-layer types and the core parse path.
//! Invariants: A raw source and pre-built entries are indistinguishable past this point.
//! Invariants: Request bodies are read once, bounded by the caller's byte limit.

use crate::core::entries::RawEntries;
use crate::core::error::{Error, ErrorKind};
use axum::extract::Request;
use axum::http::{Uri, header};
use bytes::Bytes;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Where form entries come from: a request with an urlencoded body, a raw
/// urlencoded payload, or entries the caller already built.
#[derive(Debug)]
pub enum FormSource {
    Request(Request),
    Payload(Bytes),
    Entries(RawEntries),
}

impl FormSource {
    /// Resolve the source to entries. Reading a request body is the only
    /// await point in the crate; the other variants resolve immediately.
    pub(crate) async fn read_entries(self, body_limit: usize) -> Result<RawEntries, Error> {
        match self {
            FormSource::Request(request) => {
                ensure_form_content_type(&request)?;
                let bytes = axum::body::to_bytes(request.into_body(), body_limit)
                    .await
                    .map_err(|err| {
                        Error::new(ErrorKind::Body)
                            .with_message("failed to read request body")
                            .with_source(err)
                    })?;
                Ok(RawEntries::from_bytes(&bytes))
            }
            FormSource::Payload(bytes) => Ok(RawEntries::from_bytes(&bytes)),
            FormSource::Entries(entries) => Ok(entries),
        }
    }
}

fn ensure_form_content_type(request: &Request) -> Result<(), Error> {
    let header_value = request
        .headers()
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| Error::new(ErrorKind::MediaType).with_message("missing content-type"))?;
    let content_type = header_value.to_str().map_err(|_| {
        Error::new(ErrorKind::MediaType).with_message("content-type is not valid ascii")
    })?;
    // Parameters after `;` (charset) are irrelevant to the media type.
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    if media_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::MediaType)
            .with_message(format!("expected {FORM_CONTENT_TYPE}, got {media_type}")))
    }
}

impl From<Request> for FormSource {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

impl From<Bytes> for FormSource {
    fn from(bytes: Bytes) -> Self {
        Self::Payload(bytes)
    }
}

impl From<&str> for FormSource {
    fn from(payload: &str) -> Self {
        Self::Payload(Bytes::copy_from_slice(payload.as_bytes()))
    }
}

impl From<String> for FormSource {
    fn from(payload: String) -> Self {
        Self::Payload(Bytes::from(payload))
    }
}

impl From<RawEntries> for FormSource {
    fn from(entries: RawEntries) -> Self {
        Self::Entries(entries)
    }
}

impl From<Vec<(String, String)>> for FormSource {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Entries(RawEntries::from_pairs(pairs))
    }
}

impl From<&[(&str, &str)]> for FormSource {
    fn from(pairs: &[(&str, &str)]) -> Self {
        Self::Entries(RawEntries::from_pairs(pairs.iter().copied()))
    }
}

/// Where query entries come from: the query component of a request or URI,
/// a raw query string, or pre-built entries.
#[derive(Clone, Debug)]
pub enum QuerySource {
    Query(String),
    Entries(RawEntries),
}

impl QuerySource {
    pub(crate) fn into_entries(self) -> RawEntries {
        match self {
            QuerySource::Query(query) => RawEntries::from_urlencoded(&query),
            QuerySource::Entries(entries) => entries,
        }
    }
}

impl From<&Request> for QuerySource {
    fn from(request: &Request) -> Self {
        Self::from(request.uri())
    }
}

impl From<&Uri> for QuerySource {
    fn from(uri: &Uri) -> Self {
        Self::Query(uri.query().unwrap_or("").to_string())
    }
}

impl From<&str> for QuerySource {
    fn from(query: &str) -> Self {
        Self::Query(query.to_string())
    }
}

impl From<String> for QuerySource {
    fn from(query: String) -> Self {
        Self::Query(query)
    }
}

impl From<RawEntries> for QuerySource {
    fn from(entries: RawEntries) -> Self {
        Self::Entries(entries)
    }
}
