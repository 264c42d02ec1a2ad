//! Purpose: Public parse entry points over forms, queries, and entries.
//! Exports: `parse_form`, `parse_query`, `parse_entries` (and `_value` forms), `ParseOptions`.
//! Role: Stable boundary implementing source -> object -> schema -> outcome.
//! Invariants: Every failure collapses into the options' message and status.
//! Invariants: The collapsed cause is emitted as a debug event before it is dropped.

use super::reject::Rejection;
use super::source::{FormSource, QuerySource};
use crate::core::entries::RawEntries;
use crate::core::error::{Error, ErrorKind};
use crate::core::object::ParsedObject;
use crate::core::schema::Schema;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Upper bound on request body reads unless overridden per call.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Replacement for the built-in entries-to-object step.
pub type EntriesParser = fn(&RawEntries) -> ParsedObject;

/// Per-call knobs for the parse entry points.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    message: Option<String>,
    status: Option<StatusCode>,
    body_limit: usize,
    parser: Option<EntriesParser>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            message: None,
            status: None,
            body_limit: DEFAULT_BODY_LIMIT,
            parser: None,
        }
    }

    /// Message carried by the rejection when parsing fails.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Status code carried by the rejection when parsing fails.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Substitute the entries-to-object step, keeping validation unchanged.
    pub fn with_parser(mut self, parser: EntriesParser) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a form submission into a deserializable type.
///
/// Accepts a request with an urlencoded body, a raw payload, or pre-built
/// entries. Any failure (media type, body read, validation, or type
/// conversion) returns the generic [`Rejection`] configured in `options`.
pub async fn parse_form<T: DeserializeOwned>(
    source: impl Into<FormSource>,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<T, Rejection> {
    let schema = schema.into();
    let outcome = resolve_form(source.into(), &schema, &options)
        .await
        .and_then(into_typed);
    collapse(outcome, &options)
}

/// Like [`parse_form`], returning the validated JSON object.
pub async fn parse_form_value(
    source: impl Into<FormSource>,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<Value, Rejection> {
    let schema = schema.into();
    let outcome = resolve_form(source.into(), &schema, &options).await;
    collapse(outcome, &options)
}

/// Parse and validate a query string into a deserializable type.
pub fn parse_query<T: DeserializeOwned>(
    source: impl Into<QuerySource>,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<T, Rejection> {
    let schema = schema.into();
    let outcome = validate_entries(source.into().into_entries(), &schema, &options)
        .and_then(into_typed);
    collapse(outcome, &options)
}

/// Like [`parse_query`], returning the validated JSON object.
pub fn parse_query_value(
    source: impl Into<QuerySource>,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<Value, Rejection> {
    let schema = schema.into();
    let outcome = validate_entries(source.into().into_entries(), &schema, &options);
    collapse(outcome, &options)
}

/// Parse and validate entries the caller already holds.
pub fn parse_entries<T: DeserializeOwned>(
    entries: RawEntries,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<T, Rejection> {
    let schema = schema.into();
    let outcome = validate_entries(entries, &schema, &options).and_then(into_typed);
    collapse(outcome, &options)
}

/// Like [`parse_entries`], returning the validated JSON object.
pub fn parse_entries_value(
    entries: RawEntries,
    schema: impl Into<Schema>,
    options: ParseOptions,
) -> Result<Value, Rejection> {
    let schema = schema.into();
    let outcome = validate_entries(entries, &schema, &options);
    collapse(outcome, &options)
}

async fn resolve_form(
    source: FormSource,
    schema: &Schema,
    options: &ParseOptions,
) -> Result<Value, Error> {
    let entries = source.read_entries(options.body_limit()).await?;
    validate_entries(entries, schema, options)
}

fn validate_entries(
    entries: RawEntries,
    schema: &Schema,
    options: &ParseOptions,
) -> Result<Value, Error> {
    let object = match options.parser {
        Some(parser) => parser(&entries),
        None => ParsedObject::from_entries(&entries),
    };
    let fields = schema.validate(&object).map_err(|issues| {
        let detail = issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect::<Vec<_>>()
            .join("; ");
        Error::new(ErrorKind::Validation).with_message(detail)
    })?;
    Ok(Value::Object(fields))
}

fn into_typed<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("validated object did not match the requested type")
            .with_source(err)
    })
}

// The collapse point: the real cause is logged, the caller gets the
// configured generic outcome.
fn collapse<T>(outcome: Result<T, Error>, options: &ParseOptions) -> Result<T, Rejection> {
    outcome.map_err(|err| {
        tracing::debug!(kind = ?err.kind(), cause = %err, "form parsing failed");
        Rejection::from_options(options)
    })
}

#[cfg(test)]
mod tests {
    use super::{ParseOptions, parse_entries_value, parse_query_value};
    use crate::core::entries::RawEntries;
    use crate::core::object::ParsedObject;
    use crate::core::schema::{FieldRule, Schema};
    use serde_json::json;

    fn contact_schema() -> Schema {
        Schema::new()
            .field("name", FieldRule::string())
            .field("email", FieldRule::email())
    }

    #[test]
    fn query_and_entries_paths_agree() {
        let from_query = parse_query_value(
            "name=A&email=a%40example.com",
            contact_schema(),
            ParseOptions::new(),
        )
        .expect("query");
        let from_entries = parse_entries_value(
            RawEntries::from_pairs([("name", "A"), ("email", "a@example.com")]),
            contact_schema(),
            ParseOptions::new(),
        )
        .expect("entries");
        assert_eq!(from_query, from_entries);
        assert_eq!(from_query, json!({"name": "A", "email": "a@example.com"}));
    }

    #[test]
    fn custom_parser_replaces_coalescing_step() {
        fn last_wins(entries: &RawEntries) -> ParsedObject {
            let mut object = ParsedObject::new();
            for (key, value) in entries.iter() {
                if object.get(key).is_none() {
                    let last = entries
                        .iter()
                        .filter(|(name, _)| *name == key)
                        .map(|(_, candidate)| candidate)
                        .last()
                        .unwrap_or(value);
                    object.insert(key, last);
                }
            }
            object
        }

        let schema = Schema::new().field("name", FieldRule::string());
        let value = parse_query_value(
            "name=first&name=last",
            schema,
            ParseOptions::new().with_parser(last_wins),
        )
        .expect("custom parser avoids the coalesced list");
        assert_eq!(value, json!({"name": "last"}));
    }

    #[test]
    fn options_shape_the_rejection() {
        let rejection = parse_query_value(
            "name=A",
            contact_schema(),
            ParseOptions::new()
                .with_message("Invalid")
                .with_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY),
        )
        .expect_err("missing email");
        assert_eq!(rejection.message(), "Invalid");
        assert_eq!(rejection.status().as_u16(), 422);
    }
}
