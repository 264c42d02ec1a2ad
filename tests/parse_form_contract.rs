//! Purpose: Lock the form-parse contract end to end across all source shapes.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch drift between request, payload, entries, and query paths.
//! Invariants: Failure outcomes stay generic; no field detail leaks to callers.
//! Invariants: Duplicate keys coalesce in submission order on every path.

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use formic::api::{
    FieldRule, ParseOptions, RawEntries, Schema, parse_entries_value, parse_form,
    parse_form_value, parse_query, parse_query_value,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, Eq, PartialEq)]
struct Contact {
    name: String,
    email: String,
}

fn contact_schema() -> Schema {
    Schema::new()
        .field("name", FieldRule::string())
        .field("email", FieldRule::email())
}

fn form_request(body: &str) -> Request {
    axum::http::Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn valid_submission_parses_into_typed_contact() {
    let contact: Contact = parse_form(
        form_request("name=A&email=a%40example.com"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect("valid submission");
    assert_eq!(
        contact,
        Contact {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
        }
    );
}

#[tokio::test]
async fn missing_required_field_rejects_with_defaults() {
    let rejection = parse_form_value(
        form_request("name=A"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("email missing");
    assert_eq!(rejection.message(), "Bad Request");
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_rejects_with_the_same_generic_outcome() {
    let missing = parse_form_value(
        form_request("name=A"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("email missing");
    let malformed = parse_form_value(
        form_request("name=A&email=not-an-email"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("email malformed");
    assert_eq!(missing, malformed);
}

#[tokio::test]
async fn options_configure_message_and_status() {
    let rejection = parse_form_value(
        form_request("email=not-an-email"),
        contact_schema(),
        ParseOptions::new()
            .with_message("Invalid")
            .with_status(StatusCode::UNPROCESSABLE_ENTITY),
    )
    .await
    .expect_err("invalid submission");
    assert_eq!(rejection.message(), "Invalid");
    assert_eq!(rejection.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_keys_coalesce_in_submission_order() {
    let schema = Schema::new()
        .field("name", FieldRule::string())
        .field("tag", FieldRule::string().repeated());
    let value = parse_form_value(
        form_request("tag=one&name=A&tag=two&tag=three"),
        schema,
        ParseOptions::new(),
    )
    .await
    .expect("repeated field");
    assert_eq!(value, json!({"name": "A", "tag": ["one", "two", "three"]}));
}

#[tokio::test]
async fn unexpected_duplicate_of_a_scalar_field_rejects() {
    let rejection = parse_form_value(
        form_request("name=A&name=B&email=a%40example.com"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("name submitted twice");
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_payload_and_entries_sources_agree() {
    let body = "name=A&email=a%40example.com";
    let from_request = parse_form_value(form_request(body), contact_schema(), ParseOptions::new())
        .await
        .expect("request source");
    let from_payload = parse_form_value(body, contact_schema(), ParseOptions::new())
        .await
        .expect("payload source");
    let from_entries = parse_entries_value(
        RawEntries::from_pairs([("name", "A"), ("email", "a@example.com")]),
        contact_schema(),
        ParseOptions::new(),
    )
    .expect("entries source");
    assert_eq!(from_request, from_payload);
    assert_eq!(from_payload, from_entries);
}

#[tokio::test]
async fn wrong_content_type_rejects_generically() {
    let request: Request = axum::http::Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"A"}"#))
        .expect("request");
    let rejection = parse_form_value(request, contact_schema(), ParseOptions::new())
        .await
        .expect_err("json body");
    assert_eq!(rejection.message(), "Bad Request");
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_rejects_generically() {
    let rejection = parse_form_value(
        form_request("name=A&email=a%40example.com"),
        contact_schema(),
        ParseOptions::new().with_body_limit(4),
    )
    .await
    .expect_err("body over limit");
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn garbage_payload_rejects_like_a_missing_field() {
    let rejection = parse_form_value(
        form_request("this is not a form body"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("garbage input");
    assert_eq!(rejection.message(), "Bad Request");
}

#[tokio::test]
async fn type_mismatch_rejects_generically() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Numeric {
        name: u32,
        email: String,
    }

    let rejection = parse_form::<Numeric>(
        form_request("name=A&email=a%40example.com"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect_err("name is not numeric");
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_fields_are_stripped_from_the_output() {
    let value = parse_form_value(
        form_request("name=A&email=a%40example.com&hidden=1"),
        contact_schema(),
        ParseOptions::new(),
    )
    .await
    .expect("valid submission");
    assert_eq!(value, json!({"name": "A", "email": "a@example.com"}));
}

#[test]
fn query_string_parses_like_a_form_body() {
    let contact: Contact = parse_query(
        "name=A&email=a%40example.com",
        contact_schema(),
        ParseOptions::new(),
    )
    .expect("query source");
    assert_eq!(contact.name, "A");
    assert_eq!(contact.email, "a@example.com");
}

#[test]
fn field_list_schema_parses_like_the_composite_form() {
    let query = "name=A&email=a%40example.com";
    let from_list = parse_query_value(
        query,
        vec![("name", FieldRule::string()), ("email", FieldRule::email())],
        ParseOptions::new(),
    )
    .expect("field list");
    let from_composite =
        parse_query_value(query, contact_schema(), ParseOptions::new()).expect("composite");
    assert_eq!(from_list, from_composite);
}
