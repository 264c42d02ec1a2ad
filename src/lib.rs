//! Purpose: Shared library crate for form-data parsing and schema validation.
//! Exports: `api` (stable public surface), `core` (entries, objects, schemas, errors).
//! Role: Sits behind a routing layer; handlers return `api::Rejection` directly.
//! Invariants: Public failure outcomes carry only a message and a status code.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
