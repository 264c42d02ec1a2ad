//! Purpose: Declarative field constraints and the single validation path.
//! Exports: `FieldFormat`, `FieldRule`, `Issue`, `Schema`.
//! Role: Shared contract between the parse entry points and caller-built schemas.
//! Invariants: A per-field list and a composite schema validate identically.
//! Invariants: Validation collects every issue; it never stops at the first.
//! Invariants: Unknown input keys are stripped from the validated output.

use crate::core::object::{FieldValue, ParsedObject};
use email_address::EmailAddress;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldFormat {
    Text,
    Email,
}

/// Constraints for one declared field. Fields are required scalars by
/// default; modifiers opt into optional, repeated, trimmed, and bounded
/// variants.
#[derive(Clone, Debug)]
pub struct FieldRule {
    format: FieldFormat,
    required: bool,
    repeated: bool,
    trimmed: bool,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl FieldRule {
    pub fn string() -> Self {
        Self {
            format: FieldFormat::Text,
            required: true,
            repeated: false,
            trimmed: false,
            min_len: None,
            max_len: None,
        }
    }

    pub fn email() -> Self {
        Self {
            format: FieldFormat::Email,
            ..Self::string()
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accept a coalesced sequence; a lone value validates as a
    /// one-element sequence.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Trim surrounding whitespace before length and format checks.
    pub fn trimmed(mut self) -> Self {
        self.trimmed = true;
        self
    }

    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    fn check_value(&self, field: &str, raw: &str, issues: &mut Vec<Issue>) -> Option<String> {
        let value = if self.trimmed { raw.trim() } else { raw };
        let mut clean = true;
        if let Some(min) = self.min_len {
            if value.chars().count() < min {
                issues.push(Issue::new(
                    field,
                    "too_short",
                    format!("value shorter than {min} characters"),
                ));
                clean = false;
            }
        }
        if let Some(max) = self.max_len {
            if value.chars().count() > max {
                issues.push(Issue::new(
                    field,
                    "too_long",
                    format!("value longer than {max} characters"),
                ));
                clean = false;
            }
        }
        if self.format == FieldFormat::Email
            && EmailAddress::parse_with_options(value, Default::default()).is_err()
        {
            issues.push(Issue::new(field, "invalid_email", "not a valid email address"));
            clean = false;
        }
        clean.then(|| value.to_string())
    }
}

/// One validation finding. Issues stay internal to the crate boundary;
/// the public outcome collapses them into a generic rejection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Issue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Composite validator: declared fields in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a parsed object. Fields are checked in declaration order;
    /// on success the output contains exactly the declared fields that
    /// were present.
    pub fn validate(&self, object: &ParsedObject) -> Result<Map<String, Value>, Vec<Issue>> {
        let mut issues = Vec::new();
        let mut output = Map::new();

        for (name, rule) in &self.fields {
            match object.get(name) {
                None => {
                    if rule.required {
                        issues.push(Issue::new(
                            name,
                            "required",
                            format!("missing required field `{name}`"),
                        ));
                    }
                }
                Some(FieldValue::Single(value)) => {
                    if let Some(checked) = rule.check_value(name, value, &mut issues) {
                        let json = if rule.repeated {
                            Value::Array(vec![Value::String(checked)])
                        } else {
                            Value::String(checked)
                        };
                        output.insert(name.clone(), json);
                    }
                }
                Some(FieldValue::Many(values)) => {
                    if !rule.repeated {
                        issues.push(Issue::new(
                            name,
                            "unexpected_list",
                            format!("field `{name}` was submitted {} times", values.len()),
                        ));
                        continue;
                    }
                    let mut checked = Vec::with_capacity(values.len());
                    for value in values {
                        if let Some(value) = rule.check_value(name, value, &mut issues) {
                            checked.push(Value::String(value));
                        }
                    }
                    if checked.len() == values.len() {
                        output.insert(name.clone(), Value::Array(checked));
                    }
                }
            }
        }

        if issues.is_empty() { Ok(output) } else { Err(issues) }
    }
}

impl<K: Into<String>> From<Vec<(K, FieldRule)>> for Schema {
    fn from(fields: Vec<(K, FieldRule)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, FieldRule); N]> for Schema {
    fn from(fields: [(K, FieldRule); N]) -> Self {
        Vec::from(fields).into()
    }
}
