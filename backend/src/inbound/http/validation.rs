//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EntityId, EntityName, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyList,
    BlankName,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyList => "empty_list",
            ErrorCode::BlankName => "blank_name",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn empty_list_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain at least one entry"))
        .with_code(ErrorCode::EmptyList)
}

pub(crate) fn blank_name_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be blank"))
        .with_code(ErrorCode::BlankName)
}

pub(crate) fn blank_name_index_error(field: FieldName, index: usize) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not contain blank names"))
        .with_index(ErrorCode::BlankName, index)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_entity_id(value: &str, field: FieldName) -> Result<EntityId, Error> {
    value
        .parse::<EntityId>()
        .map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_name(value: String, field: FieldName) -> Result<EntityName, Error> {
    EntityName::new(value).map_err(|_| blank_name_error(field))
}

/// Validate a required, non-empty list of names.
pub(crate) fn parse_name_list(
    values: Option<Vec<String>>,
    field: FieldName,
) -> Result<Vec<EntityName>, Error> {
    let values = values.ok_or_else(|| missing_field_error(field))?;
    if values.is_empty() {
        return Err(empty_list_error(field));
    }
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            EntityName::new(value).map_err(|_| blank_name_index_error(field, index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NAMES: FieldName = FieldName::new("names");

    #[rstest]
    fn missing_list_reports_field() {
        let err = parse_name_list(None, NAMES).expect_err("missing");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "names");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    fn empty_list_is_rejected() {
        let err = parse_name_list(Some(Vec::new()), NAMES).expect_err("empty");
        assert_eq!(err.details().expect("details")["code"], "empty_list");
    }

    #[rstest]
    fn blank_entries_report_their_index() {
        let err = parse_name_list(Some(vec!["Rust".into(), "  ".into()]), NAMES)
            .expect_err("blank entry");
        let details = err.details().expect("details");
        assert_eq!(details["index"], 1);
        assert_eq!(details["code"], "blank_name");
    }

    #[rstest]
    fn valid_lists_keep_order() {
        let names = parse_name_list(Some(vec!["b".into(), "a".into()]), NAMES).expect("valid");
        let raw: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        assert_eq!(raw, vec!["b", "a"]);
    }

    #[rstest]
    fn invalid_ids_echo_the_value() {
        let err = parse_entity_id("abc", FieldName::new("id")).expect_err("invalid");
        let details = err.details().expect("details");
        assert_eq!(details["value"], "abc");
        assert_eq!(details["code"], "invalid_uuid");
    }
}
