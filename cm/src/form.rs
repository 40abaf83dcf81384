//! Form collection
//!
//! Turns raw user input into the values handed to the renderer: trims it,
//! maps untouched example text and the select prompt to empty, canonicalizes
//! select choices, checks numbers, and enforces required fields.

use std::collections::BTreeMap;

use eyre::{Result, eyre};
use prompttemplate::FormValues;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{FieldDescriptor, FieldKind, UseCase};

/// Prompt text shown by an unset select; never a real value
pub const SELECT_PROMPT: &str = "Select...";

/// Errors that stop a form from being rendered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in: {label}")]
    MissingRequired { field: String, label: String },

    #[error("Unknown field '{field}' for use case {use_case}")]
    UnknownField { use_case: String, field: String },

    #[error("{label}: '{value}' is not one of: {}", .options.join(", "))]
    InvalidOption {
        field: String,
        label: String,
        value: String,
        options: Vec<String>,
    },

    #[error("{label}: '{value}' is not a number")]
    InvalidNumber { field: String, label: String, value: String },
}

impl FormError {
    /// Id of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field, .. }
            | Self::UnknownField { field, .. }
            | Self::InvalidOption { field, .. }
            | Self::InvalidNumber { field, .. } => field,
        }
    }
}

/// Normalize one raw answer for a field
///
/// Returns the empty string for "no answer". Does not check `required`.
pub fn normalize_field(field: &FieldDescriptor, raw: &str) -> Result<String, FormError> {
    let value = raw.trim();

    // Untouched example text is no answer, for every kind
    if !value.is_empty() && field.placeholder.as_deref().is_some_and(|p| p.trim() == value) {
        debug!(field = %field.id, "normalize_field: value equals placeholder");
        return Ok(String::new());
    }

    match field.kind {
        FieldKind::SingleSelect => normalize_select(field, value),
        FieldKind::ShortText | FieldKind::LongText => Ok(value.to_string()),
        FieldKind::Number => {
            if value.is_empty() || value.parse::<f64>().is_ok_and(f64::is_finite) {
                Ok(value.to_string())
            } else {
                Err(FormError::InvalidNumber {
                    field: field.id.clone(),
                    label: field.label.clone(),
                    value: value.to_string(),
                })
            }
        }
    }
}

/// Accepts an option (any case) or its 1-based position; the prompt text is
/// no answer
fn normalize_select(field: &FieldDescriptor, value: &str) -> Result<String, FormError> {
    if value.is_empty() || value == SELECT_PROMPT {
        return Ok(String::new());
    }

    // A select without options is an authoring defect; take the text as-is
    if field.options.is_empty() {
        return Ok(value.to_string());
    }

    if let Some(option) = field.options.iter().find(|o| o.eq_ignore_ascii_case(value)) {
        return Ok(option.clone());
    }

    if let Ok(index) = value.parse::<usize>()
        && let Some(option) = index.checked_sub(1).and_then(|i| field.options.get(i))
    {
        return Ok(option.clone());
    }

    Err(FormError::InvalidOption {
        field: field.id.clone(),
        label: field.label.clone(),
        value: value.to_string(),
        options: field.options.clone(),
    })
}

/// Build the render values for a use case from raw input
///
/// Every declared field gets an entry, empty when unanswered. Fields are
/// checked in declaration order and the first problem is returned.
pub fn collect(use_case: &UseCase, raw: &FormValues) -> Result<FormValues, FormError> {
    debug!(use_case = %use_case.id, raw_count = raw.len(), "collect: called");

    if let Some((id, _)) = raw.iter().find(|(id, _)| use_case.field(id).is_none()) {
        return Err(FormError::UnknownField {
            use_case: use_case.id.clone(),
            field: id.clone(),
        });
    }

    let mut values = FormValues::new();
    for field in &use_case.fields {
        let value = normalize_field(field, raw.get(&field.id).unwrap_or(""))?;
        if field.required && value.is_empty() {
            return Err(FormError::MissingRequired {
                field: field.id.clone(),
                label: field.label.clone(),
            });
        }
        values.insert(field.id.clone(), value);
    }

    debug!(use_case = %use_case.id, "collect: complete");
    Ok(values)
}

/// Parse a YAML (or JSON) mapping of field id to value
///
/// Numbers and booleans are taken as their text, null as empty. Nested
/// values are rejected.
pub fn parse_values(content: &str) -> Result<FormValues> {
    let map: BTreeMap<String, Value> = serde_yaml::from_str(content)?;
    map.into_iter()
        .map(|(id, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                _ => return Err(eyre!("Value for field '{}' must be text, a number, or a boolean", id)),
            };
            Ok((id, text))
        })
        .collect()
}
