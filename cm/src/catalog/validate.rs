//! Authoring checks for catalog entries
//!
//! None of these stop a catalog from loading; the renderer tolerates all of
//! them. They exist so `cm check` can point at template typos.

use std::collections::HashSet;

use thiserror::Error;

use super::use_case::{FieldKind, UseCase};

/// A problem found in a catalog definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("Duplicate use case id: {id}")]
    DuplicateUseCase { id: String },

    #[error("Use case {use_case}: duplicate field id '{field}' (the later one wins)")]
    DuplicateField { use_case: String, field: String },

    #[error("Use case {use_case}: template references unknown field '{name}'")]
    UnknownReference { use_case: String, name: String },

    #[error("Use case {use_case}: {opens} unclosed #if and {closes} stray /if markers")]
    UnbalancedConditional {
        use_case: String,
        opens: usize,
        closes: usize,
    },

    #[error("Use case {use_case}: select field '{field}' has no options")]
    SelectWithoutOptions { use_case: String, field: String },

    #[error("Use case {use_case}: field '{field}' lists options but is not a select")]
    OptionsOnNonSelect { use_case: String, field: String },
}

impl CatalogIssue {
    /// Id of the use case the issue belongs to
    pub fn use_case(&self) -> &str {
        match self {
            Self::DuplicateUseCase { id } => id,
            Self::DuplicateField { use_case, .. }
            | Self::UnknownReference { use_case, .. }
            | Self::UnbalancedConditional { use_case, .. }
            | Self::SelectWithoutOptions { use_case, .. }
            | Self::OptionsOnNonSelect { use_case, .. } => use_case,
        }
    }
}

/// Check every use case, in catalog order
pub fn validate<'a>(use_cases: impl IntoIterator<Item = &'a UseCase>) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();

    for uc in use_cases {
        if !seen_ids.insert(uc.id.as_str()) {
            issues.push(CatalogIssue::DuplicateUseCase { id: uc.id.clone() });
        }
        issues.extend(validate_use_case(uc));
    }

    issues
}

/// Check a single use case
pub fn validate_use_case(uc: &UseCase) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut field_ids = HashSet::new();

    for field in &uc.fields {
        if !field_ids.insert(field.id.as_str()) {
            issues.push(CatalogIssue::DuplicateField {
                use_case: uc.id.clone(),
                field: field.id.clone(),
            });
        }

        match (field.kind, field.options.is_empty()) {
            (FieldKind::SingleSelect, true) => issues.push(CatalogIssue::SelectWithoutOptions {
                use_case: uc.id.clone(),
                field: field.id.clone(),
            }),
            (FieldKind::SingleSelect, false) | (_, true) => {}
            (_, false) => issues.push(CatalogIssue::OptionsOnNonSelect {
                use_case: uc.id.clone(),
                field: field.id.clone(),
            }),
        }
    }

    let scan = uc.scan();
    for name in scan.referenced_names() {
        if !field_ids.contains(name) {
            issues.push(CatalogIssue::UnknownReference {
                use_case: uc.id.clone(),
                name: name.to_string(),
            });
        }
    }

    if !scan.is_balanced() {
        issues.push(CatalogIssue::UnbalancedConditional {
            use_case: uc.id.clone(),
            opens: scan.unmatched_opens,
            closes: scan.unmatched_closes,
        });
    }

    issues
}
