//! Static inspection of a template's references

use std::sync::LazyLock;

use regex::Regex;

use crate::render::{CONDITIONAL, PLACEHOLDER};

/// Any `{{#if ...}}` opener, well-formed or not
static OPENER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{#if[^{}]*\}\}").expect("opener pattern is valid"));

const CLOSER: &str = "{{/if}}";

/// What a template refers to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateScan {
    /// Distinct `{{name}}` placeholder names, in first-appearance order
    pub placeholders: Vec<String>,
    /// Distinct `{{#if name}}` guard names of well-formed blocks
    pub guards: Vec<String>,
    /// Openers not consumed by a well-formed block
    pub unmatched_opens: usize,
    /// `{{/if}}` markers not consumed by a well-formed block
    pub unmatched_closes: usize,
}

impl TemplateScan {
    /// Every distinct field name referenced, placeholders first
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.placeholders.iter().chain(self.guards.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }

    pub fn is_balanced(&self) -> bool {
        self.unmatched_opens == 0 && self.unmatched_closes == 0
    }
}

/// Collect the placeholder and guard names used by a template
pub fn scan(template: &str) -> TemplateScan {
    let mut result = TemplateScan::default();

    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if name.starts_with('#') || name.starts_with('/') {
            continue;
        }
        if !result.placeholders.iter().any(|p| p == name) {
            result.placeholders.push(name.to_string());
        }
    }

    let mut blocks = 0;
    for caps in CONDITIONAL.captures_iter(template) {
        blocks += 1;
        let guard = &caps[1];
        if !result.guards.iter().any(|g| g == guard) {
            result.guards.push(guard.to_string());
        }
    }

    result.unmatched_opens = OPENER.find_iter(template).count().saturating_sub(blocks);
    result.unmatched_closes = template.matches(CLOSER).count().saturating_sub(blocks);
    result
}
