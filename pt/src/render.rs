//! Two-pass template rendering
//!
//! Pass 1 replaces `{{id}}` tokens whose id is present in the values. Pass 2
//! resolves `{{#if id}}...{{/if}}` blocks against the same values. The result
//! is trimmed.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::values::FormValues;

/// `{{name}}` with no braces inside the name. Block markers like `{{#if x}}`
/// and `{{/if}}` also match, but never name a field, so they stay literal.
pub(crate) static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid"));

/// Non-nested conditional block; the body may span lines and ends at the
/// first `{{/if}}`.
pub(crate) static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{#if\s+(\w+)\}\}(.*?)\{\{/if\}\}").expect("conditional pattern is valid"));

/// Render a template against a set of values
///
/// Never fails: unknown placeholders are left as literal text and malformed
/// conditional blocks simply do not match.
pub fn render(template: &str, values: &FormValues) -> String {
    debug!(template_len = template.len(), value_count = values.len(), "render: called");
    let substituted = substitute_placeholders(template, values);
    let resolved = resolve_conditionals(&substituted, values);
    let rendered = resolved.trim().to_string();
    debug!(rendered_len = rendered.len(), "render: complete");
    rendered
}

/// Replace every `{{id}}` whose id has an entry in `values`
///
/// Blank values substitute as the empty string. Ids without an entry are left
/// untouched. The template is scanned once, so substituted text is never
/// expanded again.
pub fn substitute_placeholders(template: &str, values: &FormValues) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) if value.trim().is_empty() => String::new(),
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Keep or drop each `{{#if id}}...{{/if}}` block
///
/// A block is kept (markers removed, body verbatim) when `values[id]` is
/// present and not blank; otherwise the whole block is removed.
pub fn resolve_conditionals(text: &str, values: &FormValues) -> String {
    CONDITIONAL
        .replace_all(text, |caps: &Captures<'_>| {
            let guard = &caps[1];
            if values.is_filled(guard) {
                debug!(%guard, "resolve_conditionals: keeping block");
                caps[2].to_string()
            } else {
                debug!(%guard, "resolve_conditionals: dropping block");
                String::new()
            }
        })
        .into_owned()
}
