//! PromptTemplate - fill prompt templates from form values
//!
//! Templates are plain text with two kinds of markup:
//!
//! ```text
//! {{fieldId}}                      placeholder, replaced by the field's value
//! {{#if fieldId}} ... {{/if}}      kept only when the field has a non-blank value
//! ```
//!
//! Rendering is total: unknown placeholders stay literal and malformed blocks
//! never match, so any string renders without error.
//!
//! # Example
//!
//! ```
//! use prompttemplate::{FormValues, render};
//!
//! let values: FormValues = [("name", "Sam"), ("note", "")].into_iter().collect();
//! let prompt = render("Hi {{name}}{{#if note}}, {{note}}{{/if}}!", &values);
//! assert_eq!(prompt, "Hi Sam!");
//! ```

mod render;
mod scan;
mod values;

pub use render::{render, resolve_conditionals, substitute_placeholders};
pub use scan::{TemplateScan, scan};
pub use values::FormValues;
