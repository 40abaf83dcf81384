//! Comet Mastery - AI prompt generator for real estate professionals
//!
//! Pick a use case from the catalog, fill in its form, and get a ready-to-paste
//! prompt for an agentic browser or chat assistant.
//!
//! # Modules
//!
//! - [`catalog`] - Use-case definitions, builtin catalog, loading and validation
//! - [`form`] - Normalizing and validating raw form input
//! - [`session`] - Interactive, line-edited form filling
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! Rendering itself lives in the `prompttemplate` crate.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod form;
pub mod session;

pub use catalog::{Catalog, CatalogIssue, FieldDescriptor, FieldKind, UseCase};
pub use config::{CatalogConfig, Config, OutputConfig};
pub use form::{FormError, SELECT_PROMPT, collect, normalize_field};
pub use prompttemplate::FormValues;
pub use session::{FormSession, LineReader, SessionOutcome};

/// Shown after a rendered prompt
pub const NEXT_STEPS: &str = "Next steps: copy this prompt and paste it into your agentic browser \
(Comet, ChatGPT, Claude) to get customized assistance for your situation.";
