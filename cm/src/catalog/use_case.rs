//! Use-case and field descriptor types

use prompttemplate::{FormValues, TemplateScan};
use serde::{Deserialize, Serialize};

/// Input widget kind for a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single-line text
    #[default]
    #[serde(rename = "text", alias = "short-text")]
    ShortText,
    /// Multi-line text
    #[serde(rename = "textarea", alias = "long-text")]
    LongText,
    /// One choice out of `options`
    #[serde(rename = "select", alias = "single-select")]
    SingleSelect,
    /// Numeric entry
    #[serde(rename = "number")]
    Number,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortText => "text",
            Self::LongText => "textarea",
            Self::SingleSelect => "select",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "short-text" => Ok(Self::ShortText),
            "textarea" | "long-text" => Ok(Self::LongText),
            "select" | "single-select" => Ok(Self::SingleSelect),
            "number" => Ok(Self::Number),
            _ => Err(format!("Unknown field kind: {}", s)),
        }
    }
}

/// One form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Placeholder key, unique within the use case
    pub id: String,

    pub label: String,

    #[serde(default)]
    pub kind: FieldKind,

    /// Choices for select fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Example text shown while the field is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            placeholder: None,
            required: false,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named scenario: an ordered form plus the prompt template it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Short display glyph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Prompt template with `{{id}}` and `{{#if id}}...{{/if}}` markup
    pub template: String,
}

impl UseCase {
    pub fn new(id: impl Into<String>, title: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            icon: None,
            fields: Vec::new(),
            template: template.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by id; with duplicate ids the later declaration wins
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().rev().find(|f| f.id == id)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Fill this use case's template
    pub fn render(&self, values: &FormValues) -> String {
        prompttemplate::render(&self.template, values)
    }

    pub fn scan(&self) -> TemplateScan {
        prompttemplate::scan(&self.template)
    }
}
