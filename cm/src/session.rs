//! Interactive form session
//!
//! Asks for one field at a time, validating each answer as it is entered.
//! Input comes from a [`LineReader`] so the session can run over rustyline in
//! the terminal or over scripted lines in tests.

use std::collections::VecDeque;
use std::io::Write;

use colored::Colorize;
use eyre::{Result, eyre};
use prompttemplate::FormValues;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::catalog::{Catalog, FieldDescriptor, FieldKind, UseCase};
use crate::form::{self, FormError};

/// Source of input lines
pub trait LineReader {
    /// Read one line, or `None` when the user ends input (Ctrl+D / Ctrl+C)
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal line editing with history
pub struct RustylineReader {
    editor: DefaultEditor,
}

impl RustylineReader {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(eyre!("Readline error: {}", err)),
        }
    }
}

/// Pre-recorded input, for tests and piped use
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(FormValues),
    Aborted,
}

/// One interactive pass over a use case's form
pub struct FormSession<R: LineReader, W: Write> {
    reader: R,
    out: W,
}

impl<R: LineReader, W: Write> FormSession<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.out)
    }

    /// Let the user choose a use case by number or id
    pub fn pick_use_case<'c>(&mut self, catalog: &'c Catalog) -> Result<Option<&'c UseCase>> {
        writeln!(self.out, "{}", "Choose a use case:".bright_cyan().bold())?;
        for (i, uc) in catalog.iter().enumerate() {
            let icon = uc.icon.as_deref().unwrap_or(" ");
            writeln!(self.out, "  {:>2}. {} {}  {}", i + 1, icon, uc.title.bold(), uc.description.dimmed())?;
        }

        loop {
            let Some(line) = self.reader.read_line("use case> ")? else {
                return Ok(None);
            };
            let answer = line.trim();
            if answer.is_empty() {
                continue;
            }

            let by_index = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| catalog.use_cases().get(i));
            if let Some(uc) = by_index.or_else(|| catalog.get(answer)) {
                debug!(id = %uc.id, "pick_use_case: selected");
                return Ok(Some(uc));
            }

            writeln!(self.out, "{} No use case '{}'", "✗".red(), answer)?;
        }
    }

    /// Ask every field in order and return the validated values
    pub fn fill(&mut self, use_case: &UseCase) -> Result<SessionOutcome> {
        debug!(use_case = %use_case.id, "fill: called");
        self.print_header(use_case)?;

        let mut raw = FormValues::new();
        for field in &use_case.fields {
            match self.ask_field(field)? {
                Some(value) => {
                    raw.insert(field.id.clone(), value);
                }
                None => {
                    debug!(use_case = %use_case.id, field = %field.id, "fill: aborted");
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", "Cancelled".yellow())?;
                    return Ok(SessionOutcome::Aborted);
                }
            }
        }

        // Answers are already normalized; this fills in the final value set
        let values = form::collect(use_case, &raw)?;
        debug!(use_case = %use_case.id, "fill: complete");
        Ok(SessionOutcome::Completed(values))
    }

    fn print_header(&mut self, use_case: &UseCase) -> Result<()> {
        writeln!(self.out)?;
        match &use_case.icon {
            Some(icon) => writeln!(self.out, "{} {}", icon, use_case.title.bright_cyan().bold())?,
            None => writeln!(self.out, "{}", use_case.title.bright_cyan().bold())?,
        }
        if !use_case.description.is_empty() {
            writeln!(self.out, "{}", use_case.description)?;
        }
        writeln!(self.out, "{}", "Fields marked * are required. End a line with \\ to continue it.".dimmed())?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Ask until the answer is valid; `None` if the user ends input
    fn ask_field(&mut self, field: &FieldDescriptor) -> Result<Option<String>> {
        let marker = if field.required { "*".red().to_string() } else { String::new() };
        writeln!(self.out, "{}{}", field.label.bold(), marker)?;
        self.print_hint(field)?;

        loop {
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };

            match form::normalize_field(field, &answer) {
                Ok(value) if field.required && value.is_empty() => {
                    let err = FormError::MissingRequired {
                        field: field.id.clone(),
                        label: field.label.clone(),
                    };
                    writeln!(self.out, "{} {}", "✗".red(), err)?;
                }
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.out, "{} {}", "✗".red(), err)?,
            }
        }
    }

    fn print_hint(&mut self, field: &FieldDescriptor) -> Result<()> {
        match field.kind {
            FieldKind::SingleSelect => {
                for (i, option) in field.options.iter().enumerate() {
                    writeln!(self.out, "  {:>2}. {}", i + 1, option)?;
                }
            }
            FieldKind::ShortText | FieldKind::LongText | FieldKind::Number => {
                if let Some(example) = &field.placeholder {
                    writeln!(self.out, "  {}", example.dimmed())?;
                }
            }
        }
        Ok(())
    }

    /// One answer; a trailing backslash joins the next line
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut answer = String::new();
        let mut prompt = "> ";
        loop {
            let Some(line) = self.reader.read_line(prompt)? else {
                return Ok(None);
            };
            match line.strip_suffix('\\') {
                Some(head) => {
                    answer.push_str(head);
                    answer.push('\n');
                    prompt = ". ";
                }
                None => {
                    answer.push_str(&line);
                    return Ok(Some(answer));
                }
            }
        }
    }
}
