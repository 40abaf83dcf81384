//! Comet Mastery - prompt generator CLI
//!
//! Lists the use-case catalog, renders prompts from field values, and runs
//! interactive form sessions.

use std::fs;
use std::io;
use std::path::Path;

use clap::{CommandFactory, Parser};
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use cometmastery::cli::{Cli, Command, OutputFormat};
use cometmastery::config::Config;
use cometmastery::session::RustylineReader;
use cometmastery::{Catalog, FormSession, FormValues, NEXT_STEPS, SessionOutcome, UseCase, form};

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so stdout carries only the prompt
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let catalog = Catalog::load(&config.catalog).context("Failed to load use case catalog")?;
    info!(use_cases = catalog.len(), "cometmastery starting");

    // `check` prints its own report
    if !matches!(cli.command, Some(Command::Check)) {
        for issue in catalog.validate() {
            warn!(use_case = issue.use_case(), "Catalog issue: {}", issue);
        }
    }

    match cli.command {
        Some(Command::List { format }) => cmd_list(&catalog, format),
        Some(Command::Show { use_case, format }) => cmd_show(&catalog, &use_case, format),
        Some(Command::Render {
            use_case,
            set,
            values,
            output,
            format,
        }) => cmd_render(&config, &catalog, &use_case, set, values.as_deref(), output.as_deref(), format),
        Some(Command::Fill { use_case }) => cmd_fill(&config, &catalog, use_case.as_deref()),
        Some(Command::Check) => cmd_check(&catalog),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn find<'c>(catalog: &'c Catalog, id: &str) -> Result<&'c UseCase> {
    catalog
        .get(id)
        .ok_or_else(|| eyre!("Unknown use case: {} (available: {})", id, catalog.ids().join(", ")))
}

/// List the catalog
fn cmd_list(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = catalog
                .iter()
                .map(|uc| {
                    serde_json::json!({
                        "id": uc.id,
                        "title": uc.title,
                        "description": uc.description,
                        "icon": uc.icon,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            if catalog.is_empty() {
                println!("No use cases found");
                return Ok(());
            }
            for uc in catalog {
                let icon = uc.icon.as_deref().unwrap_or(" ");
                println!("{} {}  {}", icon, uc.id.cyan(), uc.title.bold());
                if !uc.description.is_empty() {
                    println!("     {}", uc.description.dimmed());
                }
            }
        }
    }
    Ok(())
}

/// Show one use case's form
fn cmd_show(catalog: &Catalog, id: &str, format: OutputFormat) -> Result<()> {
    let uc = find(catalog, id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(uc)?),
        OutputFormat::Text => {
            match &uc.icon {
                Some(icon) => println!("{} {}", icon, uc.title.bright_cyan().bold()),
                None => println!("{}", uc.title.bright_cyan().bold()),
            }
            if !uc.description.is_empty() {
                println!("{}", uc.description);
            }
            println!();
            println!("Fields:");
            for field in &uc.fields {
                let required = if field.required { "required".red().to_string() } else { "optional".dimmed().to_string() };
                println!("  {} ({}, {}) - {}", field.id.cyan(), field.kind, required, field.label);
                if !field.options.is_empty() {
                    println!("      options: {}", field.options.join(" | "));
                }
                if let Some(example) = &field.placeholder {
                    println!("      example: {}", example.dimmed());
                }
            }
        }
    }
    Ok(())
}

/// Collect values from a file and --set pairs, then render
fn cmd_render(
    config: &Config,
    catalog: &Catalog,
    id: &str,
    set: Vec<(String, String)>,
    values_path: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let uc = find(catalog, id)?;

    let mut raw = match values_path {
        Some(path) => load_values(path)?,
        None => FormValues::new(),
    };
    for (field, value) in set {
        raw.insert(field, value);
    }

    let values = form::collect(uc, &raw)?;
    let prompt = uc.render(&values);
    debug!(use_case = %uc.id, prompt_len = prompt.len(), "Rendered prompt");

    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "use_case": uc.id,
            "values": values,
            "prompt": prompt,
        }))?,
        OutputFormat::Text => prompt,
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", body))
                .with_context(|| format!("Failed to write prompt to {}", path.display()))?;
            eprintln!("{} Wrote prompt to {}", "✓".green(), path.display());
        }
        None => println!("{}", body),
    }

    if format == OutputFormat::Text && config.output.next_steps {
        eprintln!();
        eprintln!("{}", NEXT_STEPS.dimmed());
    }
    Ok(())
}

/// Read a YAML (or JSON) map of field id to value
fn load_values(path: &Path) -> Result<FormValues> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read values file {}", path.display()))?;
    let values =
        form::parse_values(&content).with_context(|| format!("Failed to parse values file {}", path.display()))?;
    debug!(?path, count = values.len(), "Loaded values file");
    Ok(values)
}

/// Interactive form session
fn cmd_fill(config: &Config, catalog: &Catalog, id: Option<&str>) -> Result<()> {
    let reader = RustylineReader::new()?;
    let mut session = FormSession::new(reader, io::stdout());

    let uc = match id {
        Some(id) => find(catalog, id)?,
        None => match session.pick_use_case(catalog)? {
            Some(uc) => uc,
            None => return Ok(()),
        },
    };

    let values = match session.fill(uc)? {
        SessionOutcome::Completed(values) => values,
        SessionOutcome::Aborted => return Ok(()),
    };

    println!();
    println!("{}", "Your Customized Prompt".bright_green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", uc.render(&values));
    println!("{}", "─".repeat(40).dimmed());
    if config.output.next_steps {
        println!("{}", NEXT_STEPS.dimmed());
    }
    Ok(())
}

/// Validate the loaded catalog
fn cmd_check(catalog: &Catalog) -> Result<()> {
    let issues = catalog.validate();
    if issues.is_empty() {
        println!("{} {} use cases, no issues", "✓".green(), catalog.len());
        return Ok(());
    }

    for issue in &issues {
        println!("{} {}", "✗".red(), issue);
    }
    Err(eyre!("{} catalog issue(s) found", issues.len()))
}
