//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Comet Mastery - AI prompt generator for real estate professionals
#[derive(Parser, Debug)]
#[command(
    name = "cm",
    author,
    version,
    about = "Interactive AI prompt generator for real estate professionals",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available use cases
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a use case and its form fields
    Show {
        /// Use case id
        #[arg(required = true)]
        use_case: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Render a prompt from field values
    Render {
        /// Use case id
        #[arg(required = true)]
        use_case: String,

        /// Field value, repeatable (overrides --values)
        #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// YAML or JSON file mapping field ids to values
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,

        /// Write the prompt to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Fill a use case's form interactively
    Fill {
        /// Use case id (asks when omitted)
        use_case: Option<String>,
    },

    /// Check the catalog for template and field problems
    Check,
}

/// Output format for list/show/render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parse `FIELD=VALUE`; the value may itself contain `=`
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected FIELD=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("Missing field name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["cm"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_list_json() {
        let cli = Cli::parse_from(["cm", "list", "--format", "json"]);
        assert!(matches!(cli.command, Some(Command::List { format: OutputFormat::Json })));
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from([
            "cm",
            "render",
            "lead-followup",
            "--set",
            "tone=Warm & Friendly",
            "-s",
            "note=a=b",
            "-o",
            "prompt.txt",
        ]);
        if let Some(Command::Render {
            use_case,
            set,
            values,
            output,
            format,
        }) = cli.command
        {
            assert_eq!(use_case, "lead-followup");
            assert_eq!(
                set,
                vec![
                    ("tone".to_string(), "Warm & Friendly".to_string()),
                    ("note".to_string(), "a=b".to_string()),
                ]
            );
            assert!(values.is_none());
            assert_eq!(output, Some(PathBuf::from("prompt.txt")));
            assert_eq!(format, OutputFormat::Text);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_parse_render_rejects_bad_pair() {
        assert!(Cli::try_parse_from(["cm", "render", "x", "--set", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["cm", "render", "x", "--set", "=value"]).is_err());
    }

    #[test]
    fn test_cli_parse_fill_optional_id() {
        let cli = Cli::parse_from(["cm", "fill"]);
        assert!(matches!(cli.command, Some(Command::Fill { use_case: None })));
        let cli = Cli::parse_from(["cm", "fill", "custom-prompt"]);
        assert!(matches!(cli.command, Some(Command::Fill { use_case: Some(ref id) }) if id == "custom-prompt"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["cm", "-c", "/path/to/config.yml", "check"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert!(matches!(cli.command, Some(Command::Check)));
    }
}
