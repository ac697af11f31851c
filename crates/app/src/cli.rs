//! Command-line arguments and the render pipeline behind them.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use stencil_application::variable_resolver::regex_transformer::{DEFAULT_PREFIX, DEFAULT_SUFFIX};
use stencil_application::variable_resolver::{available_commands, standard_commands};
use stencil_application::{
    ApplicationError, DelimitedTransformer, NullFormat, RegexTransformer, ReplacerConfig,
    Transformer, ValueFormatter,
};
use stencil_domain::{DomainError, InsertPolicy};
use stencil_infrastructure::{
    DEFAULT_ENV_PREFIX, EnvironmentSource, InfrastructureError, ObjectFlattener,
    add_bindings_file,
};

/// Errors reported by the `stencil` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading the template or writing the result failed.
    #[error("{}: {source}", .path.display())]
    File {
        /// The file involved.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// Standard input or output failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A binding was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration or rendering failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A bindings source failed.
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

#[derive(Debug, Parser)]
#[command(name = "stencil")]
#[command(about = "Replace $(NAME) placeholders in text with bound values")]
#[command(version)]
#[command(after_help = commands_help())]
pub struct Cli {
    /// Template file to render (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bind a variable, NAME=VALUE (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    pub vars: Vec<(String, String)>,

    /// Load bindings from a JSON or YAML file (repeatable)
    #[arg(long = "vars", value_name = "FILE")]
    pub var_files: Vec<PathBuf>,

    /// Import process environment variables
    #[arg(long)]
    pub env: bool,

    /// Prefix for imported environment variable names
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,

    /// Placeholder prefix
    #[arg(long, env = "STENCIL_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Placeholder suffix
    #[arg(long, env = "STENCIL_SUFFIX", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Use CHAR-delimited placeholders (`%NAME%`) instead of prefix/suffix
    #[arg(long, value_name = "CHAR")]
    pub delimited: Option<char>,

    /// Fail when a placeholder names an unbound variable
    #[arg(long)]
    pub strict: bool,

    /// Let later bindings replace earlier ones with the same name
    #[arg(long)]
    pub overwrite: bool,

    /// Render null values as `null` instead of an empty string
    #[arg(long)]
    pub null_literal: bool,

    /// Time budget for placeholder matching, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    pub match_budget_ms: u64,
}

/// Renders the template described by `cli`.
///
/// # Errors
///
/// Returns the first failure from loading bindings, building the replacer,
/// rendering, or I/O.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = build_config(cli)?;
    let replacer = config.build()?;

    let source = read_input(cli.input.as_deref())?;
    let rendered = replacer.replace_variables(&source)?;
    write_output(cli.output.as_deref(), &rendered)
}

fn build_config(cli: &Cli) -> Result<ReplacerConfig, CliError> {
    let transformer = build_transformer(cli)?;
    let policy = if cli.overwrite {
        InsertPolicy::Overwrite
    } else {
        InsertPolicy::Reject
    };

    let mut config = ReplacerConfig::new().with_insert_policy(policy);

    // Later sources take precedence under --overwrite: environment, files, then --var.
    if cli.env {
        EnvironmentSource::new()
            .with_prefix(cli.env_prefix.as_str())
            .add_to(&mut config.variables, transformer.name_validator())?;
    }

    let flattener = ObjectFlattener::new();
    for path in &cli.var_files {
        add_bindings_file(&mut config.variables, path, &flattener)?;
    }

    config.add_variables(cli.vars.iter().cloned())?;

    if cli.null_literal {
        config = config.with_value_formatter(ValueFormatter::Display(NullFormat::Literal));
    }
    if cli.strict {
        config = config.fail_if_variable_not_found();
    }

    config.transformer = Some(transformer);
    Ok(config)
}

fn build_transformer(cli: &Cli) -> Result<Arc<dyn Transformer>, CliError> {
    if let Some(delimiter) = cli.delimited {
        return Ok(Arc::new(DelimitedTransformer::new(delimiter)));
    }

    let transformer = RegexTransformer::builder()
        .prefix(cli.prefix.as_str())
        .suffix(cli.suffix.as_str())
        .commands(Arc::new(standard_commands))
        .match_budget(Duration::from_millis(cli.match_budget_ms))
        .build()?;
    Ok(Arc::new(transformer))
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, rendered).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn commands_help() -> String {
    let commands: Vec<String> = available_commands()
        .iter()
        .map(|info| format!("  {:<12} {}", info.name, info.description))
        .collect();
    format!("Commands (applied as $(NAME:command)):\n{}", commands.join("\n"))
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err("variable name cannot be empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            parse_binding("Name=Als"),
            Ok(("Name".to_string(), "Als".to_string()))
        );
        assert_eq!(
            parse_binding("Url=a=b"),
            Ok(("Url".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_binding("Empty="), Ok(("Empty".to_string(), String::new())));
        assert!(parse_binding("NoEquals").is_err());
        assert!(parse_binding("=value").is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let help = commands_help();
        for name in ["trim", "trimStart", "upper", "ensureSlash"] {
            assert!(help.contains(name), "{name} missing from {help}");
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["stencil"]).unwrap();
        assert_eq!(cli.env_prefix, "ENV_");
        assert_eq!(cli.match_budget_ms, 10_000);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_repeatable_bindings() {
        let cli =
            Cli::try_parse_from(["stencil", "--var", "A=1", "--var", "B=2", "--vars", "x.yaml"])
                .unwrap();
        assert_eq!(cli.vars.len(), 2);
        assert_eq!(cli.var_files, vec![PathBuf::from("x.yaml")]);
    }

    #[test]
    fn test_config_precedence_with_overwrite() {
        let cli = Cli::try_parse_from([
            "stencil",
            "--overwrite",
            "--var",
            "Name=first",
            "--var",
            "Name=second",
        ])
        .unwrap();
        let replacer = build_config(&cli).unwrap().build().unwrap();
        assert_eq!(replacer.replace_variables("$(Name)").unwrap(), "second");
    }

    #[test]
    fn test_duplicate_binding_rejected_by_default() {
        let cli =
            Cli::try_parse_from(["stencil", "--var", "Name=first", "--var", "Name=second"])
                .unwrap();
        assert!(matches!(
            build_config(&cli),
            Err(CliError::Domain(DomainError::DuplicateVariable(_)))
        ));
    }
}
