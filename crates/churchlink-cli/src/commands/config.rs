//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use churchlink_core::config::AppConfig;
use churchlink_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file plus environment)
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
///
/// `config` has already been loaded and validated from `config_path`.
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = config;
    config.api.token = config.api.token.as_deref().map(mask_token);

    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(&config),
            OutputFormat::Table => {
                output::print_kv("api.base_url", &config.api.base_url);
                output::print_kv(
                    "api.token",
                    config.api.token.as_deref().unwrap_or("(none)"),
                );
                output::print_kv(
                    "api.timeout_seconds",
                    &config.api.timeout_seconds.to_string(),
                );
                output::print_kv(
                    "translator.source_locale",
                    &config.translator.source_locale,
                );
                output::print_kv(
                    "editor.max_undo_steps",
                    &config.editor.max_undo_steps.to_string(),
                );
                output::print_kv("logging.level", &config.logging.level);
                output::print_kv("logging.format", &config.logging.format);
            }
        },
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            println!("  Backend: {}", config.api.base_url);
            println!("  Source locale: {}", config.translator.source_locale);
            if config.api.token.is_none() {
                output::print_warning("No api.token set: authenticated endpoints will fail");
            }
        }
    }

    Ok(())
}

/// Keep only the last four characters of a bearer token
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
