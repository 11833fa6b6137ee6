//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, OutputOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts, opts: &OutputOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), opts.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let effective = config::apply_overrides(&config::load_or_default(), global);
            let rendered = match opts.format {
                OutputFormat::Json => output::render_json_pretty(&effective),
                OutputFormat::JsonCompact => output::render_json_compact(&effective),
                OutputFormat::Yaml => output::render_yaml(&effective),
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&effective)
                    .map_err(|e| CliError::Internal(format!("failed to render config: {e}")))?,
            };
            output::print_output(rendered.trim_end(), opts.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = Config {
                api_url: global
                    .api_url
                    .clone()
                    .unwrap_or_else(|| Config::default().api_url),
                ..Config::default()
            };
            // Validate before writing anything.
            cfg.to_client_config()?;

            let written = config::save_config(&cfg)?;
            if !opts.quiet {
                eprintln!("Config written to {}", written.display());
            }
            Ok(())
        }
    }
}
