//! CLI configuration: thin wrapper around `roster_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --timeout, --insecure, --output, --color).

use clap::ValueEnum;
use tracing::warn;

use roster_core::ClientConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use roster_config::{Config, config_path, load_config, save_config};

/// How command results are rendered.
#[derive(Debug, Clone, Copy)]
pub struct OutputOpts {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
}

/// Load the config file, falling back to defaults when it is unreadable.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file");
            Config::default()
        }
    }
}

/// Apply global flag overrides on top of the file config.
///
/// Flag > env > file > built-in default.
pub fn apply_overrides(cfg: &Config, global: &GlobalOpts) -> Config {
    Config {
        api_url: global.api_url.clone().unwrap_or_else(|| cfg.api_url.clone()),
        timeout: global.timeout.unwrap_or(cfg.timeout),
        insecure: global.insecure || cfg.insecure,
        ..cfg.clone()
    }
}

/// Translate the effective config into a `ClientConfig`.
pub fn resolve_client(cfg: &Config, global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    Ok(apply_overrides(cfg, global).to_client_config()?)
}

/// Resolve output settings: flag first, then config file, then default.
pub fn resolve_output(cfg: &Config, global: &GlobalOpts) -> Result<OutputOpts, CliError> {
    let format = match global.output {
        Some(f) => f,
        None => OutputFormat::from_str(&cfg.output, true).map_err(|reason| {
            CliError::Validation {
                field: "output".into(),
                reason,
            }
        })?,
    };
    let color = match global.color {
        Some(c) => c,
        None => ColorMode::from_str(&cfg.color, true).map_err(|reason| CliError::Validation {
            field: "color".into(),
            reason,
        })?,
    };

    Ok(OutputOpts {
        format,
        color,
        quiet: global.quiet,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use roster_core::TlsVerification;

    use super::*;

    fn global() -> GlobalOpts {
        GlobalOpts {
            api_url: None,
            output: None,
            color: None,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: None,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let cfg = Config {
            api_url: "http://file.example/".into(),
            timeout: 10,
            ..Config::default()
        };
        let flags = GlobalOpts {
            api_url: Some("http://flag.example/".into()),
            timeout: Some(3),
            insecure: true,
            ..global()
        };

        let client = resolve_client(&cfg, &flags).unwrap();
        assert_eq!(client.api_url, "http://flag.example/");
        assert_eq!(client.timeout, Duration::from_secs(3));
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn output_falls_back_to_config() {
        let cfg = Config {
            output: "yaml".into(),
            color: "never".into(),
            ..Config::default()
        };
        let out = resolve_output(&cfg, &global()).unwrap();
        assert_eq!(out.format, OutputFormat::Yaml);
        assert_eq!(out.color, ColorMode::Never);
    }

    #[test]
    fn unknown_output_in_config_is_rejected() {
        let cfg = Config {
            output: "xml".into(),
            ..Config::default()
        };
        assert!(matches!(
            resolve_output(&cfg, &global()),
            Err(CliError::Validation { .. })
        ));
    }
}
