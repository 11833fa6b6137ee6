mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster_core::UserListController;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let file_config = config::load_or_default();
    let opts = config::resolve_output(&file_config, &cli.global)?;

    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &opts),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "roster", &mut std::io::stdout());
            Ok(())
        }

        Command::Users(args) => {
            let client_config = config::resolve_client(&file_config, &cli.global)?;
            tracing::debug!(api_url = %client_config.api_url, "using users API");
            let controller = UserListController::new(&client_config)?;
            commands::users::handle(&controller, args, &opts).await
        }
    }
}
