use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use surveyviz::commands::base_commands::{CliArgs, Commands};
use surveyviz::commands::edit_cmd::edit_command;
use surveyviz::commands::import_cmd::import_command;
use surveyviz::commands::preview_cmd::preview_command;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SURVEYVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Preview { .. } => preview_command(cmd).await,
        cmd @ Commands::Import { .. } => import_command(cmd).await,
        cmd @ Commands::Edit { .. } => edit_command(cmd).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }
}
