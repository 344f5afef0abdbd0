//! The `packshot` command-line caller.

use clap::Parser;
use packshot::cli::{Cli, Commands, handle_generate_command, handle_validate_config_command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Commands::Generate(args) => handle_generate_command(&args).await?,
        Commands::ValidateConfig { config } => handle_validate_config_command(config.as_deref())?,
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries command output.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
