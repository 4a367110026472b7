use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod command;

use cli::{Cli, Commands};
use osaas_client::{Context, ContextConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ContextConfig {
        personal_access_token: cli.token,
        environment: cli.environment,
        endpoints: None,
    };
    let ctx = Context::new(config).context("Failed to create OSC context")?;

    match cli.command {
        Commands::Service { service_id } => command::run_service(&ctx, &service_id).await,
        Commands::Activate { service_id } => command::run_activate(&ctx, &service_id).await,
        Commands::Token { service_id } => command::run_token(&ctx, &service_id).await,
        Commands::Create {
            service_id,
            name,
            options,
        } => command::run_create(&ctx, &service_id, &name, options).await,
        Commands::List { service_id } => command::run_list(&ctx, &service_id).await,
        Commands::Describe { service_id, name } => {
            command::run_describe(&ctx, &service_id, &name).await
        }
        Commands::Remove { service_id, name } => {
            command::run_remove(&ctx, &service_id, &name).await
        }
        Commands::Ports { service_id, name } => command::run_ports(&ctx, &service_id, &name).await,
        Commands::Logs { service_id, name } => command::run_logs(&ctx, &service_id, &name).await,
        Commands::Secret {
            service_id,
            secret_name,
            secret_value,
        } => command::run_secret(&ctx, &service_id, &secret_name, &secret_value).await,
    }
}
