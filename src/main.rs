use clap::Parser;

use brainink_lib::bootstrap::{self, AppRuntime};
use brainink_lib::cli::Cli;
use brainink_lib::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::resolve_config(cli.config.as_deref())?;

    let log_dir = (!config.log_dir.as_os_str().is_empty()).then_some(config.log_dir.as_path());
    if let Err(err) = bootstrap::tracing::init_tracing_subscriber(log_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let runtime = AppRuntime::new(config)?;
    commands::run(cli, &runtime).await
}
