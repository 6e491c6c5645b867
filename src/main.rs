use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fpl_form::acquire::current_rankings;
use fpl_form::config::Config;
use fpl_form::table::render;

#[tokio::main]
async fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    if let Ok(name) = std::env::var("FUNCTION_NAME") {
        info!(function = %name, "starting");
    }

    if let Err(err) = run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    let rankings = current_rankings(&config).await?;
    println!("{}", render(&rankings));
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
