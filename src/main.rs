use anyhow::Result;
use clap::Parser;
use cart_pricing::{
    cli::{args::Args, commands::CliApp},
    utils::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_catalog_path(args.catalog.clone())?;

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    tracing::info!(
        "Configuration loaded for {} environment, catalog at {}",
        config.environment,
        config.catalog_path
    );

    let app = CliApp::new(config);
    app.run(args).await
}
