use anyhow::Result;
use clap::Parser;
use tickergrid_client::Provider;
use tickergrid_tui::Route;

mod cli;

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::init();
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();
    let cli = cli::Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let provider = Provider::from_env()?;

    // cli framework:
    // "> tickergrid"          - the dashboard
    // "> tickergrid stock X"  - straight to one symbol's detail view
    let route = match &cli.command {
        Some(cli::Commands::Stock { symbol }) => Route::Stock {
            symbol: symbol.trim().to_uppercase(),
        },
        None => Route::Dashboard,
    };

    tickergrid_tui::run(provider, route).await
}
