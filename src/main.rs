use clap::Parser;
use tokio::io::BufReader;

use itemgrid::cli::{self, Args};
use itemgrid::coordinator::RequestCoordinator;
use itemgrid::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let provider = args.provider(&config)?;
    let coordinator = RequestCoordinator::start(
        provider,
        config.view.initial_query.clone(),
        config.view.page_size,
        config.view.initial_page,
    )?;

    let input = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = cli::run(coordinator, input, std::io::stdout()) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}
