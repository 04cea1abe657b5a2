mod config;
mod routes;
mod ws_session;

#[cfg(test)]
mod test_support;

use clap::Parser;
use runtime::Dashboard;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::routes::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run(Args::parse()).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve()?;
    let dashboard = Dashboard::load(&config.sources, config.page_size)?;

    let stats = dashboard.dataset().join_stats();
    info!(
        records = stats.total,
        unmatched_species = stats.unmatched_species,
        outside_regions = stats.outside_regions,
        species = dashboard.dataset().distinct_species().len(),
        "dataset ready"
    );

    let app = router(AppState { dashboard });
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("occurrence dashboard listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
