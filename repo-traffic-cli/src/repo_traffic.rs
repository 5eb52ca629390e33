use clap::Command;
use repo_traffic_core::{pipeline, Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let _matches = Command::new("repo_traffic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Query GitHub and save the traffic data to csv files")
        .get_matches();

    let start_time = std::time::Instant::now();

    // Initialize context from environment
    let ctx = Context::from_env()?;

    if ctx.ctx_out {
        info!("Context: {:?}", ctx);
    }

    let today = chrono::Local::now().date_naive();
    let report = pipeline::run_github(&ctx, today).await?;

    let elapsed = start_time.elapsed();

    info!("Traffic export completed in {:?}", elapsed);
    info!("Statistics:");
    info!("  Repositories: {}", report.repositories);
    info!("  Detail rows written: {}", report.details.written);
    info!("  Detail rows skipped (today): {}", report.details.skipped_today);
    info!("  Summary rows appended: {}", report.summaries);

    Ok(())
}
