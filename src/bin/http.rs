#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use capacity_planner::{
        ServiceConfig, Snapshot, http_api, load_snapshot_from_json, logging,
    };

    let config = ServiceConfig::from_env()?;
    logging::init_logger(&config.log_filter);

    let snapshot = match &config.snapshot_path {
        Some(path) => load_snapshot_from_json(path)?,
        None => Snapshot::new(),
    };

    tracing::info!(addr = %config.http_addr, "capacity-planner HTTP API listening");
    http_api::serve(config.http_addr, snapshot).await?;
    Ok(())
}
