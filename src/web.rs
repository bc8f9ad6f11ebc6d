use medicine_dashboard::app;
use medicine_dashboard::config::ServerConfig;
use medicine_dashboard::dataset::load_dataset;
use std::env;

/// Main entry point for the dashboard server
///
/// Loads the medicine dataset once, then serves the dashboard page and its
/// API. A missing file or a missing column stops the process before the
/// listener is bound.
///
/// # Arguments
/// * `[dataset_path]` - CSV file to load, `medicine_data.csv` by default
/// * `[bind_address]` - Listen address, `127.0.0.1:8050` by default
///
/// Log verbosity follows `RUST_LOG` and defaults to `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = ServerConfig::from_args(&args)?;

    let dataset = match load_dataset(&config.dataset_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("{}", e);
            return Err(e.into());
        }
    };

    match dataset.price_bounds() {
        Some((min, max)) => log::info!(
            "Loaded {} medicines from {} (price {} to {}, {} categories)",
            dataset.len(),
            config.dataset_path.display(),
            min,
            max,
            dataset.distinct_categories().len()
        ),
        None => log::warn!("{} has no rows", config.dataset_path.display()),
    }

    app::run(dataset, config.bind_addr).await
}
