use medicine_dashboard::chart::ChartKind;
use medicine_dashboard::graph::{ChartOptions, render_svg};
use medicine_dashboard::{FilterCriteria, load_dataset, render};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Writes the four charts of the initial dashboard view as SVG files
///
/// # Arguments
/// * `[dataset_path]` - CSV file to load, `medicine_data.csv` by default
/// * `[output_dir]` - Directory for the SVG files, `graph_output` by default
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let dataset_path = args.get(1).map(String::as_str).unwrap_or("medicine_data.csv");
    let output_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("graph_output"));

    let dataset = load_dataset(dataset_path)?;
    let result = render(&dataset, &FilterCriteria::initial(&dataset));
    if result.is_empty() {
        log::warn!("{} has no rows, nothing to draw", dataset_path);
        return Ok(());
    }

    fs::create_dir_all(&output_dir)?;
    let options = ChartOptions::default();
    for kind in ChartKind::ALL {
        if let Some(chart) = result.visible_chart(kind) {
            let path = output_dir.join(format!("{}.svg", kind.as_str()));
            fs::write(&path, render_svg(chart, &options)?)?;
            println!("Created {} chart at {}", kind.as_str(), path.display());
        }
    }

    Ok(())
}
