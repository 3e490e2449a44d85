use anyhow::{Context, Result, bail};
use config::ColumnCatalog;
use processor::{DataValidator, HeaderMatcher, MetricsAggregator, PayloadBuilder};
use std::env;
use tracing::{info, warn};

mod config;
mod ingest;
mod models;
mod processor;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let pretty = args.iter().any(|a| a == "--pretty");
    let catalog_path = args
        .iter()
        .position(|a| a == "--catalog")
        .and_then(|i| args.get(i + 1))
        .cloned();
    let input_path = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .find(|a| Some(a.as_str()) != catalog_path.as_deref())
        .cloned();

    let Some(input_path) = input_path else {
        bail!("Usage: campaign-insights <export.csv> [--catalog aliases.toml] [--pretty]");
    };

    let catalog = match catalog_path {
        Some(path) => {
            info!("Loading extended column catalog from {}", path);
            ColumnCatalog::from_file(&path)
                .with_context(|| format!("Failed to load catalog {}", path))?
        }
        None => ColumnCatalog::new(),
    };

    info!("=== Campaign Insights Pipeline: {} ===", input_path);

    let table = ingest::read_table(&input_path)?;

    let validator = DataValidator::new(HeaderMatcher::new(catalog));
    let verdict = validator.validate(&table);

    if verdict.is_valid {
        info!(
            "Recognized {} columns ({} quality): {}",
            verdict.found_fields.len(),
            verdict.data_quality,
            verdict
                .found_fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        warn!("Export not analyzable: {}", verdict.suggestions);
    }

    let metrics = MetricsAggregator.aggregate(&table, &verdict);
    if metrics.is_none() {
        warn!("No data rows; payload will carry structure only");
    }

    let payload = PayloadBuilder.build(&table, &verdict, metrics.as_ref());

    let body = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{}", body);

    info!(
        "=== Pipeline complete: {} rows, {} sample rows in payload ===",
        payload.total_rows,
        payload.sample_rows.len()
    );

    Ok(())
}
