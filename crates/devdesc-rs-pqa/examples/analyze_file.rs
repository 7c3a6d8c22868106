//! Runs one device-description file through the round-trip analysis and
//! prints its scores.
//!
//! `cargo run -p devdesc-rs-pqa --example analyze_file -- <file.xml|file.eds> [--json]`
//!
//! The file type is taken from the extension. Set `RUST_LOG=debug` to see
//! the pipeline stages.

use devdesc_rs::FileType;
use devdesc_rs_pqa::repository::InMemoryStore;
use devdesc_rs_pqa::{PqaError, PqaService, views};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use std::{env, fs, process};

fn main() {
    env_logger::try_init().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("usage: analyze_file <file.xml|file.eds> [--json]");
        process::exit(2);
    };
    let json = args.iter().any(|a| a == "--json");

    if let Err(e) = run(Path::new(path), json) {
        error!("analysis failed: {}", e);
        process::exit(1);
    }
}

fn run(path: &Path, json: bool) -> Result<(), PqaError> {
    let file_type = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .parse::<FileType>()
        .map_err(|e| PqaError::Config(format!("{}: {}", path.display(), e)))?;
    let text = fs::read_to_string(path)
        .map_err(|e| PqaError::Config(format!("cannot read {}: {}", path.display(), e)))?;

    let service = PqaService::new(Arc::new(InMemoryStore::new()));
    let (id, _) = service.import(file_type, &text)?;
    info!("imported {} as file {}", path.display(), id);
    let (metrics, diffs) = service.run_full_analysis(id, file_type, &text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("{} ({})", path.display(), file_type);
    println!("  structural  {:>7.2}", metrics.structural_score);
    println!("  attribute   {:>7.2}", metrics.attribute_score);
    println!("  value       {:>7.2}", metrics.value_score);
    println!("  overall     {:>7.2}", metrics.overall_score);
    println!("  data loss   {:>6.2}%", metrics.data_loss_percentage);
    println!("  critical    {}", metrics.critical_data_loss);
    println!("  passed      {}", metrics.passed_threshold);

    if !diffs.is_empty() {
        println!("differences by type:");
        for (diff_type, count) in views::diff_type_distribution(&diffs) {
            println!("  {:<20} {}", diff_type.as_str(), count);
        }
        println!("most frequent paths:");
        for pattern in views::top_xpath_patterns(&diffs, 10) {
            println!("  {:>4}  {}", pattern.count, pattern.pattern);
        }
    }
    Ok(())
}
