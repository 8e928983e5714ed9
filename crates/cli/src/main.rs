//! Bibgraph CLI
//!
//! Derives the visualization datasets from a TEI corpus:
//! 1. Scans the input directory for source files
//! 2. Extracts a paper record from each file
//! 3. Builds the citation and coauthorship datasets
//! 4. Writes both datasets as JSON
//!
//! Usage: `bibgraph <input-dir> <citation-output> <author-output>`

mod pipeline;
mod writer;

use crate::pipeline::{run_pipeline, PipelineArgs};
use crate::writer::write_atomic;
use bibgraph_common::{config::ObservabilityConfig, metrics, AppConfig, AppError, VERSION};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Please provide the paths for an input directory and two output files.
The format:
$ bibgraph <path to input directory> <path to cite data output file> <path to author data output file>";

#[tokio::main]
async fn main() {
    let args = match PipelineArgs::from_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => exit_with(&e, Some(USAGE)),
    };

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => exit_with(&AppError::from(e), None),
    };

    init_tracing(&config.observability);

    let metrics_handle = match metrics::install_recorder() {
        Ok(handle) => handle,
        Err(e) => exit_with(&e, None),
    };
    metrics::register_metrics();

    info!("Starting bibgraph v{}", VERSION);

    let result = run_pipeline(&config, &args).await;
    emit_metrics(&metrics_handle, &config.observability);

    match result {
        Ok(summary) => {
            info!(
                files = summary.files_discovered,
                records = summary.records_loaded,
                citation_papers = summary.citation_papers,
                resolved_citations = summary.resolved_citations,
                authors = summary.authors,
                coauthorships = summary.coauthorships,
                shared_paper_links = summary.shared_paper_links,
                "Run complete"
            );
        }
        Err(e) => {
            error!(error = %e, code = ?e.code(), "Run failed");
            exit_with(&e, None);
        }
    }
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn emit_metrics(handle: &PrometheusHandle, config: &ObservabilityConfig) {
    let snapshot = handle.render();

    match &config.metrics_output {
        Some(path) => match write_atomic(Path::new(path), snapshot.as_bytes()) {
            Ok(()) => info!(path = %path, "Metrics snapshot written"),
            Err(e) => warn!(path = %path, error = %e, "Failed to write metrics snapshot"),
        },
        None => debug!(snapshot = %snapshot, "Metrics snapshot"),
    }
}

fn exit_with(e: &AppError, hint: Option<&str>) -> ! {
    eprintln!("Error: {}", e);
    if let Some(hint) = hint {
        eprintln!("{}", hint);
    }
    std::process::exit(e.exit_code());
}
