//! Extraction pipeline
//!
//! Loads the corpus, builds both datasets once every file has settled,
//! and writes them out.

use crate::writer::write_json_atomic;
use bibgraph_common::metrics::{self, PhaseTimer};
use bibgraph_common::{AppConfig, AppError, Result};
use bibgraph_graph::{
    build_citation_dataset, build_coauthorship_dataset, coauthorship_links,
    resolved_citation_count,
};
use bibgraph_ingestion::{retain_complete, CorpusLoader};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Positional arguments of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineArgs {
    pub input_dir: PathBuf,
    pub citation_output: PathBuf,
    pub author_output: PathBuf,
}

impl PipelineArgs {
    /// Parse `<input-dir> <citation-output> <author-output>`
    ///
    /// Arguments are positional; an empty argument is as missing as an
    /// absent one and never shifts the later ones.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let mut next = |name: &str| match args.next() {
            Some(arg) if !arg.is_empty() => Ok(PathBuf::from(arg)),
            _ => Err(AppError::Usage {
                message: format!("missing {}", name),
            }),
        };

        Ok(Self {
            input_dir: next("input directory")?,
            citation_output: next("citation output path")?,
            author_output: next("author output path")?,
        })
    }
}

/// Counts describing one finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_discovered: usize,
    pub records_loaded: usize,
    pub citation_papers: usize,
    pub resolved_citations: usize,
    pub authors: usize,
    pub coauthorships: usize,
    pub shared_paper_links: usize,
}

/// Run the whole pipeline
#[instrument(skip_all, fields(input = %args.input_dir.display()))]
pub async fn run_pipeline(config: &AppConfig, args: &PipelineArgs) -> Result<RunSummary> {
    let corpus = CorpusLoader::new(config.loader.clone())
        .load(&args.input_dir)
        .await?;

    let timer = PhaseTimer::start("build");

    let citation_input = if config.loader.require_complete_records {
        retain_complete(&corpus.records)
    } else {
        corpus.records.clone()
    };
    let citation_data = build_citation_dataset(&citation_input);
    let author_data = build_coauthorship_dataset(&corpus.records);

    timer.finish();

    let summary = RunSummary {
        files_discovered: corpus.files_discovered,
        records_loaded: corpus.records.len(),
        citation_papers: citation_data.len(),
        resolved_citations: resolved_citation_count(&citation_data),
        authors: author_data.authors.len(),
        coauthorships: author_data.coauthorships.len(),
        shared_paper_links: coauthorship_links(&author_data)
            .iter()
            .map(|link| link.weight)
            .sum(),
    };

    metrics::record_datasets(summary.citation_papers, summary.authors, summary.coauthorships);

    let timer = PhaseTimer::start("write");

    info!(path = %args.citation_output.display(), "Writing the citation data to JSON file");
    write_json_atomic(&args.citation_output, &citation_data, config.output.pretty)?;

    info!(path = %args.author_output.display(), "Writing the author data to JSON file");
    write_json_atomic(&args.author_output, &author_data, config.output.pretty)?;

    timer.finish();

    Ok(summary)
}
