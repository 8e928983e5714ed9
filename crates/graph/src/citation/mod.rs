//! Citation dataset
//!
//! Counts incoming references per title and restricts every paper's
//! reference list to titles present in the corpus.

use bibgraph_common::{CitedPaper, PaperRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Build the citation dataset, one entry per record in input order
///
/// `cited_by` counts every reference to the paper's title across the
/// corpus before any filtering; papers with an empty title get 0.
pub fn build_citation_dataset(records: &[PaperRecord]) -> Vec<CitedPaper> {
    let mut citation_count: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for citation in &record.citations {
            *citation_count.entry(citation.title.as_str()).or_insert(0) += 1;
        }
    }

    let papers_by_title: HashSet<&str> = records.iter().map(|r| r.title.as_str()).collect();

    let dataset: Vec<CitedPaper> = records
        .iter()
        .map(|record| {
            let cited_by = if record.title.is_empty() {
                0
            } else {
                citation_count.get(record.title.as_str()).copied().unwrap_or(0)
            };

            let citations = record
                .citations
                .iter()
                .filter(|c| !c.title.is_empty() && papers_by_title.contains(c.title.as_str()))
                .cloned()
                .collect();

            CitedPaper::from_record(record, citations, cited_by)
        })
        .collect();

    debug!(
        papers = dataset.len(),
        distinct_cited_titles = citation_count.len(),
        "Citation dataset built"
    );

    dataset
}

/// Number of citations that resolved to a paper of the corpus
pub fn resolved_citation_count(papers: &[CitedPaper]) -> usize {
    papers.iter().map(|paper| paper.citations.len()).sum()
}
