//! Coauthorship dataset
//!
//! One pass over the corpus fills an author registry and a registry of
//! unordered author pairs. A paper with k distinct authors adds k author
//! updates and k*(k-1)/2 pair updates.

use bibgraph_common::{
    Author, AuthorEntry, AuthoredPaper, Coauthorship, CoauthorshipDataset, PaperRecord,
    PAIR_KEY_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Weighted undirected edge between two authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoauthorshipLink {
    pub source: String,

    pub target: String,

    /// Number of shared papers
    pub weight: usize,
}

/// Order two author keys lexicographically
pub fn ordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Registry key for an unordered author pair
///
/// `pair_key(a, b) == pair_key(b, a)` for any two keys.
pub fn pair_key(a: &str, b: &str) -> String {
    let (first, second) = ordered_pair(a, b);
    format!("{}{}{}", first, PAIR_KEY_SEPARATOR, second)
}

/// Build the coauthorship dataset
///
/// Records are folded in order, so registry order and the order of every
/// `papers` list follow corpus order. An author listed twice on the same
/// paper is counted once for that paper.
pub fn build_coauthorship_dataset(records: &[PaperRecord]) -> CoauthorshipDataset {
    let mut dataset = CoauthorshipDataset::default();

    for record in records {
        let authors = distinct_authors(&record.authors);
        let keys: Vec<String> = authors.iter().map(|a| a.key()).collect();

        for (i, author) in authors.iter().enumerate() {
            dataset
                .authors
                .entry(keys[i].clone())
                .or_insert_with(|| AuthorEntry::new(author))
                .push_paper(AuthoredPaper {
                    title: record.title.clone(),
                    authors: record.authors.clone(),
                });

            for other in &keys[i + 1..] {
                let (first, second) = ordered_pair(&keys[i], other);
                dataset
                    .coauthorships
                    .entry(pair_key(first, second))
                    .or_insert_with(|| Coauthorship {
                        first_author: first.to_string(),
                        second_author: second.to_string(),
                        papers: Vec::new(),
                    })
                    .papers
                    .push(record.title.clone());
            }
        }
    }

    debug!(
        authors = dataset.authors.len(),
        coauthorships = dataset.coauthorships.len(),
        "Coauthorship dataset built"
    );

    dataset
}

/// Edge list of the coauthorship dataset, weighted by shared papers
pub fn coauthorship_links(dataset: &CoauthorshipDataset) -> Vec<CoauthorshipLink> {
    dataset
        .coauthorships
        .values()
        .map(|pair| CoauthorshipLink {
            source: pair.first_author.clone(),
            target: pair.second_author.clone(),
            weight: pair.papers.len(),
        })
        .collect()
}

fn distinct_authors(authors: &[Author]) -> Vec<&Author> {
    let mut seen = HashSet::new();
    authors
        .iter()
        .filter(|author| seen.insert(author.key()))
        .collect()
}
