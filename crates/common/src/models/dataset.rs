//! Derived graph datasets
//!
//! These are the shapes written to disk and consumed by the
//! visualization layer.

use super::paper::{Author, CitationEntry, PaperRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Paper node of the citation dataset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitedPaper {
    pub file_path: String,

    pub title: String,

    pub authors: Vec<Author>,

    pub keywords: Vec<String>,

    /// References that resolve to a paper of the same corpus
    pub citations: Vec<CitationEntry>,

    /// Corpus-wide count of references to this title, resolved or not
    pub cited_by: usize,
}

impl CitedPaper {
    /// Combine a record with its resolved references and incoming count
    pub fn from_record(record: &PaperRecord, citations: Vec<CitationEntry>, cited_by: usize) -> Self {
        Self {
            file_path: record.file_path.clone(),
            title: record.title.clone(),
            authors: record.authors.clone(),
            keywords: record.keywords.clone(),
            citations,
            cited_by,
        }
    }
}

/// Paper as listed under an author
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredPaper {
    pub title: String,

    /// Full author list of the paper
    pub authors: Vec<Author>,
}

/// Author node of the coauthorship dataset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorEntry {
    pub forename: String,

    pub surname: String,

    /// Always equal to `papers.len()`
    pub papers_count: usize,

    pub papers: Vec<AuthoredPaper>,
}

impl AuthorEntry {
    pub fn new(author: &Author) -> Self {
        Self {
            forename: author.forename.clone(),
            surname: author.surname.clone(),
            papers_count: 0,
            papers: Vec::new(),
        }
    }

    pub fn push_paper(&mut self, paper: AuthoredPaper) {
        self.papers.push(paper);
        self.papers_count = self.papers.len();
    }
}

/// Edge of the coauthorship dataset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coauthorship {
    pub first_author: String,

    pub second_author: String,

    /// Titles of the papers both authors appear on
    pub papers: Vec<String>,
}

/// Author registry plus coauthorship registry
///
/// Maps keep insertion order so repeated runs over the same corpus
/// serialize identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoauthorshipDataset {
    pub authors: IndexMap<String, AuthorEntry>,

    pub coauthorships: IndexMap<String, Coauthorship>,
}
