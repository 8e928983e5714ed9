//! Paper record extracted from one source document

use crate::AUTHOR_KEY_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Normalized author name
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Upper-cased first token of the given name
    pub forename: String,

    /// Family name tokens joined with single spaces
    pub surname: String,
}

impl Author {
    pub fn new(forename: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            forename: forename.into(),
            surname: surname.into(),
        }
    }

    /// Registry key for this author (`FORENAME-surname`)
    pub fn key(&self) -> String {
        format!("{}{}{}", self.forename, AUTHOR_KEY_SEPARATOR, self.surname)
    }
}

/// One bibliographic reference found in a document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub title: String,

    pub authors: Vec<Author>,
}

/// One parsed source document
///
/// `title` is the identity key for every graph join; two documents with
/// the same title are treated as one paper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// Source file the record was extracted from
    pub file_path: String,

    pub title: String,

    /// Ordered author list, first author first
    pub authors: Vec<Author>,

    pub keywords: Vec<String>,

    /// Raw reference list, not yet resolved against the corpus
    pub citations: Vec<CitationEntry>,
}

impl PaperRecord {
    /// Whether the record carries enough metadata to be placed in the
    /// citation graph
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.authors.is_empty()
    }
}
