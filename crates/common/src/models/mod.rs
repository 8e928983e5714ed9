//! Bibliographic data model
//!
//! Records extracted from source documents and the two datasets derived
//! from them.

mod dataset;
mod paper;

pub use dataset::{AuthorEntry, AuthoredPaper, CitedPaper, Coauthorship, CoauthorshipDataset};
pub use paper::{Author, CitationEntry, PaperRecord};
