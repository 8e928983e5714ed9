//! Bibgraph Ingestion
//!
//! Turns a directory of TEI documents into paper records:
//! 1. Locates source files under the input directory
//! 2. Parses each file into a tolerant markup tree
//! 3. Extracts title, authors, keywords, and references
//! 4. Gathers every record before any graph is built

pub mod authors;
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod locator;
pub mod markup;

pub use errors::IngestionError;
pub use extractor::{extract_document, extract_file, extract_record};
pub use loader::{retain_complete, CorpusLoader, LoadedCorpus};
pub use locator::locate_source_files;
pub use markup::{MarkupNode, XmlElement};
