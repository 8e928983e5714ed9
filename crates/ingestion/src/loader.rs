//! Corpus loading
//!
//! Locates every source file, extracts all of them concurrently, and only
//! returns once every extraction has settled.

use crate::errors::IngestionError;
use crate::extractor::extract_file;
use crate::locator::locate_source_files;
use bibgraph_common::config::LoaderConfig;
use bibgraph_common::metrics::{self, PhaseTimer};
use bibgraph_common::PaperRecord;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Outcome of loading a single file
#[derive(Debug)]
enum FileOutcome {
    Record(PaperRecord),
    Empty,
    Malformed,
}

/// Result of loading a corpus
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    /// Files matched by the directory scan
    pub files_discovered: usize,

    /// Records in scan order, soft-empty files removed
    pub records: Vec<PaperRecord>,

    /// Files without a usable metadata envelope
    pub empty_files: usize,

    /// Files skipped because they failed to parse (skip mode only)
    pub malformed_files: usize,
}

/// Corpus loader
pub struct CorpusLoader {
    config: LoaderConfig,
}

impl CorpusLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load every record under `root`
    ///
    /// At most `max_concurrent_files` files are in flight at once. The
    /// first file that fails to parse aborts the load unless
    /// `skip_malformed` is set.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub async fn load(&self, root: &Path) -> Result<LoadedCorpus, IngestionError> {
        info!("Searching for source files");

        let timer = PhaseTimer::start("scan");
        let paths = self.scan(root).await?;
        timer.finish();

        metrics::record_scan(paths.len());
        info!(file_count = paths.len(), "Directory scan complete");

        let timer = PhaseTimer::start("extract");
        let skip_malformed = self.config.skip_malformed;
        let outcomes: Vec<FileOutcome> = stream::iter(paths.iter())
            .map(|path| load_one(path, skip_malformed))
            .buffered(self.config.max_concurrent_files.max(1))
            .try_collect()
            .await?;
        timer.finish();

        let mut corpus = LoadedCorpus {
            files_discovered: paths.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                FileOutcome::Record(record) => corpus.records.push(record),
                FileOutcome::Empty => corpus.empty_files += 1,
                FileOutcome::Malformed => corpus.malformed_files += 1,
            }
        }

        info!(
            records = corpus.records.len(),
            empty = corpus.empty_files,
            malformed = corpus.malformed_files,
            "Corpus loaded"
        );

        Ok(corpus)
    }

    async fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, IngestionError> {
        let root = root.to_path_buf();
        let marker = self.config.source_marker.clone();

        tokio::task::spawn_blocking(move || locate_source_files(&root, &marker)).await?
    }
}

async fn load_one(path: &Path, skip_malformed: bool) -> Result<FileOutcome, IngestionError> {
    match extract_file(path).await {
        Ok(Some(record)) => {
            metrics::record_extracted();
            Ok(FileOutcome::Record(record))
        }
        Ok(None) => {
            debug!(path = %path.display(), "No metadata envelope, skipping");
            metrics::record_skipped("no_envelope");
            Ok(FileOutcome::Empty)
        }
        Err(e) if skip_malformed => {
            metrics::record_extraction_failure();
            warn!(path = %path.display(), error = %e, "Retrieval of the data failed, skipping file");
            Ok(FileOutcome::Malformed)
        }
        Err(e) => {
            metrics::record_extraction_failure();
            error!(path = %path.display(), error = %e, "Retrieval of the data failed");
            Err(e)
        }
    }
}

/// Keep only records with a non-empty title and at least one author
pub fn retain_complete(records: &[PaperRecord]) -> Vec<PaperRecord> {
    records
        .iter()
        .filter(|record| {
            let complete = record.is_complete();
            if !complete {
                metrics::record_skipped("incomplete");
            }
            complete
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibgraph_common::Author;
    use std::fs;
    use tempfile::TempDir;

    fn tei(title: &str, authors: &[(&str, &str)]) -> String {
        let authors: String = authors
            .iter()
            .map(|(f, s)| format!("<author><forename>{f}</forename><surname>{s}</surname></author>"))
            .collect();
        format!(
            "<TEI><teiHeader><titleStmt><title>{title}</title></titleStmt>\
             <analytic>{authors}</analytic></teiHeader></TEI>"
        )
    }

    fn corpus_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.xml"), tei("X", &[("Alice", "Smith")])).unwrap();
        fs::write(dir.path().join("nested/b.xml"), tei("Y", &[("Bob", "Jones")])).unwrap();
        fs::write(dir.path().join("empty.xml"), "<TEI></TEI>").unwrap();
        fs::write(dir.path().join("readme.md"), "not a source").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_drops_empty_files() {
        let dir = corpus_dir();
        let corpus = CorpusLoader::new(LoaderConfig::default())
            .load(dir.path())
            .await
            .unwrap();

        assert_eq!(corpus.files_discovered, 3);
        assert_eq!(corpus.empty_files, 1);
        let titles: Vec<&str> = corpus.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y"]);
    }

    #[tokio::test]
    async fn test_malformed_file_fails_batch() {
        let dir = corpus_dir();
        fs::write(dir.path().join("broken.xml"), "<TEI><!-- oops").unwrap();

        let err = CorpusLoader::new(LoaderConfig::default())
            .load(dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::ExtractionError { .. }));
    }

    #[tokio::test]
    async fn test_skip_mode_keeps_going() {
        let dir = corpus_dir();
        fs::write(dir.path().join("broken.xml"), "<TEI><!-- oops").unwrap();

        let config = LoaderConfig {
            skip_malformed: true,
            max_concurrent_files: 1,
            ..Default::default()
        };
        let corpus = CorpusLoader::new(config).load(dir.path()).await.unwrap();
        assert_eq!(corpus.malformed_files, 1);
        assert_eq!(corpus.records.len(), 2);
    }

    #[test]
    fn test_missing_root_fails_before_extraction() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");

        let result = tokio_test::block_on(CorpusLoader::new(LoaderConfig::default()).load(&missing));
        assert!(matches!(result, Err(IngestionError::DirectoryAccess { .. })));
    }

    #[test]
    fn test_retain_complete() {
        let records = vec![
            PaperRecord {
                title: "X".to_string(),
                authors: vec![Author::new("ALICE", "Smith")],
                ..Default::default()
            },
            PaperRecord {
                title: String::new(),
                authors: vec![Author::new("BOB", "Jones")],
                ..Default::default()
            },
            PaperRecord {
                title: "Z".to_string(),
                ..Default::default()
            },
        ];

        let complete = retain_complete(&records);
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].title, "X");
    }
}
