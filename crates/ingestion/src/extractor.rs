//! Record extraction
//!
//! Pulls a [`PaperRecord`] out of one TEI document.

use crate::authors::normalize_authors;
use crate::errors::IngestionError;
use crate::markup::{MarkupNode, XmlElement};
use bibgraph_common::{CitationEntry, PaperRecord};
use std::path::Path;
use tracing::{debug, instrument};

/// Root element of a document's metadata envelope
const ENVELOPE_TAG: &str = "TEI";

/// Extract a record from a parsed document tree
///
/// Returns `None` when the document has no envelope or an empty one.
/// Every other missing section yields an empty value.
pub fn extract_record<N: MarkupNode>(document: &N, file_path: &str) -> Option<PaperRecord> {
    let envelope = document.find(ENVELOPE_TAG)?;
    if !envelope.has_content() {
        return None;
    }

    let title = document
        .find("titleStmt")
        .and_then(|stmt| stmt.find("title"))
        .map(|title| title.text())
        .unwrap_or_default();

    let authors = document
        .find("analytic")
        .map(|analytic| normalize_authors(&analytic.find_all("author")))
        .unwrap_or_default();

    let keywords = document
        .find("keywords")
        .map(|keywords| {
            keywords
                .find_all("term")
                .into_iter()
                .map(|term| term.text())
                .collect()
        })
        .unwrap_or_default();

    let citations = document
        .find("listBibl")
        .map(|list| {
            list.find_all("biblStruct")
                .into_iter()
                .filter_map(|entry| extract_citation(entry, file_path))
                .collect()
        })
        .unwrap_or_default();

    Some(PaperRecord {
        file_path: file_path.to_string(),
        title,
        authors,
        keywords,
        citations,
    })
}

/// A bibliography entry without a title tag carries nothing to link, so it
/// is dropped.
fn extract_citation<N: MarkupNode>(entry: &N, file_path: &str) -> Option<CitationEntry> {
    let Some(title) = entry.find("title") else {
        debug!(path = %file_path, "Bibliography entry without title, skipping");
        return None;
    };

    Some(CitationEntry {
        title: title.text(),
        authors: normalize_authors(&entry.find_all("author")),
    })
}

/// Parse raw document text and extract its record
pub fn extract_document(content: &str, file_path: &str) -> Result<Option<PaperRecord>, IngestionError> {
    let document = XmlElement::parse(content).map_err(|e| IngestionError::ExtractionError {
        path: file_path.to_string(),
        message: e.to_string(),
    })?;

    Ok(extract_record(&document, file_path))
}

/// Read a source file and extract its record
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn extract_file(path: &Path) -> Result<Option<PaperRecord>, IngestionError> {
    debug!("Starting retrieval of the data from file");

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IngestionError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    let content = String::from_utf8_lossy(&bytes);

    extract_document(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibgraph_common::Author;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <titleStmt><title level="a" type="main">Graph Mining at Scale</title></titleStmt>
      <sourceDesc>
        <biblStruct>
          <analytic>
            <author><persName><forename type="first">alice</forename><surname>Smith</surname></persName></author>
            <author><persName><forename type="first">Bob</forename><surname>Jones</surname></persName></author>
            <author><persName><forename>â€ </forename><surname>Hidden</surname></persName></author>
          </analytic>
        </biblStruct>
      </sourceDesc>
    </fileDesc>
    <profileDesc>
      <textClass><keywords><term>graphs</term><term>mining</term></keywords></textClass>
    </profileDesc>
  </teiHeader>
  <text>
    <back>
      <listBibl>
        <biblStruct>
          <analytic>
            <title>Community Detection</title>
            <author><persName><forename>Carol</forename><surname>White</surname></persName></author>
          </analytic>
        </biblStruct>
        <biblStruct>
          <monogr><imprint><date>2001</date></imprint></monogr>
        </biblStruct>
        <biblStruct>
          <monogr><title>Network Science</title></monogr>
        </biblStruct>
      </listBibl>
    </back>
  </text>
</TEI>"#;

    #[test]
    fn test_extract_full_document() {
        let record = extract_document(SAMPLE, "corpus/a.xml").unwrap().unwrap();

        assert_eq!(record.file_path, "corpus/a.xml");
        assert_eq!(record.title, "Graph Mining at Scale");
        assert_eq!(
            record.authors,
            vec![Author::new("ALICE", "Smith"), Author::new("BOB", "Jones")]
        );
        assert_eq!(record.keywords, vec!["graphs", "mining"]);
        assert_eq!(record.citations.len(), 2);
        assert_eq!(record.citations[0].title, "Community Detection");
        assert_eq!(record.citations[0].authors, vec![Author::new("CAROL", "White")]);
        assert_eq!(record.citations[1].title, "Network Science");
        assert!(record.citations[1].authors.is_empty());
    }

    #[test]
    fn test_cited_authors_are_filtered() {
        let content = r#"<TEI><teiHeader><titleStmt><title>Survey</title></titleStmt></teiHeader>
<listBibl>
  <biblStruct>
    <analytic>
      <title>Spectral Methods</title>
      <author><persName><forename>â€ </forename><surname>Ghost</surname></persName></author>
      <author><persName><forename>erin</forename><surname>Brown</surname></persName></author>
      <author><persName><forename>Frank</forename><surname> - </surname></persName></author>
    </analytic>
  </biblStruct>
</listBibl></TEI>"#;

        let record = extract_document(content, "survey.xml").unwrap().unwrap();
        assert_eq!(record.citations.len(), 1);
        assert_eq!(record.citations[0].title, "Spectral Methods");
        assert_eq!(record.citations[0].authors, vec![Author::new("ERIN", "Brown")]);
    }

    #[test]
    fn test_missing_envelope_is_no_record() {
        let result = extract_document("<html><title>Not TEI</title></html>", "x.xml").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_envelope_is_no_record() {
        assert!(extract_document("<TEI>\n</TEI>", "x.xml").unwrap().is_none());
        assert!(extract_document("<TEI/>", "x.xml").unwrap().is_none());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let record = extract_document("<TEI><teiHeader/></TEI>", "x.xml").unwrap().unwrap();
        assert_eq!(record.title, "");
        assert!(record.authors.is_empty());
        assert!(record.keywords.is_empty());
        assert!(record.citations.is_empty());
    }

    #[test]
    fn test_unparseable_document_is_extraction_error() {
        let err = extract_document("<TEI><!-- unterminated", "broken.xml").unwrap_err();
        match err {
            IngestionError::ExtractionError { path, .. } => assert_eq!(path, "broken.xml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_from_in_memory_tree() {
        let author = XmlElement::new("author")
            .with_child(XmlElement::new("forename").with_text("dana"))
            .with_child(XmlElement::new("surname").with_text("Scott"));
        let document = XmlElement::default().with_child(
            XmlElement::new("TEI")
                .with_child(
                    XmlElement::new("titleStmt")
                        .with_child(XmlElement::new("title").with_text("Domains")),
                )
                .with_child(XmlElement::new("analytic").with_child(author)),
        );

        let record = extract_record(&document, "mem").unwrap();
        assert_eq!(record.title, "Domains");
        assert_eq!(record.authors, vec![Author::new("DANA", "Scott")]);
    }

    #[tokio::test]
    async fn test_extract_file_reads_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.xml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let record = extract_file(&path).await.unwrap().unwrap();
        assert_eq!(record.title, "Graph Mining at Scale");
        assert_eq!(record.file_path, path.display().to_string());
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_read_error() {
        let err = extract_file(Path::new("/definitely/not/here.xml")).await.unwrap_err();
        assert!(matches!(err, IngestionError::ReadError { .. }));
    }
}
