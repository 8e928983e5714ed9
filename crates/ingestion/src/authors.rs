//! Author name normalization
//!
//! Raw `author` tags carry one optional `forename` and any number of
//! `surname` parts. They are reduced to an upper-cased first given-name
//! token and a single joined surname, and unusable names are dropped.

use crate::markup::MarkupNode;
use bibgraph_common::Author;

/// Mis-encoded dagger the corpus uses to mark a redacted author
pub const CORRUPTION_MARKER: &str = "â€ ";

/// Normalize a list of raw author tags, dropping unusable authors
///
/// Applied the same way to a paper's own authors and to the authors of
/// each cited work.
pub fn normalize_authors<N: MarkupNode>(tags: &[&N]) -> Vec<Author> {
    tags.iter().filter_map(|tag| normalize_author(*tag)).collect()
}

/// Normalize one raw author tag
pub fn normalize_author<N: MarkupNode>(tag: &N) -> Option<Author> {
    let forename = tag.find("forename").map(|f| f.text()).unwrap_or_default();
    let surnames: Vec<String> = tag
        .find_all("surname")
        .into_iter()
        .map(|s| s.text())
        .collect();

    normalize_name(&forename, &surnames)
}

/// Normalize raw name texts
///
/// Returns `None` when the surname ends up empty or either raw text
/// contains [`CORRUPTION_MARKER`].
pub fn normalize_name<S: AsRef<str>>(forename: &str, surnames: &[S]) -> Option<Author> {
    let corrupted = forename.contains(CORRUPTION_MARKER)
        || surnames.iter().any(|s| s.as_ref().contains(CORRUPTION_MARKER));
    if corrupted {
        return None;
    }

    let surname = normalize_surname(surnames);
    if surname.is_empty() {
        return None;
    }

    Some(Author::new(normalize_forename(forename), surname))
}

/// First given-name token, stripped of `+`/`-` runs and upper-cased
///
/// Whitespace and hyphens both separate tokens, so compound given names
/// keep only their first part.
pub fn normalize_forename(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '-')
        .find(|token| !token.is_empty())
        .map(|token| trim_name_punctuation(token).to_uppercase())
        .unwrap_or_default()
}

/// Surname parts, each stripped, joined with single spaces
pub fn normalize_surname<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| trim_name_punctuation(part.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn trim_name_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c == '+' || c == '-' || c.is_whitespace())
}
