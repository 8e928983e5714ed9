//! Bibgraph Graph Builders
//!
//! Derives the two output datasets from a loaded corpus:
//! - Citation dataset: papers with incoming counts and resolved references
//! - Coauthorship dataset: author registry and author-pair registry

pub mod citation;
pub mod coauthorship;

pub use citation::{build_citation_dataset, resolved_citation_count};
pub use coauthorship::{
    build_coauthorship_dataset, coauthorship_links, ordered_pair, pair_key, CoauthorshipLink,
};
