//! `phenosim` computes semantic similarity between sets of phenotype terms
//! from a hierarchical ontology and derives similarity-based features for
//! case/control cohorts.
//!
//! The ontology is a directed acyclic graph of terms connected by `is-a`
//! relationships. It is built in memory through the [`Ontology`] builder API;
//! parsing of `hp.obo` or annotation files is not part of this crate. Every
//! term carries an externally supplied information content value that the
//! builtin similarity algorithms use for scoring.
//!
//! # Examples
//!
//! ```
//! use phenosim::similarity::{Builtins, StandardCombiner};
//! use phenosim::{Ontology, TermId, TermSet};
//!
//! let mut ontology = Ontology::default();
//! let root = TermId::try_from("HP:0000001").unwrap();
//! let seizure = TermId::try_from("HP:0001250").unwrap();
//! let ataxia = TermId::try_from("HP:0001251").unwrap();
//!
//! ontology.insert_term(root, "All").unwrap();
//! ontology.insert_term(seizure, "Seizure").unwrap();
//! ontology.insert_term(ataxia, "Ataxia").unwrap();
//! ontology.add_parent(root, seizure);
//! ontology.add_parent(root, ataxia);
//! ontology.create_cache();
//! ontology.set_information_content(root, 0.0).unwrap();
//! ontology.set_information_content(seizure, 4.2).unwrap();
//! ontology.set_information_content(ataxia, 3.7).unwrap();
//!
//! let patient_1 = TermSet::from_tokens(&ontology, &["HP:0001250", "Ataxia"]);
//! let patient_2 = TermSet::from_tokens(&ontology, &["HP:0001251"]);
//!
//! let similarity = patient_1.similarity(
//!     &patient_2,
//!     &Builtins::Resnik,
//!     &StandardCombiner::default(),
//! );
//! assert!(similarity >= 0.0);
//! ```
use std::num::ParseIntError;
use thiserror::Error;

pub mod cohort;
pub mod filter;
pub mod matrix;
pub mod similarity;
pub mod subgraph;
pub mod term;
mod ontology;
mod set;

pub use ontology::Ontology;
pub use set::TermSet;
pub use subgraph::AnnotatedSubgraph;
pub use term::{Term, TermGroup, TermId};

const DEFAULT_NUM_PARENTS: usize = 10;
const DEFAULT_NUM_ALL_PARENTS: usize = 50;

/// The ID prefix convention of the ontology, e.g. `HP:0001250`
pub const TERM_ID_PREFIX: &str = "HP:";

/// Errors of the `phenosim` crate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PhenoError {
    /// The term is not present in the ontology
    #[error("term does not exist")]
    DoesNotExist,
    /// A term ID did not follow the `HP:1234567` convention
    #[error("invalid term id: {0}")]
    InvalidTermId(String),
    /// The numerical part of a term ID could not be parsed
    #[error("unable to parse Integer")]
    ParseIntError,
    /// A named scoring or aggregation method is not known to this crate
    #[error("unknown similarity method: {0}")]
    UnknownMethod(String),
}

impl From<ParseIntError> for PhenoError {
    fn from(_: ParseIntError) -> Self {
        PhenoError::ParseIntError
    }
}

/// The crate-wide Result type
pub type PhenoResult<T> = Result<T, PhenoError>;
