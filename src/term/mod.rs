//! Single ontology terms, term IDs and groups of terms
use core::fmt::Debug;
use std::fmt::Display;

use crate::{PhenoError, PhenoResult, TERM_ID_PREFIX};

mod group;
mod internal;
#[allow(clippy::module_inception)]
mod term;

pub use group::{TermGroup, TermIds};
pub(crate) use internal::TermInternal;
pub use term::{Iter, Term};

/// The unique, stable identifier of an ontology term
///
/// Term IDs follow the `HP:0001250` convention: a fixed prefix and a
/// 7-digit number. Internally only the numerical part is stored.
///
/// # Examples
///
/// ```
/// use phenosim::TermId;
///
/// let term_id = TermId::try_from("HP:0001250").unwrap();
/// assert_eq!(term_id.to_string(), "HP:0001250");
///
/// assert!(TermId::try_from("MONDO:0001250").is_err());
/// ```
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TermId {
    inner: u32,
}

impl TermId {
    /// Returns `true` if the token follows the ontology's ID prefix convention
    ///
    /// This is a purely syntactical check, the term does not need to
    /// exist in any ontology.
    pub fn looks_like_id(token: &str) -> bool {
        token.starts_with(TERM_ID_PREFIX)
    }
}

impl TryFrom<&str> for TermId {
    type Error = PhenoError;
    fn try_from(s: &str) -> PhenoResult<Self> {
        let numbers = s
            .strip_prefix(TERM_ID_PREFIX)
            .ok_or_else(|| PhenoError::InvalidTermId(s.to_string()))?;
        Ok(TermId {
            inner: numbers.parse::<u32>()?,
        })
    }
}

impl From<u32> for TermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermId({self})")
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:07}", TERM_ID_PREFIX, self.inner)
    }
}

impl PartialEq<str> for TermId {
    fn eq(&self, other: &str) -> bool {
        TermId::try_from(other).map_or(false, |other| self == &other)
    }
}
