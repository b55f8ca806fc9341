//! A `TermSet` represents the observed phenotype terms of one individual
use tracing::debug;

use crate::matrix::Matrix;
use crate::similarity::{Similarity, SimilarityCombiner};
use crate::term::{Iter, TermGroup};
use crate::Ontology;

/// A deduplicated set of resolved ontology terms
///
/// A `TermSet` typically records the clinical phenotype of one individual.
/// It is built from raw tokens (IDs, names, synonyms or alternate IDs);
/// tokens unknown to the ontology are dropped, because upstream phenotype
/// extraction is never fully clean and a missing term must not fail a
/// whole cohort computation.
///
/// # Examples
///
/// ```
/// use phenosim::similarity::{Builtins, StandardCombiner};
/// use phenosim::{Ontology, TermId, TermSet};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(TermId::try_from("HP:0000001").unwrap(), "All").unwrap();
/// ontology.insert_term(TermId::try_from("HP:0001250").unwrap(), "Seizure").unwrap();
/// ontology.create_cache();
///
/// let set = TermSet::from_tokens(
///     &ontology,
///     &["HP:0001250", "Seizure", "HP:9999999", "Mode of inheritance"],
/// );
/// // the duplicate and the two unknown tokens are gone
/// assert_eq!(set.len(), 1);
/// ```
pub struct TermSet<'a> {
    ontology: &'a Ontology,
    group: TermGroup,
}

impl<'a> TermSet<'a> {
    /// Constructs a `TermSet` from already resolved [`crate::TermId`]s
    pub fn new(ontology: &'a Ontology, group: TermGroup) -> Self {
        Self { ontology, group }
    }

    /// Resolves raw tokens against the ontology, silently dropping
    /// everything the ontology does not know
    ///
    /// Dropped tokens are logged at debug level.
    pub fn from_tokens(ontology: &'a Ontology, tokens: &[impl AsRef<str>]) -> Self {
        Self::from_tokens_checked(ontology, tokens).0
    }

    /// Like [`TermSet::from_tokens`], but also returns the dropped tokens
    ///
    /// Use this in pipelines that want to surface how lossy the term
    /// resolution was, without changing the lossy-but-safe default.
    pub fn from_tokens_checked(
        ontology: &'a Ontology,
        tokens: &[impl AsRef<str>],
    ) -> (Self, Vec<String>) {
        let mut group = TermGroup::with_capacity(tokens.len());
        let mut dropped = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            match ontology.resolve(token) {
                Some(id) => {
                    group.insert(id);
                }
                None => {
                    debug!("Skipping {}: not part of the ontology", token);
                    dropped.push(token.to_string());
                }
            }
        }
        (Self { ontology, group }, dropped)
    }

    /// Returns the number of terms in the set
    pub fn len(&self) -> usize {
        self.group.len()
    }

    /// Returns `true` if the set contains no terms
    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Returns the resolved [`crate::TermId`]s of the set
    pub fn term_ids(&self) -> &TermGroup {
        &self.group
    }

    /// Returns an iterator of the [`crate::Term`]s in the set
    pub fn iter(&self) -> Iter<'_> {
        self.ontology.iter_group(&self.group)
    }

    /// Returns a new `TermSet` that contains only the child-most terms
    ///
    /// Terms that are an ancestor of another term in the set carry no
    /// additional information and are removed.
    pub fn child_nodes(&self) -> TermSet<'a> {
        let group = self
            .group
            .iter()
            .filter(|id| {
                self.group.iter().all(|other| {
                    !self
                        .ontology
                        .get_unchecked(other)
                        .all_parents()
                        .contains(id)
                })
            })
            .collect();
        TermSet::new(self.ontology, group)
    }

    /// Calculates the similarity to another `TermSet`
    ///
    /// Every term of `self` is scored against every term of `other` with
    /// the injected [`Similarity`] algorithm and the resulting score matrix
    /// is reduced to a single value by the [`SimilarityCombiner`].
    ///
    /// The calculation is symmetric for any symmetric `Similarity` and any
    /// of the standard combiners. If either set is empty, the similarity
    /// is `0.0`.
    pub fn similarity(
        &self,
        other: &TermSet,
        similarity: &impl Similarity,
        combiner: &impl SimilarityCombiner,
    ) -> f32 {
        let mut scores = Vec::with_capacity(self.len() * other.len());
        for t1 in self.iter() {
            for t2 in other.iter() {
                scores.push(similarity.calculate(&t1, &t2));
            }
        }
        let m = Matrix::new(self.len(), other.len(), scores);
        combiner.calculate(&m)
    }
}

impl<'a> IntoIterator for &'a TermSet<'a> {
    type Item = crate::Term<'a>;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
