use crate::similarity::Similarity;
use crate::term::internal::TermInternal;
use crate::term::{TermGroup, TermId};
use crate::{Ontology, PhenoError, PhenoResult};

/// A single term of the ontology
///
/// The `Term` borrows its data from the [`Ontology`] and provides
/// functionality for hierarchy traversal and similarity calculation.
#[derive(Debug, Clone, Copy)]
pub struct Term<'a> {
    id: TermId,
    name: &'a str,
    parents: &'a TermGroup,
    all_parents: &'a TermGroup,
    children: &'a TermGroup,
    information_content: f32,
    ontology: &'a Ontology,
}

impl<'a> Term<'a> {
    /// Constructs a new [`Term`]
    ///
    /// # Errors
    ///
    /// If the given [`TermId`] does not match an existing term
    /// it returns an Error
    pub fn try_new(ontology: &'a Ontology, term_id: TermId) -> PhenoResult<Term<'a>> {
        let term = ontology.get(term_id).ok_or(PhenoError::DoesNotExist)?;
        Ok(Term::new(ontology, term))
    }

    pub(crate) fn new(ontology: &'a Ontology, term: &'a TermInternal) -> Term<'a> {
        Term {
            id: term.id(),
            name: term.name(),
            parents: term.parents(),
            all_parents: term.all_parents(),
            children: term.children(),
            information_content: term.information_content(),
            ontology,
        }
    }

    /// Returns the [`TermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> TermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the externally supplied information content of the term
    pub fn information_content(&self) -> f32 {
        self.information_content
    }

    /// Returns the [`TermId`]s of the direct parents
    pub fn parent_ids(&self) -> &TermGroup {
        self.parents
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> Iter<'a> {
        Iter::new(self.parents.iter(), self.ontology)
    }

    /// Returns the [`TermId`]s of all direct and indirect parents
    pub fn all_parent_ids(&self) -> &TermGroup {
        self.all_parents
    }

    /// Returns an iterator of all direct and indirect parents of the term
    pub fn all_parents(&self) -> Iter<'a> {
        Iter::new(self.all_parents.iter(), self.ontology)
    }

    /// Returns the [`TermId`]s of the direct children
    pub fn children_ids(&self) -> &TermGroup {
        self.children
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> Iter<'a> {
        Iter::new(self.children.iter(), self.ontology)
    }

    /// Returns the [`TermId`]s that are ancestors of both `self` **and** `other`
    ///
    /// If one term is an ancestor of the other (or both are the same
    /// term), that term is included as well.
    pub fn common_ancestor_ids(&self, other: &Term) -> TermGroup {
        let mut res = self.all_parent_ids() & other.all_parent_ids();

        if self.id() == other.id() || other.all_parent_ids().contains(&self.id()) {
            res.insert(self.id());
        }

        if self.all_parent_ids().contains(&other.id()) {
            res.insert(other.id());
        }

        res
    }

    /// Returns the [`TermId`]s that are ancestors of either `self` **or** `other`
    pub fn union_ancestor_ids(&self, other: &Term) -> TermGroup {
        self.all_parent_ids() | other.all_parent_ids()
    }

    /// Returns `true` if `self` is a child (direct or indirect) of `other`
    pub fn child_of(&self, other: &Term) -> bool {
        self.all_parent_ids().contains(&other.id())
    }

    /// Returns `true` if `self` is a parent (direct or indirect) of `other`
    pub fn parent_of(&self, other: &Term) -> bool {
        other.child_of(self)
    }

    /// Calculates the similarity of `self` and `other` with the provided algorithm
    pub fn similarity_score(&self, other: &Term, similarity: &impl Similarity) -> f32 {
        similarity.calculate(self, other)
    }

    pub(crate) fn ontology(&self) -> &'a Ontology {
        self.ontology
    }
}

impl PartialEq for Term<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Term<'_> {}

/// Iterates the [`Term`]s of a [`TermGroup`]
pub struct Iter<'a> {
    inner: super::group::TermIds<'a>,
    ontology: &'a Ontology,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(inner: super::group::TermIds<'a>, ontology: &'a Ontology) -> Self {
        Self { inner, ontology }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Term<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|id| self.ontology.get_unchecked(id))
            .map(|term| Term::new(self.ontology, term))
    }
}
