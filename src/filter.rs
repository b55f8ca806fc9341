//! Policy-based exclusion of ontology subtrees from term collections
//!
//! Some ontology branches are too weakly informative or too correlated
//! with non-phenotypic confounds to be useful for similarity scoring.
//! The [`SubtreeFilter`] removes a configured set of subtrees (each an
//! excluded root term plus all of its descendants) from any term
//! collection, returning the same shape it received.
use tracing::debug;

use crate::term::{TermGroup, TermId};
use crate::Ontology;

/// Subtree roots that are excluded from similarity scoring by default
///
/// Behavioral, facial-morphology, digit-morphology and ear/eye-morphology
/// branches; a domain policy constant, not a general-purpose default.
pub const DEFAULT_EXCLUDED_ROOTS: [&str; 5] = [
    "HP:0000708", // Behavioral abnormality
    "HP:0000271", // Abnormality of the face
    "HP:0011297", // Abnormality of finger or toe
    "HP:0031703", // Abnormal ear morphology
    "HP:0012372", // Abnormal eye morphology
];

/// Removes configured ontology subtrees from term collections
///
/// The full descendant closure of every excluded root is computed once at
/// construction; filtering itself is a membership test per term.
///
/// # Examples
///
/// ```
/// use phenosim::filter::{FilterTerms, SubtreeFilter};
/// use phenosim::{Ontology, TermId};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(TermId::try_from("HP:0000001").unwrap(), "Root").unwrap();
/// ontology.insert_term(TermId::try_from("HP:0000002").unwrap(), "Unwanted").unwrap();
/// ontology.add_parent(
///     TermId::try_from("HP:0000001").unwrap(),
///     TermId::try_from("HP:0000002").unwrap(),
/// );
/// ontology.create_cache();
///
/// let filter = SubtreeFilter::new(&ontology, &["HP:0000002"]);
/// let mut terms = vec![String::from("HP:0000001"), String::from("HP:0000002")];
/// terms.filter_terms(&filter);
/// assert_eq!(terms, vec![String::from("HP:0000001")]);
/// ```
pub struct SubtreeFilter<'a> {
    ontology: &'a Ontology,
    excluded: TermGroup,
}

impl<'a> SubtreeFilter<'a> {
    /// Constructs a filter from a list of excluded root tokens
    ///
    /// Roots unknown to the ontology are skipped; an outdated exclusion
    /// list must not fail the pipeline.
    pub fn new(ontology: &'a Ontology, roots: &[impl AsRef<str>]) -> Self {
        let mut excluded = TermGroup::new();
        for root in roots {
            let root = root.as_ref();
            let Some(id) = ontology.resolve(root) else {
                debug!("Skipping excluded root {}: not part of the ontology", root);
                continue;
            };
            excluded.insert(id);
            for descendant in &ontology.descendants_of(id) {
                excluded.insert(descendant);
            }
        }
        Self { ontology, excluded }
    }

    /// Constructs a filter from [`DEFAULT_EXCLUDED_ROOTS`]
    pub fn default_exclusions(ontology: &'a Ontology) -> Self {
        Self::new(ontology, &DEFAULT_EXCLUDED_ROOTS)
    }

    /// Returns `true` if the term equals an excluded root or is a
    /// descendant of one
    pub fn is_excluded(&self, id: TermId) -> bool {
        self.excluded.contains(&id)
    }

    /// Returns `true` if the token resolves to an excluded term
    ///
    /// Unresolvable tokens are not excluded: the filter removes known-bad
    /// subtrees, it does not validate terms.
    pub fn excludes_token(&self, token: &str) -> bool {
        self.ontology
            .resolve(token)
            .map_or(false, |id| self.is_excluded(id))
    }

    /// Returns a new group without the excluded terms
    pub fn retain(&self, group: &TermGroup) -> TermGroup {
        group.iter().filter(|id| !self.is_excluded(*id)).collect()
    }
}

/// Filtering over the different shapes a term collection can take
///
/// Every implementation removes excluded terms in place and keeps the
/// shape of the collection unchanged.
pub trait FilterTerms {
    /// Removes every term that falls into an excluded subtree
    fn filter_terms(&mut self, filter: &SubtreeFilter);
}

impl FilterTerms for Vec<String> {
    fn filter_terms(&mut self, filter: &SubtreeFilter) {
        self.retain(|token| !filter.excludes_token(token));
    }
}

impl FilterTerms for TermGroup {
    fn filter_terms(&mut self, filter: &SubtreeFilter) {
        *self = filter.retain(self);
    }
}
