use std::collections::HashMap;
use std::ops::BitOr;

use core::fmt::Debug;

use crate::term::{Iter, Term, TermGroup, TermId, TermInternal};
use crate::{PhenoError, PhenoResult};

mod termarena;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` holds the full phenotype term graph and its alias index
///
/// Terms are connected to each other in a directed `is-a` relationship;
/// every term except the root has at least one parent term. On top of the
/// graph, the `Ontology` maintains the lookup structures to map
/// human-readable names, synonyms and deprecated alternate IDs back to the
/// canonical [`TermId`] of the term they describe.
///
/// The `Ontology` is built once, through the builder methods below, and is
/// treated as immutable afterwards. Subgraphs, term sets and similarity
/// scores all borrow it read-only, so any number of them can be derived
/// concurrently from the same graph. Multiple `Ontology` values (e.g.
/// different ontology releases) can coexist in one process.
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ TERM : contains
///     TERM ||--|{ TERM : is_a
///     TERM {
///         TermId id
///         str name
///         f32 information_content
///     }
///     ONTOLOGY {
///         map names
///         map synonyms
///         map alt_ids
///     }
/// ```
///
/// # Construction
///
/// 1. construct an empty Ontology with [`Ontology::default`]
/// 2. add all terms with [`Ontology::insert_term`]
/// 3. connect terms to their parents with [`Ontology::add_parent`]
/// 4. register synonyms and alternate IDs with [`Ontology::add_synonym`]
///    and [`Ontology::add_alt_id`]
/// 5. cache the ancestor closures with [`Ontology::create_cache`]
/// 6. record the externally computed information content per term with
///    [`Ontology::set_information_content`]
///
/// Parsing of `hp.obo` or annotation files is deliberately not part of this
/// crate; callers bring the graph in whatever way fits their pipeline.
#[derive(Default)]
pub struct Ontology {
    terms: Arena,
    ids: Vec<TermId>,
    names: HashMap<String, TermId>,
    synonyms: HashMap<String, TermId>,
    alt_ids: HashMap<TermId, TermId>,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

/// Methods for setting up and building the Ontology
impl Ontology {
    /// Adds a term to the ontology and registers its display name
    ///
    /// Inserting the same [`TermId`] twice is a no-op.
    pub fn insert_term(&mut self, id: TermId, name: &str) -> PhenoResult<TermId> {
        if self.terms.get(id).is_some() {
            return Ok(id);
        }
        self.terms.insert(TermInternal::new(id, name));
        self.ids.push(id);
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Records an `is-a` relationship between `child_id` and `parent_id`
    ///
    /// # Panics
    ///
    /// Panics if either term was not inserted before
    pub fn add_parent(&mut self, parent_id: TermId, child_id: TermId) {
        let parent = self.terms.get_unchecked_mut(parent_id);
        parent.add_child(child_id);

        let child = self.terms.get_unchecked_mut(child_id);
        child.add_parent(parent_id);
    }

    /// Registers a synonym for an existing term
    ///
    /// # Errors
    ///
    /// - [`PhenoError::DoesNotExist`]: The term is not present in the ontology
    pub fn add_synonym(&mut self, id: TermId, synonym: &str) -> PhenoResult<()> {
        if self.terms.get(id).is_none() {
            return Err(PhenoError::DoesNotExist);
        }
        self.synonyms.insert(synonym.to_string(), id);
        Ok(())
    }

    /// Registers a deprecated alternate ID that aliases an existing term
    ///
    /// # Errors
    ///
    /// - [`PhenoError::DoesNotExist`]: The term is not present in the ontology
    pub fn add_alt_id(&mut self, id: TermId, alt_id: TermId) -> PhenoResult<()> {
        if self.terms.get(id).is_none() {
            return Err(PhenoError::DoesNotExist);
        }
        self.alt_ids.insert(alt_id, id);
        Ok(())
    }

    /// Sets the externally computed information content of a term
    ///
    /// # Errors
    ///
    /// - [`PhenoError::DoesNotExist`]: The term is not present in the ontology
    pub fn set_information_content(&mut self, id: TermId, ic: f32) -> PhenoResult<()> {
        let term = self.terms.get_mut(id).ok_or(PhenoError::DoesNotExist)?;
        *term.information_content_mut() = ic;
        Ok(())
    }

    /// Caches the full ancestor closure of every term
    ///
    /// Must be called once after all terms and parent connections are added.
    /// All hierarchy-based operations (subgraphs, subtree filters, ancestor
    /// based similarity) rely on this cache instead of traversing the graph
    /// on every call.
    pub fn create_cache(&mut self) {
        let term_ids = self.ids.clone();

        for id in term_ids {
            self.create_cache_of_grandparents(id);
        }
    }

    fn all_grandparents(&mut self, term_id: TermId) -> &TermGroup {
        // Recursion with interior lookups; split in two scopes to
        // satisfy the borrow checker
        let cached = {
            let term = self.terms.get_unchecked(term_id);
            term.parents_cached()
        };
        if !cached {
            self.create_cache_of_grandparents(term_id);
        }
        let term = self.terms.get_unchecked(term_id);
        term.all_parents()
    }

    fn create_cache_of_grandparents(&mut self, term_id: TermId) {
        let term = self.terms.get_unchecked(term_id);
        let parents = term.parents().clone();
        let mut res = TermGroup::default();
        for parent in &parents {
            let grandparents = self.all_grandparents(parent);
            for gp in grandparents {
                res.insert(gp);
            }
        }
        let term = self.terms.get_unchecked_mut(term_id);
        *term.all_parents_mut() = res.bitor(&parents);
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Returns the number of terms in the ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the canonical [`TermId`] is present in the ontology
    ///
    /// Alternate IDs are not considered, use [`Ontology::resolve`] for those.
    pub fn contains(&self, id: TermId) -> bool {
        self.terms.get(id).is_some()
    }

    /// Returns the [`Term`] with the given [`TermId`], if present
    pub fn term(&self, id: TermId) -> Option<Term<'_>> {
        self.terms.get(id).map(|term| Term::new(self, term))
    }

    /// Returns the display name of a term
    ///
    /// Alternate IDs inherit the name of their canonical term.
    pub fn name_of(&self, id: TermId) -> Option<&str> {
        match self.terms.get(id) {
            Some(term) => Some(term.name()),
            None => self
                .alt_ids
                .get(&id)
                .map(|canonical| self.terms.get_unchecked(*canonical).name()),
        }
    }

    /// Maps a raw token to the canonical [`TermId`] it describes
    ///
    /// The token can be a canonical ID, a deprecated alternate ID, the
    /// display name of a term or one of its synonyms. Tokens that follow
    /// the ID prefix convention are never looked up by name, so a display
    /// name colliding with an ID string cannot shadow a term.
    ///
    /// Returns `None` for tokens unknown to this ontology build. Callers
    /// are expected to drop such tokens rather than fail: upstream
    /// phenotype data routinely contains terms from excluded branches.
    ///
    /// # Examples
    ///
    /// ```
    /// use phenosim::{Ontology, TermId};
    ///
    /// let mut ontology = Ontology::default();
    /// let seizure = TermId::try_from("HP:0001250").unwrap();
    /// ontology.insert_term(seizure, "Seizure").unwrap();
    /// ontology.add_synonym(seizure, "Epileptic seizure").unwrap();
    ///
    /// assert_eq!(ontology.resolve("HP:0001250"), Some(seizure));
    /// assert_eq!(ontology.resolve("Seizure"), Some(seizure));
    /// assert_eq!(ontology.resolve("Epileptic seizure"), Some(seizure));
    /// assert_eq!(ontology.resolve("Not a phenotype"), None);
    /// ```
    pub fn resolve(&self, token: &str) -> Option<TermId> {
        if TermId::looks_like_id(token) {
            let id = TermId::try_from(token).ok()?;
            if self.contains(id) {
                return Some(id);
            }
            return self.alt_ids.get(&id).copied();
        }
        self.names
            .get(token)
            .or_else(|| self.synonyms.get(token))
            .copied()
    }

    /// Returns all descendants of a term, excluding the term itself
    ///
    /// The traversal follows the `is-a` edges in the forward direction,
    /// from parent to child.
    pub fn descendants_of(&self, id: TermId) -> TermGroup {
        let mut res = TermGroup::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(term) = self.terms.get(current) else {
                continue;
            };
            for child in term.children() {
                if res.insert(child) {
                    stack.push(child);
                }
            }
        }
        res
    }

    /// Returns an iterator over all [`Term`]s of the ontology
    pub fn terms(&self) -> OntologyIterator<'_> {
        OntologyIterator {
            inner: self.ids.iter(),
            ontology: self,
        }
    }

    pub(crate) fn get(&self, id: TermId) -> Option<&TermInternal> {
        self.terms.get(id)
    }

    pub(crate) fn get_unchecked(&self, id: TermId) -> &TermInternal {
        self.terms.get_unchecked(id)
    }

    pub(crate) fn iter_group<'a>(&'a self, group: &'a TermGroup) -> Iter<'a> {
        Iter::new(group.iter(), self)
    }
}

/// Iterates over every [`Term`] of the [`Ontology`] in insertion order
pub struct OntologyIterator<'a> {
    inner: std::slice::Iter<'a, TermId>,
    ontology: &'a Ontology,
}

impl<'a> Iterator for OntologyIterator<'a> {
    type Item = Term<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|id| Term::new(self.ontology, self.ontology.get_unchecked(*id)))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = Term<'a>;
    type IntoIter = OntologyIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms()
    }
}
