//! Ancestor-closure subgraphs, annotated with per-node term counts
use std::collections::HashMap;

use tracing::debug;

use crate::term::{Term, TermGroup, TermId};
use crate::Ontology;

/// The minimal subgraph of the ontology covering a set of terms
///
/// The subgraph contains every term of the input set plus all of their
/// ancestors, and nothing else. Every retained node is annotated with the
/// number of input terms that contributed to its inclusion, i.e. the number
/// of input terms that are the node itself or one of its descendants.
///
/// The subgraph is an ephemeral, per-call view: it counts over the
/// ontology's cached ancestor closures and never copies or mutates the
/// shared graph.
///
/// # Examples
///
/// ```
/// use phenosim::{AnnotatedSubgraph, Ontology, TermId};
///
/// let mut ontology = Ontology::default();
/// let root = TermId::try_from("HP:0000001").unwrap();
/// let child = TermId::try_from("HP:0000002").unwrap();
/// ontology.insert_term(root, "Root").unwrap();
/// ontology.insert_term(child, "Child").unwrap();
/// ontology.add_parent(root, child);
/// ontology.create_cache();
///
/// let subgraph = AnnotatedSubgraph::new(&ontology, &["HP:0000002"]);
/// assert_eq!(subgraph.len(), 2);
/// assert_eq!(subgraph.count(root), 1);
/// assert_eq!(subgraph.count(child), 1);
/// ```
pub struct AnnotatedSubgraph<'a> {
    ontology: &'a Ontology,
    nodes: TermGroup,
    counts: HashMap<TermId, u32>,
}

impl<'a> AnnotatedSubgraph<'a> {
    /// Builds the annotated ancestor-closure subgraph of a raw term set
    ///
    /// Tokens are resolved like everywhere else in the crate: canonical
    /// IDs, alternate IDs, names and synonyms all work. Tokens the
    /// ontology does not know are skipped, so the returned subgraph simply
    /// does not reflect them.
    pub fn new(ontology: &'a Ontology, tokens: &[impl AsRef<str>]) -> Self {
        let mut nodes = TermGroup::new();
        let mut counts: HashMap<TermId, u32> = HashMap::new();

        for token in tokens {
            let token = token.as_ref();
            let Some(id) = ontology.resolve(token) else {
                debug!("Skipping {}: not part of the ontology", token);
                continue;
            };
            let term = ontology.get_unchecked(id);
            for ancestor in term.all_parents() {
                *counts.entry(ancestor).or_insert(0) += 1;
                nodes.insert(ancestor);
            }
            *counts.entry(id).or_insert(0) += 1;
            nodes.insert(id);
        }

        Self {
            ontology,
            nodes,
            counts,
        }
    }

    /// Returns the number of retained nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no input term could be resolved
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the [`TermId`]s of all retained nodes
    pub fn node_ids(&self) -> &TermGroup {
        &self.nodes
    }

    /// Returns how many input terms have this node as an ancestor (or are it)
    ///
    /// Nodes outside the subgraph have a count of 0.
    pub fn count(&self, id: TermId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Returns an iterator of the retained [`Term`]s with their counts
    pub fn terms(&self) -> impl Iterator<Item = (Term<'a>, u32)> + '_ {
        self.nodes.iter().map(|id| {
            let term = Term::new(self.ontology, self.ontology.get_unchecked(id));
            (term, self.counts[&id])
        })
    }

    /// Returns the `is-a` edges between retained nodes as `(child, parent)` pairs
    pub fn edges(&self) -> Vec<(TermId, TermId)> {
        let mut edges = Vec::new();
        for node in &self.nodes {
            for parent in self.ontology.get_unchecked(node).parents() {
                if self.nodes.contains(&parent) {
                    edges.push((node, parent));
                }
            }
        }
        edges
    }

    /// Returns the retained nodes labeled by display name instead of ID
    ///
    /// Alternate IDs were already folded into their canonical node during
    /// resolution, so every node has exactly one name.
    pub fn named_nodes(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.nodes.iter().map(|id| {
            let name = self.ontology.get_unchecked(id).name();
            (name, self.counts[&id])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///          HP:0000001 (Root)
    ///          /         \
    ///   HP:0000002      HP:0000003
    ///       |
    ///   HP:0000004
    /// ```
    fn toy() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term(1u32.into(), "Root").unwrap();
        ont.insert_term(2u32.into(), "Left").unwrap();
        ont.insert_term(3u32.into(), "Right").unwrap();
        ont.insert_term(4u32.into(), "Leaf").unwrap();
        ont.add_parent(1u32.into(), 2u32.into());
        ont.add_parent(1u32.into(), 3u32.into());
        ont.add_parent(2u32.into(), 4u32.into());
        ont.create_cache();
        ont
    }

    #[test]
    fn covers_exactly_the_ancestor_closure() {
        let ont = toy();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000004"]);
        let expected: TermGroup = [1u32.into(), 2u32.into(), 4u32.into()]
            .into_iter()
            .collect();
        assert_eq!(subgraph.node_ids(), &expected);
    }

    #[test]
    fn counts_multiplicity() {
        let ont = toy();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000004", "HP:0000003"]);
        assert_eq!(subgraph.count(1u32.into()), 2);
        assert_eq!(subgraph.count(2u32.into()), 1);
        assert_eq!(subgraph.count(3u32.into()), 1);
        assert_eq!(subgraph.count(4u32.into()), 1);
        // not part of the subgraph
        assert_eq!(subgraph.count(99u32.into()), 0);
    }

    #[test]
    fn absent_terms_are_ignored() {
        let ont = toy();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000003", "HP:7777777", "nonsense"]);
        let expected: TermGroup = [1u32.into(), 3u32.into()].into_iter().collect();
        assert_eq!(subgraph.node_ids(), &expected);

        let empty = AnnotatedSubgraph::new(&ont, &["HP:7777777"]);
        assert!(empty.is_empty());
    }

    #[test]
    fn alt_ids_resolve_to_canonical_nodes() {
        let mut ont = toy();
        ont.add_alt_id(4u32.into(), 40u32.into()).unwrap();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000040"]);
        let expected: TermGroup = [1u32.into(), 2u32.into(), 4u32.into()]
            .into_iter()
            .collect();
        assert_eq!(subgraph.node_ids(), &expected);
    }

    #[test]
    fn edges_stay_inside_the_subgraph() {
        let ont = toy();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000004"]);
        let mut edges = subgraph.edges();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                (2u32.into(), 1u32.into()),
                (4u32.into(), 2u32.into()),
            ]
        );
    }

    #[test]
    fn named_nodes() {
        let ont = toy();
        let subgraph = AnnotatedSubgraph::new(&ont, &["HP:0000002"]);
        let mut names: Vec<(&str, u32)> = subgraph.named_nodes().collect();
        names.sort();
        assert_eq!(names, vec![("Left", 1), ("Root", 1)]);
    }
}
