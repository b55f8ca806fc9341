//! Builtin similarity algorithms
//!
//! All algorithms operate on the externally supplied per-term information
//! content and can also be selected by name via [`crate::similarity::Builtins`].
use crate::similarity::Similarity;
use crate::Term;

/// Similarity score from Resnik
///
/// The information content of the most informative common ancestor of the
/// two terms. If one term is an ancestor of the other, the ancestor's own
/// information content is a candidate as well.
///
/// For a detailed description see [Resnik P, Proceedings of the 14th IJCAI, (1995)](https://www.ijcai.org/Proceedings/95-1/Papers/059.pdf)
#[derive(Default, Debug)]
pub struct Resnik;

impl Similarity for Resnik {
    fn calculate(&self, a: &Term, b: &Term) -> f32 {
        let ontology = a.ontology();
        a.common_ancestor_ids(b)
            .iter()
            .map(|id| ontology.get_unchecked(id).information_content())
            .fold(0.0, f32::max)
    }
}

/// Similarity score from Lin
///
/// For a detailed description see [Lin D, Proceedings of the 15th ICML, (1998)](https://dl.acm.org/doi/10.5555/645527.657297)
#[derive(Default, Debug)]
pub struct Lin;

impl Similarity for Lin {
    fn calculate(&self, a: &Term, b: &Term) -> f32 {
        let ic_combined = a.information_content() + b.information_content();

        if ic_combined == 0.0 {
            return 0.0;
        }

        let resnik = Resnik.calculate(a, b);

        2.0 * resnik / ic_combined
    }
}

// Clippy thinks the `PLoS` is a struct or should have backticks for some reason
#[allow(clippy::doc_markdown)]
/// Graph based Information coefficient similarity
///
/// For a detailed description see [Deng Y, et. al., PLoS One, (2015)](https://pubmed.ncbi.nlm.nih.gov/25664462/)
#[derive(Default, Debug)]
pub struct GraphIc;

impl Similarity for GraphIc {
    fn calculate(&self, a: &Term, b: &Term) -> f32 {
        if a.id() == b.id() {
            return 1.0;
        }

        let ontology = a.ontology();

        let ic_union: f32 = a
            .union_ancestor_ids(b)
            .iter()
            .map(|id| ontology.get_unchecked(id).information_content())
            .sum();

        if ic_union == 0.0 {
            return 0.0;
        }

        let ic_common: f32 = a
            .common_ancestor_ids(b)
            .iter()
            .map(|id| ontology.get_unchecked(id).information_content())
            .sum();

        ic_common / ic_union
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ontology, TermId};

    /// Root with two children, IC increasing with depth
    fn toy() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term(1u32.into(), "Root").unwrap();
        ont.insert_term(2u32.into(), "ChildA").unwrap();
        ont.insert_term(3u32.into(), "ChildB").unwrap();
        ont.insert_term(4u32.into(), "GrandchildA").unwrap();
        ont.add_parent(1u32.into(), 2u32.into());
        ont.add_parent(1u32.into(), 3u32.into());
        ont.add_parent(2u32.into(), 4u32.into());
        ont.create_cache();
        ont.set_information_content(1u32.into(), 0.5).unwrap();
        ont.set_information_content(2u32.into(), 2.0).unwrap();
        ont.set_information_content(3u32.into(), 2.5).unwrap();
        ont.set_information_content(4u32.into(), 4.0).unwrap();
        ont
    }

    fn term(ont: &Ontology, id: u32) -> Term<'_> {
        ont.term(TermId::from(id)).unwrap()
    }

    #[test]
    fn resnik_siblings() {
        let ont = toy();
        let a = term(&ont, 2);
        let b = term(&ont, 3);
        // only common ancestor is the root
        assert_eq!(Resnik.calculate(&a, &b), 0.5);
    }

    #[test]
    fn resnik_ancestor_chain() {
        let ont = toy();
        let parent = term(&ont, 2);
        let child = term(&ont, 4);
        // the parent itself is the most informative common ancestor
        assert_eq!(Resnik.calculate(&parent, &child), 2.0);
        assert_eq!(Resnik.calculate(&child, &parent), 2.0);
    }

    #[test]
    fn lin_scales_by_own_ic() {
        let ont = toy();
        let parent = term(&ont, 2);
        let child = term(&ont, 4);
        let expected = 2.0 * 2.0 / (2.0 + 4.0);
        assert!((Lin.calculate(&parent, &child) - expected).abs() < 1e-6);
    }

    #[test]
    fn graphic_identity_and_symmetry() {
        let ont = toy();
        let a = term(&ont, 2);
        let b = term(&ont, 3);
        assert_eq!(GraphIc.calculate(&a, &a), 1.0);
        assert_eq!(GraphIc.calculate(&a, &b), GraphIc.calculate(&b, &a));
        // union ancestors == common ancestors == {root}, so the ratio is 1
        assert_eq!(GraphIc.calculate(&a, &b), 1.0);
    }

    #[test]
    fn graphic_partial_overlap() {
        let ont = toy();
        let b = term(&ont, 3);
        let grandchild = term(&ont, 4);
        // union ancestors: root (0.5) + childA (2.0); common: root (0.5)
        let expected = 0.5 / 2.5;
        assert!((GraphIc.calculate(&b, &grandchild) - expected).abs() < 1e-6);
    }
}
