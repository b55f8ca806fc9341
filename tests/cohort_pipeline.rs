//! End-to-end tests of the full term-set similarity pipeline
use phenosim::cohort::Cohort;
use phenosim::filter::{FilterTerms, SubtreeFilter};
use phenosim::similarity::{Builtins, Similarity, StandardCombiner};
use phenosim::{Ontology, Term, TermId, TermSet};

/// A single root `R` with two direct children `C1` and `C2`
fn toy_ontology() -> Ontology {
    let mut ontology = Ontology::default();
    let root = TermId::try_from("HP:0000001").unwrap();
    let c1 = TermId::try_from("HP:0000002").unwrap();
    let c2 = TermId::try_from("HP:0000003").unwrap();

    ontology.insert_term(root, "R").unwrap();
    ontology.insert_term(c1, "C1").unwrap();
    ontology.insert_term(c2, "C2").unwrap();
    ontology.add_parent(root, c1);
    ontology.add_parent(root, c2);
    ontology.create_cache();

    ontology.set_information_content(root, 0.0).unwrap();
    ontology.set_information_content(c1, 2.0).unwrap();
    ontology.set_information_content(c2, 2.0).unwrap();
    ontology
}

/// 1.0 for identical terms, 0.5 for terms related through the hierarchy,
/// 0.0 otherwise; no information content required
struct StubScorer;

impl Similarity for StubScorer {
    fn calculate(&self, a: &Term, b: &Term) -> f32 {
        if a.id() == b.id() {
            1.0
        } else if !a.common_ancestor_ids(b).is_empty() {
            0.5
        } else {
            0.0
        }
    }
}

#[test]
fn toy_example_scores() {
    let ontology = toy_ontology();
    let combiner = StandardCombiner::default();

    let p1 = TermSet::from_tokens(&ontology, &["HP:0000002"]);
    let p2 = TermSet::from_tokens(&ontology, &["HP:0000003"]);

    // each side's single best match is the cross term
    assert_eq!(p1.similarity(&p2, &StubScorer, &combiner), 0.5);
    assert_eq!(p1.similarity(&p1, &StubScorer, &combiner), 1.0);
    assert_eq!(
        p1.similarity(&p2, &StubScorer, &combiner),
        p2.similarity(&p1, &StubScorer, &combiner)
    );
}

#[test]
fn exclusion_example() {
    let ontology = toy_ontology();
    let filter = SubtreeFilter::new(&ontology, &["HP:0000002"]);

    let mut terms = vec![
        String::from("HP:0000002"),
        String::from("HP:0000003"),
        String::from("unrelated-term"),
    ];
    terms.filter_terms(&filter);
    assert_eq!(
        terms,
        vec![String::from("HP:0000003"), String::from("unrelated-term")]
    );
}

#[test]
fn absent_only_sets_never_fail() {
    let ontology = toy_ontology();
    let combiner = StandardCombiner::default();
    let ghost = TermSet::from_tokens(&ontology, &["HP:7777777", "Mode of inheritance"]);
    let p1 = TermSet::from_tokens(&ontology, &["C1"]);

    assert_eq!(ghost.similarity(&p1, &StubScorer, &combiner), 0.0);
    assert_eq!(ghost.similarity(&ghost, &StubScorer, &combiner), 0.0);
}

#[test]
fn cohort_pipeline_with_named_methods() {
    let ontology = toy_ontology();
    let method: Builtins = "resnik".parse().unwrap();
    let combiner: StandardCombiner = "bma".parse().unwrap();

    let cohort = Cohort::from_term_lists(vec![
        vec![String::from("C1")],
        vec![String::from("C1"), String::from("C2")],
        vec![String::from("C2")],
        vec![String::from("R")],
    ]);

    let matrix = cohort.similarity_matrix(&ontology, None, &method, &combiner);
    assert_eq!(matrix.len(), 4);
    for i in 0..4 {
        for z in 0..4 {
            assert_eq!(matrix.get(i, z), matrix.get(z, i));
            assert!(matrix.get(i, z) >= 0.0);
        }
    }

    // Resnik of a term with itself is its own information content
    assert_eq!(matrix.get(0, 0), 2.0);

    let (train, test) = matrix.split_features(&[0, 1, 2], &[3], &[true, true, false]);
    assert_eq!(train.len(), 3);
    assert_eq!(test.len(), 1);

    let max = (0..4)
        .flat_map(|i| (0..4).map(move |z| (i, z)))
        .map(|(i, z)| matrix.get(i, z))
        .fold(0.0f32, f32::max);
    for row in train.iter().chain(&test) {
        assert!(row.cases >= 0.0 && row.cases <= max);
        assert!(row.controls >= 0.0 && row.controls <= max);
    }
}

#[test]
fn names_synonyms_and_alt_ids_mix() {
    let mut ontology = toy_ontology();
    let c1 = TermId::try_from("HP:0000002").unwrap();
    ontology.add_synonym(c1, "First child").unwrap();
    ontology
        .add_alt_id(c1, TermId::try_from("HP:0000200").unwrap())
        .unwrap();

    let combiner = StandardCombiner::default();
    let by_id = TermSet::from_tokens(&ontology, &["HP:0000002"]);
    let by_alias = TermSet::from_tokens(&ontology, &["First child", "HP:0000200", "C1"]);

    assert_eq!(by_alias.len(), 1);
    assert_eq!(by_id.similarity(&by_alias, &StubScorer, &combiner), 1.0);
}
