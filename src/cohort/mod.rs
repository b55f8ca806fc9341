//! Cohort-wide similarity matrices and train/test featurization
//!
//! A [`Cohort`] is a table of individuals, each carrying an optional
//! numeric feature vector and a list of raw phenotype term tokens (or a
//! one-hot encoding that an implementation of [`BinaryDecoder`] turns back
//! into tokens). From a cohort, the full N×N pairwise similarity matrix is
//! computed, which in turn is reduced to two summary features per
//! individual for classification: the mean similarity to the case group
//! and to the control group of the training split.
use tracing::debug;

use crate::filter::{FilterTerms, SubtreeFilter};
use crate::matrix::Matrix;
use crate::similarity::{Similarity, SimilarityCombiner};
use crate::{Ontology, TermSet};

/// Inverse transform from a binarized row back to term tokens
///
/// The seam for cohort inputs whose term column is one-hot encoded
/// rather than materialized as token lists.
pub trait BinaryDecoder {
    /// Recovers the term tokens encoded in a numeric row
    fn inverse_transform(&self, row: &[f32]) -> Vec<String>;
}

/// [`BinaryDecoder`] for one-hot encodings over a fixed term vocabulary
///
/// The vocabulary is aligned with the tail of each row, so rows may carry
/// additional feature columns in front of the encoding.
pub struct OneHotDecoder {
    vocabulary: Vec<String>,
}

impl OneHotDecoder {
    /// Constructs a decoder; `vocabulary[i]` is the token of encoding column `i`
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self { vocabulary }
    }
}

impl BinaryDecoder for OneHotDecoder {
    fn inverse_transform(&self, row: &[f32]) -> Vec<String> {
        let start = row.len().saturating_sub(self.vocabulary.len());
        row[start..]
            .iter()
            .zip(&self.vocabulary)
            .filter(|(value, _)| **value > 0.5)
            .map(|(_, token)| token.clone())
            .collect()
    }
}

/// One row of a [`Cohort`]: an individual with raw term tokens
#[derive(Debug, Default, Clone)]
pub struct Individual {
    features: Vec<f32>,
    terms: Vec<String>,
}

impl Individual {
    /// Constructs an `Individual` from raw term tokens
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            features: Vec::new(),
            terms,
        }
    }

    /// Constructs an `Individual` that also carries a numeric feature vector
    ///
    /// The feature vector is opaque to this crate and simply travels with
    /// the individual.
    pub fn with_features(features: Vec<f32>, terms: Vec<String>) -> Self {
        Self { features, terms }
    }

    /// Returns the raw term tokens
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the numeric feature vector
    pub fn features(&self) -> &[f32] {
        &self.features
    }
}

impl FilterTerms for Individual {
    fn filter_terms(&mut self, filter: &SubtreeFilter) {
        self.terms.filter_terms(filter);
    }
}

/// A cohort of individuals, each described by a phenotype term set
#[derive(Debug, Default)]
pub struct Cohort {
    individuals: Vec<Individual>,
}

impl Cohort {
    /// Constructs an empty `Cohort`
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a `Cohort` from one term-token list per individual
    pub fn from_term_lists(lists: Vec<Vec<String>>) -> Self {
        Self {
            individuals: lists.into_iter().map(Individual::new).collect(),
        }
    }

    /// Constructs a `Cohort` from binarized rows, recovering the term
    /// lists through the decoder
    pub fn from_binarized(rows: &[Vec<f32>], decoder: &impl BinaryDecoder) -> Self {
        Self {
            individuals: rows
                .iter()
                .map(|row| Individual::new(decoder.inverse_transform(row)))
                .collect(),
        }
    }

    /// Adds an individual to the cohort
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Returns the number of individuals
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the cohort has no individuals
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns the individuals of the cohort
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Computes the full N×N pairwise similarity matrix of the cohort
    ///
    /// Every individual's term list is filtered (when a [`SubtreeFilter`]
    /// is given), resolved and deduplicated once. Every ordered pair of
    /// the grid is then scored, including the diagonal: self-similarity is
    /// whatever the scorer produces for identical sets, it is not forced
    /// to a fixed value.
    ///
    /// This is the O(N²) hot path of the crate; each entry costs
    /// O(|terms|²) calls into the term scorer.
    pub fn similarity_matrix(
        &self,
        ontology: &Ontology,
        filter: Option<&SubtreeFilter>,
        similarity: &impl Similarity,
        combiner: &impl SimilarityCombiner,
    ) -> SimilarityMatrix {
        let sets: Vec<TermSet> = self
            .individuals
            .iter()
            .map(|individual| {
                let mut tokens = individual.terms.clone();
                if let Some(filter) = filter {
                    tokens.filter_terms(filter);
                }
                TermSet::from_tokens(ontology, &tokens)
            })
            .collect();

        let n = sets.len();
        let mut matrix = Matrix::from_element(n, n, 0.0f32);
        for (i, set_i) in sets.iter().enumerate() {
            debug!("Scoring individual {} of {}", i + 1, n);
            for (z, set_z) in sets.iter().enumerate() {
                *matrix.get_mut(i, z) = set_i.similarity(set_z, similarity, combiner);
            }
        }
        SimilarityMatrix { inner: matrix }
    }
}

impl FilterTerms for Cohort {
    fn filter_terms(&mut self, filter: &SubtreeFilter) {
        for individual in &mut self.individuals {
            individual.filter_terms(filter);
        }
    }
}

/// The mean similarity of one individual to the case and control groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMeans {
    /// Mean similarity to the positively labeled training individuals
    pub cases: f32,
    /// Mean similarity to the negatively labeled training individuals
    pub controls: f32,
}

/// The symmetric pairwise similarity matrix of a cohort
#[derive(Debug)]
pub struct SimilarityMatrix {
    inner: Matrix<f32>,
}

impl SimilarityMatrix {
    /// Wraps an externally computed similarity matrix
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square
    pub fn new(inner: Matrix<f32>) -> Self {
        let (rows, cols) = inner.dim();
        assert_eq!(rows, cols, "similarity matrix must be square");
        Self { inner }
    }

    /// Returns the cohort size N
    pub fn len(&self) -> usize {
        self.inner.dim().0
    }

    /// Returns `true` for the matrix of an empty cohort
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the similarity between individuals `i` and `z`
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds
    pub fn get(&self, i: usize, z: usize) -> f32 {
        *self.inner.get(i, z)
    }

    /// Returns an iterator over the rows of the matrix
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.inner.rows()
    }

    /// Derives the two similarity summary features per individual for a
    /// train/test split
    ///
    /// `train_index` and `test_index` select rows (and, for the training
    /// side, columns) of the matrix; `train_labels` holds the case (`true`)
    /// / control (`false`) label of each training individual, aligned with
    /// `train_index`. Returned are one [`ClassMeans`] row per training
    /// individual and one per test individual, in input index order.
    ///
    /// A label group without members yields a mean of `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if `train_labels` and `train_index` differ in length or any
    /// index exceeds the matrix dimension. Inconsistent split input is a
    /// caller bug, not a recoverable runtime condition.
    pub fn split_features(
        &self,
        train_index: &[usize],
        test_index: &[usize],
        train_labels: &[bool],
    ) -> (Vec<ClassMeans>, Vec<ClassMeans>) {
        assert_eq!(
            train_index.len(),
            train_labels.len(),
            "one label per training individual required"
        );
        let n = self.len();
        assert!(
            train_index.iter().chain(test_index).all(|idx| *idx < n),
            "split index out of bounds"
        );

        let train = self.block_means(train_index, train_index, train_labels);
        let test = self.block_means(test_index, train_index, train_labels);
        (train, test)
    }

    fn block_means(
        &self,
        rows: &[usize],
        train_index: &[usize],
        train_labels: &[bool],
    ) -> Vec<ClassMeans> {
        rows.iter()
            .map(|row| {
                let mut sums = [0.0f32; 2];
                let mut counts = [0usize; 2];
                for (col, label) in train_index.iter().zip(train_labels) {
                    let class = usize::from(*label);
                    sums[class] += self.get(*row, *col);
                    counts[class] += 1;
                }
                ClassMeans {
                    cases: mean(sums[1], counts[1]),
                    controls: mean(sums[0], counts[0]),
                }
            })
            .collect()
    }
}

fn mean(sum: f32, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::StandardCombiner;
    use crate::Term;

    struct Stub;

    impl Similarity for Stub {
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

    fn toy() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term(1u32.into(), "Root").unwrap();
        ont.insert_term(2u32.into(), "C1").unwrap();
        ont.insert_term(3u32.into(), "C2").unwrap();
        ont.add_parent(1u32.into(), 2u32.into());
        ont.add_parent(1u32.into(), 3u32.into());
        ont.create_cache();
        ont
    }

    fn tokens(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matrix_is_square_and_symmetric() {
        let ont = toy();
        let cohort = Cohort::from_term_lists(vec![
            tokens(&["HP:0000002"]),
            tokens(&["HP:0000003"]),
            tokens(&["HP:0000002", "HP:0000003"]),
        ]);
        let matrix =
            cohort.similarity_matrix(&ont, None, &Stub, &StandardCombiner::default());
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            for z in 0..3 {
                assert_eq!(matrix.get(i, z), matrix.get(z, i));
            }
        }
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(0, 1), 0.5);
    }

    #[test]
    fn one_hot_rows_are_decoded() {
        let decoder = OneHotDecoder::new(tokens(&["HP:0000002", "HP:0000003"]));
        // first row carries two leading feature columns
        let rows = vec![vec![7.5, 3.2, 1.0, 0.0], vec![0.0, 1.0]];
        let cohort = Cohort::from_binarized(&rows, &decoder);
        assert_eq!(cohort.individuals()[0].terms(), ["HP:0000002"]);
        assert_eq!(cohort.individuals()[1].terms(), ["HP:0000003"]);
    }

    #[test]
    fn filter_is_applied_before_scoring() {
        let ont = toy();
        let filter = SubtreeFilter::new(&ont, &["HP:0000002"]);
        let cohort = Cohort::from_term_lists(vec![
            tokens(&["HP:0000002"]),
            tokens(&["HP:0000002"]),
        ]);
        let matrix =
            cohort.similarity_matrix(&ont, Some(&filter), &Stub, &StandardCombiner::default());
        // both term sets are empty after filtering
        assert_eq!(matrix.get(0, 1), 0.0);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn split_features_shapes_and_values() {
        // 4 individuals; train = [0, 1, 2] with labels [case, control, case]
        let data = vec![
            1.0, 0.2, 0.4, 0.6, //
            0.2, 1.0, 0.8, 0.1, //
            0.4, 0.8, 1.0, 0.3, //
            0.6, 0.1, 0.3, 1.0, //
        ];
        let matrix = SimilarityMatrix::new(Matrix::new(4, 4, data));
        let (train, test) =
            matrix.split_features(&[0, 1, 2], &[3], &[true, false, true]);

        assert_eq!(train.len(), 3);
        assert_eq!(test.len(), 1);

        // individual 0: cases = mean(M[0,0], M[0,2]), controls = M[0,1]
        assert!((train[0].cases - 0.7).abs() < 1e-6);
        assert!((train[0].controls - 0.2).abs() < 1e-6);
        // test individual 3 against the same training partition
        assert!((test[0].cases - (0.6 + 0.3) / 2.0).abs() < 1e-6);
        assert!((test[0].controls - 0.1).abs() < 1e-6);
    }

    #[test]
    fn single_test_row_is_a_block() {
        let matrix = SimilarityMatrix::new(Matrix::new(2, 2, vec![1.0, 0.4, 0.4, 1.0]));
        let (_, test) = matrix.split_features(&[0], &[1], &[true]);
        assert_eq!(test.len(), 1);
        assert!((test[0].cases - 0.4).abs() < 1e-6);
        assert_eq!(test[0].controls, 0.0);
    }

    #[test]
    #[should_panic(expected = "one label per training individual")]
    fn label_length_mismatch_is_fatal() {
        let matrix = SimilarityMatrix::new(Matrix::new(2, 2, vec![1.0, 0.4, 0.4, 1.0]));
        let _ = matrix.split_features(&[0, 1], &[], &[true]);
    }

    #[test]
    #[should_panic(expected = "split index out of bounds")]
    fn index_out_of_bounds_is_fatal() {
        let matrix = SimilarityMatrix::new(Matrix::new(2, 2, vec![1.0, 0.4, 0.4, 1.0]));
        let _ = matrix.split_features(&[0, 5], &[], &[true, false]);
    }
}
