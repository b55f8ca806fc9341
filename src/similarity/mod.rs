//! Methods to calculate the similarity between two terms or sets of terms
//!
//! The atomic term-to-term score is a trait seam: any type implementing
//! [`Similarity`] can be injected into the set- and cohort-level
//! calculations. The crate ships the established information-content based
//! algorithms as builtins, selectable by name via [`Builtins`].
use std::str::FromStr;

use crate::matrix::Matrix;
use crate::{PhenoError, Term};

mod defaults;
pub use defaults::{GraphIc, Lin, Resnik};

/// Trait for similarity score calculation between two [`Term`]s
///
/// Implementations must return a non-negative score and must be symmetric
/// in their arguments.
pub trait Similarity {
    /// calculates the actual similarity between term a and term b
    fn calculate(&self, a: &Term, b: &Term) -> f32;
}

/// The builtin term-to-term similarity methods, selectable by name
///
/// # Examples
///
/// ```
/// use phenosim::similarity::Builtins;
///
/// let method: Builtins = "resnik".parse().unwrap();
/// assert!(matches!(method, Builtins::Resnik));
/// assert!("hrss".parse::<Builtins>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtins {
    /// Graph based information coefficient, see [`GraphIc`]
    GraphIc,
    /// Information content of the most informative common ancestor, see [`Resnik`]
    Resnik,
    /// Resnik scaled by the terms' own information content, see [`Lin`]
    Lin,
}

impl Similarity for Builtins {
    fn calculate(&self, a: &Term, b: &Term) -> f32 {
        match self {
            Builtins::GraphIc => GraphIc.calculate(a, b),
            Builtins::Resnik => Resnik.calculate(a, b),
            Builtins::Lin => Lin.calculate(a, b),
        }
    }
}

impl FromStr for Builtins {
    type Err = PhenoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graphic" => Ok(Builtins::GraphIc),
            "resnik" => Ok(Builtins::Resnik),
            "lin" => Ok(Builtins::Lin),
            _ => Err(PhenoError::UnknownMethod(s.to_string())),
        }
    }
}

/// Combines a matrix of term-to-term scores into one set-to-set score
///
/// This trait is the seam for custom aggregation strategies. The default
/// implementations take care of the empty-matrix case: when one or both
/// term sets are empty after resolution, the score is 0 and no aggregation
/// is performed.
pub trait SimilarityCombiner {
    /// This method implements the actual logic to calculate a single
    /// similarity score from a matrix of term-to-term similarity scores.
    fn combine(&self, m: &Matrix<f32>) -> f32;

    /// Combines the pairwise scores, normalizing degenerate input to `0.0`
    fn calculate(&self, m: &Matrix<f32>) -> f32 {
        if m.is_empty() {
            return 0.0;
        }
        self.combine(m)
    }

    /// Returns the best match of each row, i.e. each term of the first set
    fn row_maxes(&self, m: &Matrix<f32>) -> Vec<f32> {
        m.rows()
            .map(|row| row.iter().copied().fold(0.0, f32::max))
            .collect()
    }

    /// Returns the best match of each column, i.e. each term of the second set
    fn col_maxes(&self, m: &Matrix<f32>) -> Vec<f32> {
        m.cols()
            .map(|col| col.copied().fold(0.0, f32::max))
            .collect()
    }

    /// Returns the dimensions of the matrix as floats, `(rows, columns)`
    fn dim_f32(&self, m: &Matrix<f32>) -> (f32, f32) {
        let (rows, cols) = m.dim();
        (usize_to_f32(rows), usize_to_f32(cols))
    }
}

/// Default implementations for combining similarity scores
/// for comparison of two sets of terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardCombiner {
    /// funSimAvg algorithm from [Schlicker A, et. al., BMC Bioinf (2006)](https://pubmed.ncbi.nlm.nih.gov/16776819/)
    FunSimAvg,
    /// funSimMax algorithm from [Schlicker A, et. al., BMC Bioinf (2006)](https://pubmed.ncbi.nlm.nih.gov/16776819/)
    FunSimMax,
    /// Best-match symmetric average: the mean of every term's best
    /// cross-set match, taken over both directions
    Bma,
}

impl Default for StandardCombiner {
    fn default() -> Self {
        Self::Bma
    }
}

impl FromStr for StandardCombiner {
    type Err = PhenoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "funsimavg" => Ok(StandardCombiner::FunSimAvg),
            "funsimmax" => Ok(StandardCombiner::FunSimMax),
            "bma" => Ok(StandardCombiner::Bma),
            _ => Err(PhenoError::UnknownMethod(s.to_string())),
        }
    }
}

impl StandardCombiner {
    fn fun_sim_avg(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);
        let mut nom = row_maxes.iter().sum::<f32>() / rows;
        nom += col_maxes.iter().sum::<f32>() / cols;

        nom / 2.0
    }

    fn fun_sim_max(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        (row_maxes.iter().sum::<f32>() / rows).max(col_maxes.iter().sum::<f32>() / cols)
    }

    fn bma(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        (row_maxes.iter().sum::<f32>() + col_maxes.iter().sum::<f32>()) / (rows + cols)
    }
}

impl SimilarityCombiner for StandardCombiner {
    fn combine(&self, m: &Matrix<f32>) -> f32 {
        match self {
            StandardCombiner::FunSimAvg => self.fun_sim_avg(m),
            StandardCombiner::FunSimMax => self.fun_sim_max(m),
            StandardCombiner::Bma => self.bma(m),
        }
    }
}

/// Goes through `u16` instead of `as` so that absurdly large matrices
/// crash instead of silently losing precision
fn usize_to_f32(n: usize) -> f32 {
    <usize as TryInto<u16>>::try_into(n)
        .expect("Matrix too large")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bma_is_mean_of_best_matches() {
        // rows: [1.0, 0.5], [0.2, 0.8] -> row maxes 1.0, 0.8
        // cols: [1.0, 0.2], [0.5, 0.8] -> col maxes 1.0, 0.8
        let m = Matrix::new(2, 2, vec![1.0, 0.5, 0.2, 0.8]);
        let score = StandardCombiner::Bma.calculate(&m);
        assert!((score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn empty_matrix_scores_zero() {
        let m: Matrix<f32> = Matrix::new(0, 0, vec![]);
        assert_eq!(StandardCombiner::Bma.calculate(&m), 0.0);
        assert_eq!(StandardCombiner::FunSimAvg.calculate(&m), 0.0);
        assert_eq!(StandardCombiner::FunSimMax.calculate(&m), 0.0);
    }

    #[test]
    fn asymmetric_matrix() {
        // 1 x 2 matrix: row max 0.7; col maxes 0.7, 0.3
        let m = Matrix::new(1, 2, vec![0.7, 0.3]);
        let score = StandardCombiner::Bma.calculate(&m);
        assert!((score - (0.7 + 0.7 + 0.3) / 3.0).abs() < 1e-6);
    }

    #[test]
    fn parse_method_names() {
        assert_eq!("GraphIC".parse::<Builtins>().unwrap(), Builtins::GraphIc);
        assert_eq!(
            "BMA".parse::<StandardCombiner>().unwrap(),
            StandardCombiner::Bma
        );
        assert_eq!(
            "hrss".parse::<Builtins>(),
            Err(PhenoError::UnknownMethod(String::from("hrss")))
        );
    }
}
