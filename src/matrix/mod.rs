//! A minimal rectangular matrix for row- and column-based data access
//!
//! It backs the pairwise term-score grid of the set-similarity calculation
//! and the cohort similarity matrix. It is not meant as a general purpose
//! linear algebra type.
use std::fmt::Debug;

/// Row-major rectangular matrix with owned storage
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Constructs a new `Matrix` from row-major data
    ///
    /// # Panics
    ///
    /// Panics if the data length does not match `rows * cols`
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length must match matrix dimensions"
        );
        Self { rows, cols, data }
    }

    /// Returns the number of values in the matrix
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the matrix does not contain any values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the dimensions of the matrix, `(rows, columns)`
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns a reference to the value at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds
    pub fn get(&self, row: usize, col: usize) -> &T {
        assert!(row < self.rows && col < self.cols, "position out of bounds");
        &self.data[row * self.cols + col]
    }

    /// Returns a mutable reference to the value at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        assert!(row < self.rows && col < self.cols, "position out of bounds");
        &mut self.data[row * self.cols + col]
    }

    /// Returns an iterator over the rows of the matrix, each row a slice
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Returns an iterator over the columns of the matrix
    pub fn cols(&self) -> ColumnIterator<'_, T> {
        ColumnIterator {
            matrix: self,
            col: 0,
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Constructs a new `Matrix` with every value set to `value`
    pub fn from_element(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T: std::fmt::Display> Debug for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let v: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// Iterates through the columns, returning an Iterator over the column values
pub struct ColumnIterator<'a, T> {
    matrix: &'a Matrix<T>,
    col: usize,
}

impl<'a, T> Iterator for ColumnIterator<'a, T> {
    type Item = Column<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.matrix.cols {
            return None;
        }
        let iter = self.matrix.data[self.col..].iter().step_by(self.matrix.cols);
        self.col += 1;
        Some(Column { iter })
    }
}

/// A single column of a [`Matrix`]
pub struct Column<'a, T> {
    iter: std::iter::StepBy<std::slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Column<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
