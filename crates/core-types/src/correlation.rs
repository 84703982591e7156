use crate::error::CoreError;
use ndarray::{Array2, ArrayView2};
use serde::Serialize;

/// A square matrix of correlation coefficients between named assets.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn new(names: Vec<String>, values: Array2<f64>) -> Result<Self, CoreError> {
        let n = names.len();
        if values.dim() != (n, n) {
            return Err(CoreError::ShapeMismatch(format!(
                "correlation matrix for {n} assets must be {n}x{n}"
            )));
        }
        Ok(Self { names, values })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        self.at(i, j)
    }

    /// See [`upper_triangle`].
    pub fn upper_triangle(&self) -> Vec<f64> {
        upper_triangle(self.values.view())
    }
}

/// Entries strictly above the diagonal of a square matrix, row by row.
///
/// Each unordered pair `(i, j)` with `i < j` appears exactly once, ordered by
/// `i` then `j`, so averages over it are reproducible bit for bit.
pub fn upper_triangle(values: ArrayView2<'_, f64>) -> Vec<f64> {
    let n = values.nrows().min(values.ncols());
    let mut entries = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            entries.push(values[[i, j]]);
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_upper_triangle_order() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let m = CorrelationMatrix::new(
            names,
            array![[1.0, 0.1, 0.2], [0.1, 1.0, 0.3], [0.2, 0.3, 1.0]],
        )
        .unwrap();

        assert_eq!(m.upper_triangle(), vec![0.1, 0.2, 0.3]);
        assert_eq!(m.get("C", "B"), Some(0.3));
        assert_eq!(m.get("A", "Z"), None);
    }

    #[test]
    fn test_upper_triangle_of_small_matrices() {
        assert!(upper_triangle(array![[1.0]].view()).is_empty());
        assert!(upper_triangle(Array2::<f64>::zeros((0, 0)).view()).is_empty());
    }

    #[test]
    fn test_rejects_non_square() {
        let result = CorrelationMatrix::new(vec!["A".to_string()], array![[1.0, 0.0]]);
        assert!(matches!(result, Err(CoreError::ShapeMismatch(_))));
    }
}
