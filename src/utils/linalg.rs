//! Dense linear algebra for small symmetric systems.

use crate::error::{LandmarkError, Result};

/// Cholesky factor `L` of a symmetric positive definite matrix `A = L L'`.
#[derive(Debug, Clone)]
pub struct Cholesky {
    l: Vec<Vec<f64>>,
}

impl Cholesky {
    /// Factor `a`. Fails with `Computation` if `a` is not positive definite.
    pub fn factor(a: &[Vec<f64>]) -> Result<Self> {
        let n = a.len();
        if n == 0 {
            return Err(LandmarkError::EmptyData);
        }
        if let Some(row) = a.iter().find(|row| row.len() != n) {
            return Err(LandmarkError::DimensionMismatch {
                expected: n,
                got: row.len(),
            });
        }

        let mut l = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..=i {
                let mut sum = a[i][j];
                for k in 0..j {
                    sum -= l[i][k] * l[j][k];
                }

                if i == j {
                    if !(sum > 0.0) {
                        return Err(LandmarkError::Computation(
                            "matrix is not positive definite".to_string(),
                        ));
                    }
                    l[i][j] = sum.sqrt();
                } else {
                    l[i][j] = sum / l[j][j];
                }
            }
        }
        Ok(Self { l })
    }

    pub fn dim(&self) -> usize {
        self.l.len()
    }

    /// Solve `A x = b` with the stored factor.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.dim();
        if b.len() != n {
            return Err(LandmarkError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }
        let l = &self.l;

        // L y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..i {
                sum -= l[i][j] * y[j];
            }
            y[i] = sum / l[i][i];
        }

        // L' x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= l[j][i] * x[j];
            }
            x[i] = sum / l[i][i];
        }
        Ok(x)
    }
}

/// Solve a symmetric positive definite system `A x = b`.
pub fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
    Cholesky::factor(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_known_system() {
        // [[4, 2], [2, 3]] x = [2, 1] -> x = [0.5, 0]
        let a = vec![vec![4.0, 2.0], vec![2.0, 3.0]];
        let x = solve_symmetric(&a, &[2.0, 1.0]).unwrap();
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(x[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn factor_reused_for_several_right_hand_sides() {
        let a = vec![
            vec![6.0, 2.0, 1.0],
            vec![2.0, 5.0, 2.0],
            vec![1.0, 2.0, 4.0],
        ];
        let chol = Cholesky::factor(&a).unwrap();
        for b in [[1.0, 0.0, 0.0], [3.0, -1.0, 2.0]] {
            let x = chol.solve(&b).unwrap();
            for i in 0..3 {
                let ax: f64 = (0..3).map(|j| a[i][j] * x[j]).sum();
                assert_relative_eq!(ax, b[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn rejects_indefinite_matrix() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
        assert!(matches!(
            Cholesky::factor(&a),
            Err(LandmarkError::Computation(_))
        ));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(Cholesky::factor(&[]).is_err());
        assert!(Cholesky::factor(&[vec![1.0, 0.0]]).is_err());
        let chol = Cholesky::factor(&[vec![2.0]]).unwrap();
        assert!(chol.solve(&[1.0, 2.0]).is_err());
    }
}
