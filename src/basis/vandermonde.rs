//! Generalized Vandermonde matrix for nodal-modal transformations.
//!
//! The Vandermonde matrix V connects nodal and modal representations:
//! - V[i,j] = φ_j(x_i) where φ_j is the j-th basis polynomial and x_i the i-th node
//! - nodal_values = V * modal_coeffs
//! - modal_coeffs = V^{-1} * nodal_values
//!
//! The basis polynomials are normalized Legendre polynomials
//! φ_j(x) = sqrt((2j+1)/2) P_j(x), so that ∫ φ_i φ_j dx = δ_{ij} and the
//! modal mass matrix is the identity.

use crate::polynomial::{legendre, legendre_derivative};
use faer::{Mat, linalg::solvers::Solve};
use thiserror::Error;

// Tolerance on ‖A·A⁻¹ − I‖∞ used to reject ill-conditioned inversions.
const INVERSION_RESIDUAL_TOL: f64 = 1e-8;

/// Error type for basis construction.
#[derive(Debug, Error)]
pub enum BasisError {
    /// LU inversion produced non-finite entries or an unacceptable residual.
    #[error("singular or ill-conditioned {what} ({n}x{n}, residual {residual:.3e})")]
    SingularMatrix {
        what: &'static str,
        n: usize,
        residual: f64,
    },
}

/// Vandermonde matrix, its derivative and its inverse.
#[derive(Clone)]
pub struct Vandermonde {
    /// V[i,j] = φ_j(x_i)
    pub v: Mat<f64>,
    /// dV[i,j] = φ'_j(x_i)
    pub dv: Mat<f64>,
    /// Inverse of V (nodal to modal map).
    pub v_inv: Mat<f64>,
    /// Number of nodes (= number of modes).
    pub n: usize,
}

impl Vandermonde {
    /// Build the Vandermonde matrix, its derivative and its inverse for the
    /// given nodes.
    pub fn new(nodes: &[f64]) -> Result<Self, BasisError> {
        let n = nodes.len();

        let mut v = Mat::zeros(n, n);
        let mut dv = Mat::zeros(n, n);

        for (i, &x) in nodes.iter().enumerate() {
            for j in 0..n {
                let norm = ((2 * j + 1) as f64 / 2.0).sqrt();
                v[(i, j)] = norm * legendre(j, x);
                dv[(i, j)] = norm * legendre_derivative(j, x);
            }
        }

        let v_inv = invert_matrix(&v, "Vandermonde matrix")?;

        Ok(Self { v, dv, v_inv, n })
    }
}

/// Invert a square matrix by LU factorization with full pivoting, solving
/// against the identity column by column.
///
/// The inverse is validated before it is returned: non-finite entries or a
/// residual ‖A·A⁻¹ − I‖∞ above tolerance are reported as [`BasisError`].
pub(crate) fn invert_matrix(a: &Mat<f64>, what: &'static str) -> Result<Mat<f64>, BasisError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "only square matrices can be inverted");

    let lu = a.as_ref().full_piv_lu();
    let mut a_inv = Mat::zeros(n, n);

    for j in 0..n {
        let mut rhs = Mat::zeros(n, 1);
        rhs[(j, 0)] = 1.0;
        let col = lu.solve(&rhs);
        for i in 0..n {
            a_inv[(i, j)] = col[(i, 0)];
        }
    }

    // ‖A·A⁻¹ − I‖∞
    let mut residual: f64 = 0.0;
    let mut finite = true;
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[(i, k)] * a_inv[(k, j)];
            }
            if !sum.is_finite() {
                finite = false;
            }
            let expected = if i == j { 1.0 } else { 0.0 };
            residual = residual.max((sum - expected).abs());
        }
    }

    if !finite || residual > INVERSION_RESIDUAL_TOL {
        return Err(BasisError::SingularMatrix {
            what,
            n,
            residual,
        });
    }

    Ok(a_inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::QuadratureRule;

    #[test]
    fn test_vandermonde_inverse() {
        for n in 2..=7 {
            let rule = QuadratureRule::lobatto(n).unwrap();
            let vander = Vandermonde::new(&rule.nodes).unwrap();

            // V * V^{-1} = I
            for i in 0..n {
                for j in 0..n {
                    let mut sum = 0.0;
                    for k in 0..n {
                        sum += vander.v[(i, k)] * vander.v_inv[(k, j)];
                    }
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (sum - expected).abs() < 1e-11,
                        "V V^-1 != I at ({i},{j}) for n={n}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_nodal_modal_roundtrip() {
        let rule = QuadratureRule::lobatto(5).unwrap();
        let vander = Vandermonde::new(&rule.nodes).unwrap();
        let n = rule.n;

        let nodal: Vec<f64> = rule.nodes.iter().map(|&x| x.powi(3) - 0.5 * x).collect();

        // modal = V^{-1} * nodal
        let mut modal = vec![0.0; n];
        for i in 0..n {
            for j in 0..n {
                modal[i] += vander.v_inv[(i, j)] * nodal[j];
            }
        }

        // back to nodal
        let mut nodal_back = vec![0.0; n];
        for i in 0..n {
            for j in 0..n {
                nodal_back[i] += vander.v[(i, j)] * modal[j];
            }
        }

        for i in 0..n {
            assert!(
                (nodal[i] - nodal_back[i]).abs() < 1e-12,
                "roundtrip failed at node {i}"
            );
        }
    }

    #[test]
    fn test_singular_matrix_detected() {
        // Duplicate nodes make the Vandermonde matrix singular.
        let nodes = [-1.0, 0.0, 0.0, 1.0];
        assert!(matches!(
            Vandermonde::new(&nodes),
            Err(BasisError::SingularMatrix { .. })
        ));
    }
}
