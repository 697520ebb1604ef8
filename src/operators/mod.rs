//! Per-element spectral operators.
//!
//! The [`ReferenceElement`] bundles everything a cell needs for residual
//! assembly on the reference interval [-1, 1]:
//! - quadrature nodes and weights (endpoint-inclusive Lobatto rule),
//! - the generalized Vandermonde matrix and its derivative,
//! - mass matrix and its inverse,
//! - the differentiation operator D = dV · V⁻¹,
//! - the boundary-lifting operator M⁻¹ · B.
//!
//! Differentiation is performed in modal space: V⁻¹ maps nodal values to
//! modal coefficients, dV evaluates the differentiated basis back at the
//! nodes. The product is factored once per polynomial order into a dense
//! matrix applied by plain matrix-vector products.

use crate::basis::{BasisError, Vandermonde, invert_matrix};
use crate::quadrature::{QuadratureError, QuadratureRule};
use faer::Mat;
use thiserror::Error;

/// Error type for reference-element construction.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Quadrature node solve failed.
    #[error(transparent)]
    Quadrature(#[from] QuadratureError),

    /// Basis construction or operator inversion failed.
    #[error(transparent)]
    Basis(#[from] BasisError),
}

/// Spectral operators shared read-only by every cell of a given order.
#[derive(Clone)]
pub struct ReferenceElement {
    /// Number of quadrature points per element.
    pub n: usize,
    /// Polynomial order (n - 1).
    pub order: usize,
    /// Node coordinates on [-1, 1].
    pub nodes: Vec<f64>,
    /// Quadrature weights.
    pub weights: Vec<f64>,
    /// Vandermonde matrix, derivative and inverse.
    pub vandermonde: Vandermonde,
    /// Mass matrix M = (V Vᵀ)⁻¹, symmetric positive definite.
    pub mass: Mat<f64>,
    /// Inverse mass matrix M⁻¹ = V Vᵀ.
    pub mass_inv: Mat<f64>,
    /// Differentiation operator D = dV · V⁻¹.
    pub diff: Mat<f64>,
    /// Boundary-lifting operator M⁻¹ · B, where B is zero except
    /// B[0,0] = -1 and B[n-1,n-1] = +1.
    pub lift: Mat<f64>,
}

impl ReferenceElement {
    /// Build the operator set for `n_nodes` quadrature points
    /// (polynomial order `n_nodes - 1`).
    pub fn new(n_nodes: usize) -> Result<Self, OperatorError> {
        let rule = QuadratureRule::lobatto(n_nodes)?;
        let n = rule.n;

        let vandermonde = Vandermonde::new(&rule.nodes)?;

        // With the orthonormal modal basis, M⁻¹ = V Vᵀ.
        let mass_inv = matmul_transpose(&vandermonde.v, &vandermonde.v);
        let mass = invert_matrix(&mass_inv, "mass matrix")?;

        let diff = matmul(&vandermonde.dv, &vandermonde.v_inv);

        // Signed boundary selector: picks the two endpoint rows with the
        // outward sign of the 1D face normals.
        let mut b = Mat::zeros(n, n);
        b[(0, 0)] = -1.0;
        b[(n - 1, n - 1)] = 1.0;
        let lift = matmul(&mass_inv, &b);

        Ok(Self {
            n,
            order: n - 1,
            nodes: rule.nodes,
            weights: rule.weights,
            vandermonde,
            mass,
            mass_inv,
            diff,
            lift,
        })
    }

    /// Apply the differentiation operator to nodal samples.
    pub fn differentiate(&self, nodal: &[f64]) -> Vec<f64> {
        assert_eq!(nodal.len(), self.n, "nodal sample count must match nodes");
        let mut out = vec![0.0; self.n];
        for i in 0..self.n {
            for j in 0..self.n {
                out[i] += self.diff[(i, j)] * nodal[j];
            }
        }
        out
    }
}

fn matmul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let (m, k) = (a.nrows(), a.ncols());
    let n = b.ncols();
    assert_eq!(k, b.nrows(), "inner dimensions must match");

    let mut c = Mat::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a[(i, l)] * b[(l, j)];
            }
            c[(i, j)] = sum;
        }
    }
    c
}

/// a · bᵀ
fn matmul_transpose(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let (m, k) = (a.nrows(), a.ncols());
    let n = b.nrows();
    assert_eq!(k, b.ncols(), "inner dimensions must match");

    let mut c = Mat::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a[(i, l)] * b[(j, l)];
            }
            c[(i, j)] = sum;
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differentiation_exact_for_polynomials() {
        // D applied to nodal samples of x^k reproduces k x^{k-1} for k < n
        for n in 2..=7 {
            let elem = ReferenceElement::new(n).unwrap();

            for k in 0..n {
                let u: Vec<f64> = elem.nodes.iter().map(|&x| x.powi(k as i32)).collect();
                let du = elem.differentiate(&u);

                for (i, &x) in elem.nodes.iter().enumerate() {
                    let exact = if k == 0 {
                        0.0
                    } else {
                        k as f64 * x.powi(k as i32 - 1)
                    };
                    assert!(
                        (du[i] - exact).abs() < 1e-10,
                        "n={n}, degree {k}, node {i}: {} vs {exact}",
                        du[i]
                    );
                }
            }
        }
    }

    #[test]
    fn test_mass_matrix_symmetric() {
        for n in 2..=6 {
            let elem = ReferenceElement::new(n).unwrap();
            for i in 0..n {
                for j in 0..n {
                    assert!(
                        (elem.mass[(i, j)] - elem.mass[(j, i)]).abs() < 1e-12,
                        "mass matrix must be symmetric"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mass_matrix_positive_definite() {
        // xᵀ M x > 0 for a few arbitrary non-zero vectors
        let elem = ReferenceElement::new(5).unwrap();
        let probes = [
            vec![1.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, -1.0, 1.0, -1.0, 1.0],
            vec![0.3, 0.1, -0.7, 0.2, 0.9],
        ];
        for x in &probes {
            let mut quad = 0.0;
            for i in 0..5 {
                for j in 0..5 {
                    quad += x[i] * elem.mass[(i, j)] * x[j];
                }
            }
            assert!(quad > 0.0, "xᵀ M x must be positive");
        }
    }

    #[test]
    fn test_mass_times_inverse_is_identity() {
        let elem = ReferenceElement::new(6).unwrap();
        let product = matmul(&elem.mass, &elem.mass_inv);
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[(i, j)] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_lift_columns() {
        // M⁻¹ B has non-zero entries only in the first and last columns.
        for n in 3..=6 {
            let elem = ReferenceElement::new(n).unwrap();
            for i in 0..n {
                for j in 1..n - 1 {
                    assert!(
                        elem.lift[(i, j)].abs() < 1e-13,
                        "interior lift column {j} must vanish"
                    );
                }
            }
            // The two boundary columns carry the face signs.
            assert!(elem.lift[(0, 0)] < 0.0, "left column carries -1 sign");
            assert!(elem.lift[(n - 1, n - 1)] > 0.0, "right column carries +1 sign");
        }
    }

    #[test]
    fn test_mass_rows_sum_to_weights() {
        // M · 1 equals the quadrature weights: the Lobatto rule integrates
        // the degree n-1 Lagrange basis exactly for n >= 2.
        for n in 2..=6 {
            let elem = ReferenceElement::new(n).unwrap();
            for i in 0..n {
                let row_sum: f64 = (0..n).map(|j| elem.mass[(i, j)]).sum();
                assert!(
                    (row_sum - elem.weights[i]).abs() < 1e-11,
                    "n={n}: row {i} sums to {row_sum}, weight {}",
                    elem.weights[i]
                );
            }
        }
    }
}
