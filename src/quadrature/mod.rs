//! Quadrature rules on the reference interval [-1, 1].
//!
//! Two Legendre-based families are provided:
//! - **Lobatto**: endpoint-inclusive, n points, exact for polynomials up to
//!   degree 2n-3. The interior nodes are the roots of P'_{n-1}.
//! - **Gauss**: endpoint-exclusive, n points, exact up to degree 2n-1.
//!   The nodes are the roots of P_n.
//!
//! Nodes are seeded with a closed-form Chebyshev distribution and refined
//! by Newton-Raphson iteration; weights follow closed-form expressions in
//! the converged nodes.

use crate::polynomial::{legendre, legendre_with_derivatives};
use std::f64::consts::PI;
use thiserror::Error;

/// Infinity-norm tolerance on the per-iteration Newton update.
pub const NEWTON_TOL: f64 = 1e-10;

/// Iteration floor of the Newton loop. Termination requires both the
/// tolerance and this floor to be met, so the loop always runs at least
/// this many sweeps.
pub const NEWTON_ITER_FLOOR: usize = 100;

// A diverging iteration never satisfies the tolerance; cap it so the
// failure surfaces as an error instead of a hang.
const NEWTON_ITER_CEILING: usize = 10_000;

/// Error type for quadrature-rule construction.
#[derive(Debug, Error)]
pub enum QuadratureError {
    /// The requested family needs more points than were asked for.
    #[error("{family} rule needs at least {min} points, got {got}")]
    TooFewPoints {
        family: &'static str,
        min: usize,
        got: usize,
    },

    /// Newton refinement failed to reach the tolerance.
    #[error(
        "Newton iteration for {family} nodes did not converge \
         (residual {residual:.3e} after {iterations} iterations)"
    )]
    NoConvergence {
        family: &'static str,
        residual: f64,
        iterations: usize,
    },
}

/// Quadrature rule family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadratureFamily {
    /// Endpoint-inclusive Gauss-Lobatto-Legendre rule.
    Lobatto,
    /// Endpoint-exclusive Gauss-Legendre rule.
    Gauss,
}

/// Nodes and weights of a quadrature rule on [-1, 1].
///
/// Nodes are strictly increasing. Immutable after construction.
#[derive(Clone, Debug)]
pub struct QuadratureRule {
    /// Number of quadrature points.
    pub n: usize,
    /// Node coordinates in [-1, 1], strictly increasing.
    pub nodes: Vec<f64>,
    /// Matching quadrature weights.
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// Build a rule of the given family with `n` points.
    pub fn new(family: QuadratureFamily, n: usize) -> Result<Self, QuadratureError> {
        match family {
            QuadratureFamily::Lobatto => Self::lobatto(n),
            QuadratureFamily::Gauss => Self::gauss(n),
        }
    }

    /// Gauss-Lobatto-Legendre rule with `n` points, including x = ±1.
    ///
    /// Interior nodes are the roots of P'_{n-1}, refined by Newton steps
    /// P'_{n-1}/P''_{n-1}. Weights: w_i = 2 / (n(n-1) [P_{n-1}(x_i)]²),
    /// which reduces to 2/(n(n-1)) at the endpoints.
    pub fn lobatto(n: usize) -> Result<Self, QuadratureError> {
        if n < 2 {
            return Err(QuadratureError::TooFewPoints {
                family: "Lobatto",
                min: 2,
                got: n,
            });
        }

        // Endpoints are exact; the interior is seeded with a Chebyshev
        // distribution.
        let mut nodes = vec![0.0; n];
        nodes[0] = -1.0;
        nodes[n - 1] = 1.0;
        let seed = chebyshev_interior(n - 2);
        nodes[1..n - 1].copy_from_slice(&seed);

        newton_refine(&mut nodes[1..n - 1], "Lobatto", |x| {
            let (_, dp, d2p) = legendre_with_derivatives(n - 1, x);
            dp / d2p
        })?;

        let scale = (n * (n - 1)) as f64;
        let weights = nodes
            .iter()
            .map(|&x| {
                let p = legendre(n - 1, x);
                2.0 / (scale * p * p)
            })
            .collect();

        let rule = Self { n, nodes, weights };
        debug_assert!(rule.nodes_increasing());
        Ok(rule)
    }

    /// Gauss-Legendre rule with `n` points, all interior.
    ///
    /// Nodes are the roots of P_n, refined by Newton steps P_n/P'_n.
    /// Weights: w_i = 2 / ((1 - x_i²) [P'_n(x_i)]²).
    pub fn gauss(n: usize) -> Result<Self, QuadratureError> {
        if n < 1 {
            return Err(QuadratureError::TooFewPoints {
                family: "Gauss",
                min: 1,
                got: n,
            });
        }

        let mut nodes = chebyshev_interior(n);

        newton_refine(&mut nodes, "Gauss", |x| {
            let (p, dp, _) = legendre_with_derivatives(n, x);
            p / dp
        })?;

        let weights = nodes
            .iter()
            .map(|&x| {
                let (_, dp, _) = legendre_with_derivatives(n, x);
                2.0 / ((1.0 - x * x) * dp * dp)
            })
            .collect();

        let rule = Self { n, nodes, weights };
        debug_assert!(rule.nodes_increasing());
        Ok(rule)
    }

    fn nodes_increasing(&self) -> bool {
        self.nodes.windows(2).all(|w| w[0] < w[1])
    }
}

/// Chebyshev points of the second kind, endpoint-exclusive:
/// x_i = -cos(π (4i + 3) / (4n + 2)) for i = 0, ..., n-1.
fn chebyshev_interior(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| -(PI * (4 * i + 3) as f64 / (4 * n + 2) as f64).cos())
        .collect()
}

/// Newton-refine `nodes` in place, where `step` returns the Newton update
/// f(x)/f'(x) for the polynomial whose roots are sought.
///
/// The loop exits only once the infinity norm of the update is below
/// [`NEWTON_TOL`] and at least [`NEWTON_ITER_FLOOR`] sweeps have run.
fn newton_refine<S>(
    nodes: &mut [f64],
    family: &'static str,
    step: S,
) -> Result<(), QuadratureError>
where
    S: Fn(f64) -> f64,
{
    let mut residual = f64::INFINITY;
    let mut count = 0usize;

    while residual > NEWTON_TOL || count < NEWTON_ITER_FLOOR {
        if count >= NEWTON_ITER_CEILING {
            return Err(QuadratureError::NoConvergence {
                family,
                residual,
                iterations: count,
            });
        }

        let mut max_update: f64 = 0.0;
        for x in nodes.iter_mut() {
            let dx = step(*x);
            *x -= dx;
            max_update = max_update.max(dx.abs());
        }
        residual = max_update;
        count += 1;
    }

    Ok(())
}
