//! Physical model abstractions.
//!
//! A [`PhysicalModel`] supplies everything the discretization engine needs
//! from a hyperbolic conservation law ∂u/∂t + ∂F(u)/∂x = 0: the physical
//! flux, the conversions between conserved and primitive state, a wave-speed
//! bound for numerical dissipation and a local stable-time-step estimate.

mod euler;

pub use euler::{Euler, Euler1D, GAMMA};

use crate::solver::NodalState;

/// A hyperbolic conservation law, parameterized by spatial dimension.
///
/// State vectors are plain slices of length [`PhysicalModel::N_EQNS`];
/// conserved and primitive representations share that length.
pub trait PhysicalModel: Clone + Send + Sync {
    /// Number of spatial dimensions.
    const N_DIMS: usize;

    /// Number of conserved variables.
    const N_EQNS: usize;

    /// Physical flux F(u) in the given spatial dimension, evaluated on a
    /// conserved state.
    fn flux(&self, u: &[f64], dim: usize) -> Vec<f64>;

    /// Convert a conserved state to primitive variables.
    fn conserved_to_primitive(&self, u: &[f64]) -> Vec<f64>;

    /// Convert a primitive state to conserved variables.
    fn primitive_to_conserved(&self, p: &[f64]) -> Vec<f64>;

    /// Upper bound on the absolute characteristic speed of a conserved
    /// state in the given dimension.
    ///
    /// Numerical dissipation scales with this value; an underestimate is a
    /// silent stability bug, so implementations must bound the true
    /// spectral radius from above.
    fn max_wave_speed(&self, u: &[f64], dim: usize) -> f64;

    /// Local stable-time-step estimate for a cell: its primitive state at
    /// every node and its physical extent.
    fn local_dt(&self, p: &NodalState, size: f64) -> f64;

    /// Primitive variable names, in column order, for output headers.
    fn primitive_names(&self) -> Vec<&'static str>;
}
