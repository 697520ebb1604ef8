//! Legendre polynomial evaluation.
//!
//! The Legendre polynomials are the orthogonal basis underlying both the
//! quadrature rules and the modal expansion used by the reference element.

mod legendre;

pub use legendre::{legendre, legendre_derivative, legendre_with_derivatives};
