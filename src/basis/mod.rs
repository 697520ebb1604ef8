//! Modal-nodal basis transformations.

mod vandermonde;

pub use vandermonde::{BasisError, Vandermonde};
pub(crate) use vandermonde::invert_matrix;
