//! # dg-spectral
//!
//! A nodal Discontinuous Galerkin spectral-element solver for 1D hyperbolic
//! conservation laws.
//!
//! This crate provides the core building blocks for DG methods:
//! - Legendre polynomials and Gauss/Gauss-Lobatto quadrature rules
//! - Modal-nodal transforms via the generalized Vandermonde matrix
//! - Per-order spectral operators (mass, differentiation, boundary lifting)
//! - Line-mesh topology (cells, faces, adjacency)
//! - Pluggable physical models (compressible Euler equations)
//! - Numerical fluxes (Lax-Friedrichs)
//! - Explicit multi-stage time integration (RK2, SSP-RK3)
//! - A simulation driver with CSV frame output

pub mod basis;
pub mod driver;
pub mod equations;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod operators;
pub mod polynomial;
pub mod quadrature;
pub mod scene;
pub mod solver;
pub mod time;

// Re-export main types for convenience
pub use basis::{BasisError, Vandermonde};
pub use driver::{Driver, DriverError, RunSummary};
pub use equations::{Euler, Euler1D, GAMMA, PhysicalModel};
pub use flux::{FluxError, FluxScheme, LaxFriedrichs, NumericalFlux};
pub use io::{CsvError, write_frame};
pub use mesh::{Face, FaceLocation, Mesh, MeshCell};
pub use operators::{OperatorError, ReferenceElement};
pub use polynomial::{legendre, legendre_derivative, legendre_with_derivatives};
pub use quadrature::{QuadratureError, QuadratureFamily, QuadratureRule};
pub use scene::{BoundaryCondition, Scene};
pub use solver::{DgCell, DgIntegrator, NodalState};
pub use time::{Rk2, SspRk3, StandardScheme, TimeScheme};
