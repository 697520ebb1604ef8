//! Discretization engine: flux resolution and residual assembly.

use super::{DgCell, NodalState};
use crate::equations::PhysicalModel;
use crate::flux::NumericalFlux;
use crate::mesh::{Face, FaceLocation, Mesh};
use crate::operators::{OperatorError, ReferenceElement};
use crate::scene::{BoundaryCondition, Scene};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Semi-discrete DG operator over the whole mesh.
///
/// Owns the shared reference element, the per-cell state array and the face
/// list. A time step consists of ordered calls into [`resolve_fluxes`] and
/// [`residual`]; the two phases never run concurrently and the cell array
/// is mutated by nothing else.
///
/// [`resolve_fluxes`]: DgIntegrator::resolve_fluxes
/// [`residual`]: DgIntegrator::residual
pub struct DgIntegrator<M: PhysicalModel, F: NumericalFlux<M>> {
    /// The conservation law being discretized.
    pub model: M,
    /// Interface flux solver.
    pub flux_solver: F,
    /// Shared per-order operator set.
    pub ref_element: ReferenceElement,
    /// Face adjacency list.
    pub faces: Vec<Face>,
    /// Per-element state.
    pub cells: Vec<DgCell>,
    /// Boundary condition at the left domain boundary.
    pub boundary_left: BoundaryCondition,
    /// Boundary condition at the right domain boundary.
    pub boundary_right: BoundaryCondition,
    /// Polynomial order.
    pub order: usize,
    /// Nodes per element (order + 1).
    pub n_nodes: usize,
    /// CFL number for the global time-step bound.
    pub cfl: f64,
}

impl<M: PhysicalModel, F: NumericalFlux<M>> DgIntegrator<M, F> {
    /// Build the engine: construct the reference element, allocate one
    /// [`DgCell`] per mesh cell and sample the scene's initial condition at
    /// every quadrature point.
    pub fn new(
        mesh: &Mesh,
        scene: &Scene,
        model: M,
        flux_solver: F,
        order: usize,
        cfl: f64,
    ) -> Result<Self, OperatorError> {
        let n_nodes = order + 1;
        let n_eqns = M::N_EQNS;
        let ref_element = ReferenceElement::new(n_nodes)?;

        let mut cells = Vec::with_capacity(mesh.n_cells());
        for mesh_cell in &mesh.cells {
            let mut cell = DgCell::new(n_nodes, n_eqns);
            cell.det_j = mesh_cell.det_j;
            cell.size = mesh_cell.size;

            for (j, &r) in ref_element.nodes.iter().enumerate() {
                let x = mesh_cell.reference_to_physical(r);
                cell.x[j] = x;

                let prim = (scene.initial_condition)(x);
                assert_eq!(
                    prim.len(),
                    n_eqns,
                    "initial condition must produce {n_eqns} primitive variables"
                );
                cell.u.fill_row(j, &model.primitive_to_conserved(&prim));
                cell.p.fill_row(j, &prim);
            }

            cells.push(cell);
        }

        Ok(Self {
            model,
            flux_solver,
            ref_element,
            faces: mesh.faces.clone(),
            cells,
            boundary_left: scene.left.clone(),
            boundary_right: scene.right.clone(),
            order,
            n_nodes,
            cfl,
        })
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Global stable time step: the minimum over cells of
    /// cfl · local_dt / (order - 1)².
    ///
    /// Refreshes the primitive state first, since the model's estimate
    /// reads it.
    pub fn compute_dt_global(&mut self) -> f64 {
        self.refresh_primitives();

        let order_scale = (self.order as f64 - 1.0).powi(2);
        let mut dt_global = f64::INFINITY;
        for cell in &self.cells {
            let dt = self.cfl * self.model.local_dt(&cell.p, cell.size) / order_scale;
            dt_global = dt_global.min(dt);
        }
        dt_global
    }

    /// Flux-resolution pass over all faces.
    ///
    /// Interior faces resolve the minus cell's last-node state against the
    /// plus cell's first-node state and hand the same flux to both sides.
    /// Boundary faces resolve the boundary condition and evaluate the
    /// model's physical flux on the resolved state directly.
    pub fn resolve_fluxes(&mut self) {
        // 1D: the face normal is along dimension 0.
        let dim = 0;
        let last = self.n_nodes - 1;

        for fi in 0..self.faces.len() {
            let face = self.faces[fi];
            match face.location {
                FaceLocation::LeftBoundary => {
                    // Boundary faces reference the same cell on both sides.
                    let k = face.plus;
                    let ub = self.boundary_left.resolve(self.cells[k].u.row(0));
                    self.cells[k].flux_left = self.model.flux(&ub, dim);
                }
                FaceLocation::RightBoundary => {
                    let k = face.minus;
                    let ub = self.boundary_right.resolve(self.cells[k].u.row(last));
                    self.cells[k].flux_right = self.model.flux(&ub, dim);
                }
                FaceLocation::Interior => {
                    let u_minus = self.cells[face.minus].u.row(last).to_vec();
                    let u_plus = self.cells[face.plus].u.row(0).to_vec();

                    let flux = self
                        .flux_solver
                        .flux(&self.model, &u_minus, &u_plus, dim);

                    self.cells[face.minus].flux_right.copy_from_slice(&flux);
                    self.cells[face.plus].flux_left = flux;
                }
            }
        }
    }

    /// Semi-discrete residual du/dt of cell `k`.
    ///
    /// dudt = (M⁻¹B (F - F*) - D F) / detJ
    ///
    /// where F is the physical flux at every node and F* is zero except for
    /// the first and last rows, which hold the resolved boundary fluxes.
    pub fn residual(&self, k: usize) -> NodalState {
        let n = self.n_nodes;
        let n_eqns = M::N_EQNS;
        let cell = &self.cells[k];
        let elem = &self.ref_element;

        let mut f_star = NodalState::new(n, n_eqns);
        f_star.fill_row(0, &cell.flux_left);
        f_star.fill_row(n - 1, &cell.flux_right);

        let mut f = NodalState::new(n, n_eqns);
        for i in 0..n {
            f.fill_row(i, &self.model.flux(cell.u.row(i), 0));
        }

        let mut dudt = NodalState::new(n, n_eqns);
        for i in 0..n {
            for e in 0..n_eqns {
                let mut acc = 0.0;
                for m in 0..n {
                    acc += elem.lift[(i, m)] * (f[(m, e)] - f_star[(m, e)])
                        - elem.diff[(i, m)] * f[(m, e)];
                }
                dudt[(i, e)] = acc / cell.det_j;
            }
        }

        dudt
    }

    /// Residuals of all cells, in cell order.
    #[cfg(not(feature = "parallel"))]
    pub fn residuals(&self) -> Vec<NodalState> {
        (0..self.cells.len()).map(|k| self.residual(k)).collect()
    }

    /// Residuals of all cells, in cell order.
    ///
    /// Cells are independent within the assembly phase, so the map runs on
    /// the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn residuals(&self) -> Vec<NodalState> {
        (0..self.cells.len())
            .into_par_iter()
            .map(|k| self.residual(k))
            .collect()
    }

    /// Recompute every cell's primitive state from its conserved state.
    ///
    /// Primitive state is not kept in sync automatically; call this before
    /// reading it for output or diagnostics.
    pub fn refresh_primitives(&mut self) {
        let Self {
            model,
            cells,
            n_nodes,
            ..
        } = self;

        for cell in cells.iter_mut() {
            for j in 0..*n_nodes {
                let prim = model.conserved_to_primitive(cell.u.row(j));
                cell.p.fill_row(j, &prim);
            }
        }
    }

    /// Jacobian- and quadrature-weighted integral of each conserved
    /// variable over the whole domain.
    pub fn total_conserved(&self) -> Vec<f64> {
        let mut totals = vec![0.0; M::N_EQNS];
        for cell in &self.cells {
            for (j, &w) in self.ref_element.weights.iter().enumerate() {
                let row = cell.u.row(j);
                for (total, &value) in totals.iter_mut().zip(row.iter()) {
                    *total += w * value * cell.det_j;
                }
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::Euler1D;
    use crate::flux::LaxFriedrichs;

    fn uniform_setup(n_cells: usize, order: usize) -> DgIntegrator<Euler1D, LaxFriedrichs> {
        let mesh = Mesh::line_periodic(n_cells, 1.0);
        let scene = Scene::new(|_x| vec![1.0, 0.0, 1.0e5]);
        DgIntegrator::new(&mesh, &scene, Euler1D::new(), LaxFriedrichs, order, 0.5).unwrap()
    }

    #[test]
    fn test_initial_condition_sampling() {
        let mesh = Mesh::line(4, 1.0);
        let scene = Scene::new(|x| vec![1.0 + x, 0.0, 1.0e5]);
        let engine =
            DgIntegrator::new(&mesh, &scene, Euler1D::new(), LaxFriedrichs, 3, 0.5).unwrap();

        assert_eq!(engine.n_cells(), 4);
        for cell in &engine.cells {
            for j in 0..engine.n_nodes {
                // Density column of the primitive state matches 1 + x.
                assert!((cell.p[(j, 0)] - (1.0 + cell.x[j])).abs() < 1e-12);
                // Conserved density equals primitive density.
                assert!((cell.u[(j, 0)] - cell.p[(j, 0)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_residual_vanishes_for_uniform_state() {
        let mut engine = uniform_setup(4, 3);
        engine.resolve_fluxes();

        for k in 0..engine.n_cells() {
            let dudt = engine.residual(k);
            assert!(
                dudt.max_abs() < 1e-6,
                "uniform state must be steady, got {}",
                dudt.max_abs()
            );
        }
    }

    #[test]
    fn test_interior_flux_shared_between_neighbors() {
        let mut engine = uniform_setup(4, 2);
        // Perturb one cell so interface fluxes are non-trivial.
        let row = engine.cells[1].u.row(0).to_vec();
        engine.cells[1]
            .u
            .fill_row(0, &[row[0] * 1.5, row[1], row[2]]);

        engine.resolve_fluxes();

        // Face between cells 0 and 1: cell 0's right flux equals cell 1's
        // left flux.
        for e in 0..3 {
            assert!(
                (engine.cells[0].flux_right[e] - engine.cells[1].flux_left[e]).abs() < 1e-12,
                "interface flux must be single-valued"
            );
        }
    }

    #[test]
    fn test_boundary_faces_use_physical_flux() {
        let mesh = Mesh::line(2, 1.0);
        let dirichlet_state = Euler1D::new().primitive_to_conserved(&[2.0, 0.0, 2.0e5]);
        let scene = Scene::new(|_x| vec![1.0, 0.0, 1.0e5])
            .with_left(BoundaryCondition::Dirichlet(dirichlet_state.clone()));

        let mut engine =
            DgIntegrator::new(&mesh, &scene, Euler1D::new(), LaxFriedrichs, 2, 0.5).unwrap();
        engine.resolve_fluxes();

        // Left boundary: exact physical flux of the Dirichlet state.
        let expected = engine.model.flux(&dirichlet_state, 0);
        for e in 0..3 {
            assert!((engine.cells[0].flux_left[e] - expected[e]).abs() < 1e-9);
        }

        // Right boundary (Neumann): physical flux of the interior state.
        let interior = engine.cells[1].u.row(engine.n_nodes - 1).to_vec();
        let expected = engine.model.flux(&interior, 0);
        for e in 0..3 {
            assert!((engine.cells[1].flux_right[e] - expected[e]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_refresh_primitives() {
        let mut engine = uniform_setup(2, 2);

        // Overwrite conserved state; p is now stale.
        let u = engine.model.primitive_to_conserved(&[2.0, 10.0, 2.0e5]);
        for k in 0..engine.n_cells() {
            for j in 0..engine.n_nodes {
                engine.cells[k].u.fill_row(j, &u);
            }
        }
        assert!((engine.cells[0].p[(0, 0)] - 1.0).abs() < 1e-12, "stale");

        engine.refresh_primitives();
        assert!((engine.cells[0].p[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((engine.cells[0].p[(0, 1)] - 10.0).abs() < 1e-9);
        assert!((engine.cells[0].p[(0, 2)] - 2.0e5).abs() < 1e-4);
    }

    #[test]
    fn test_compute_dt_global_scaling() {
        let mut engine = uniform_setup(4, 5);

        let euler = Euler1D::new();
        let c = euler.sound_speed(1.0, 1.0e5);
        let expected = 0.5 * (0.25 / c) / 16.0; // cfl · h/c / (order-1)²
        let dt = engine.compute_dt_global();
        assert!(
            (dt - expected).abs() < 1e-12 * expected,
            "dt {dt} vs {expected}"
        );
    }

    #[test]
    fn test_total_conserved_of_known_state() {
        // Uniform ρ = 1 over a unit domain integrates to 1.
        let engine = uniform_setup(8, 3);
        let totals = engine.total_conserved();
        assert!((totals[0] - 1.0).abs() < 1e-12, "mass {}", totals[0]);
        assert!(totals[1].abs() < 1e-12, "momentum {}", totals[1]);
        // Energy density p/(γ-1) = 2.5e5 over a unit domain.
        assert!((totals[2] - 2.5e5).abs() < 1e-6, "energy {}", totals[2]);
    }
}
