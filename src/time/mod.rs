//! Explicit multi-stage time integration.
//!
//! A [`TimeScheme`] advances the whole cell array by one global step,
//! calling back into the discretization engine. Every stage performs a
//! fresh flux-resolution pass before assembling residuals; a residual from
//! a stale flux state is invalid.

use crate::equations::PhysicalModel;
use crate::flux::NumericalFlux;
use crate::solver::DgIntegrator;

/// Explicit multi-stage advancement of the cell array.
pub trait TimeScheme {
    /// Advance all cells by one step of size `dt`.
    fn advance<M, F>(&self, integrator: &mut DgIntegrator<M, F>, dt: f64)
    where
        M: PhysicalModel,
        F: NumericalFlux<M>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Order of accuracy.
    fn order(&self) -> usize;

    /// Number of stages per step.
    fn n_stages(&self) -> usize;
}

/// Second-order Runge-Kutta (midpoint) method.
///
/// Stage 1 saves the pre-step state and advances half a step; stage 2
/// re-resolves fluxes and advances the saved state by a full step using
/// the midpoint residual.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk2;

impl TimeScheme for Rk2 {
    fn advance<M, F>(&self, integrator: &mut DgIntegrator<M, F>, dt: f64)
    where
        M: PhysicalModel,
        F: NumericalFlux<M>,
    {
        integrator.resolve_fluxes();
        let rhs = integrator.residuals();
        for (cell, dudt) in integrator.cells.iter_mut().zip(rhs.iter()) {
            cell.u0.copy_from(&cell.u);
            cell.u.axpy(0.5 * dt, dudt);
        }

        integrator.resolve_fluxes();
        let rhs = integrator.residuals();
        for (cell, dudt) in integrator.cells.iter_mut().zip(rhs.iter()) {
            cell.u.copy_from(&cell.u0);
            cell.u.axpy(dt, dudt);
        }
    }

    fn name(&self) -> &'static str {
        "rk2"
    }

    fn order(&self) -> usize {
        2
    }

    fn n_stages(&self) -> usize {
        2
    }
}

/// Strong-stability-preserving third-order Runge-Kutta (Shu-Osher form).
///
/// u1 = u + dt L(u)
/// u2 = 3/4 u + 1/4 u1 + 1/4 dt L(u1)
/// u  = 1/3 u + 2/3 u2 + 2/3 dt L(u2)
#[derive(Clone, Copy, Debug, Default)]
pub struct SspRk3;

impl TimeScheme for SspRk3 {
    fn advance<M, F>(&self, integrator: &mut DgIntegrator<M, F>, dt: f64)
    where
        M: PhysicalModel,
        F: NumericalFlux<M>,
    {
        // Stage 1: u <- u + dt L(u), saving u0 = u.
        integrator.resolve_fluxes();
        let rhs = integrator.residuals();
        for (cell, dudt) in integrator.cells.iter_mut().zip(rhs.iter()) {
            cell.u0.copy_from(&cell.u);
            cell.u.axpy(dt, dudt);
        }

        // Stage 2: u <- 3/4 u0 + 1/4 u + 1/4 dt L(u).
        integrator.resolve_fluxes();
        let rhs = integrator.residuals();
        for (cell, dudt) in integrator.cells.iter_mut().zip(rhs.iter()) {
            cell.u.scale(0.25);
            cell.u.axpy(0.25 * dt, dudt);
            let u0 = cell.u0.clone();
            cell.u.axpy(0.75, &u0);
        }

        // Stage 3: u <- (u0 + 2 u + 2 dt L(u)) / 3.
        integrator.resolve_fluxes();
        let rhs = integrator.residuals();
        for (cell, dudt) in integrator.cells.iter_mut().zip(rhs.iter()) {
            cell.u.scale(2.0 / 3.0);
            cell.u.axpy(2.0 / 3.0 * dt, dudt);
            let u0 = cell.u0.clone();
            cell.u.axpy(1.0 / 3.0, &u0);
        }
    }

    fn name(&self) -> &'static str {
        "ssp-rk3"
    }

    fn order(&self) -> usize {
        3
    }

    fn n_stages(&self) -> usize {
        3
    }
}

/// Enum wrapper for runtime scheme selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StandardScheme {
    /// Second-order Runge-Kutta.
    Rk2,
    /// SSP-RK3 (default, recommended for hyperbolic problems).
    #[default]
    SspRk3,
}

impl TimeScheme for StandardScheme {
    fn advance<M, F>(&self, integrator: &mut DgIntegrator<M, F>, dt: f64)
    where
        M: PhysicalModel,
        F: NumericalFlux<M>,
    {
        match self {
            StandardScheme::Rk2 => Rk2.advance(integrator, dt),
            StandardScheme::SspRk3 => SspRk3.advance(integrator, dt),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StandardScheme::Rk2 => Rk2.name(),
            StandardScheme::SspRk3 => SspRk3.name(),
        }
    }

    fn order(&self) -> usize {
        match self {
            StandardScheme::Rk2 => Rk2.order(),
            StandardScheme::SspRk3 => SspRk3.order(),
        }
    }

    fn n_stages(&self) -> usize {
        match self {
            StandardScheme::Rk2 => Rk2.n_stages(),
            StandardScheme::SspRk3 => SspRk3.n_stages(),
        }
    }
}
