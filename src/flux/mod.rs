//! Numerical fluxes at element interfaces.
//!
//! A numerical flux resolves the double-valued state at a cell interface
//! into a single flux vector. Implementations must be consistent
//! (F*(u, u) = F(u)) and conservative (the same value is handed to both
//! neighboring cells).

use crate::equations::PhysicalModel;
use thiserror::Error;

/// Error type for flux-solver selection.
#[derive(Debug, Error)]
pub enum FluxError {
    /// The scheme is recognized but has no implementation.
    #[error("numerical flux scheme `{0}` is not implemented")]
    Unimplemented(&'static str),
}

/// Two-sided numerical flux resolution.
pub trait NumericalFlux<M: PhysicalModel>: Send + Sync {
    /// Resolve the flux at an interface from the minus-side and plus-side
    /// conserved states, in the given spatial dimension.
    fn flux(&self, model: &M, u_minus: &[f64], u_plus: &[f64], dim: usize) -> Vec<f64>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Lax-Friedrichs (Rusanov) flux.
///
/// F* = ½ (F(u⁻) + F(u⁺)) - ½ α (u⁺ - u⁻)
///
/// where α = max(λ_max(u⁻), λ_max(u⁺)) is the larger of the two one-sided
/// wave-speed bounds. The dissipation term is what stabilizes the central
/// average; α must upper-bound the true characteristic speed.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaxFriedrichs;

impl<M: PhysicalModel> NumericalFlux<M> for LaxFriedrichs {
    fn flux(&self, model: &M, u_minus: &[f64], u_plus: &[f64], dim: usize) -> Vec<f64> {
        let f_minus = model.flux(u_minus, dim);
        let f_plus = model.flux(u_plus, dim);

        let lambda_minus = model.max_wave_speed(u_minus, dim);
        let lambda_plus = model.max_wave_speed(u_plus, dim);
        let alpha = lambda_minus.max(lambda_plus);

        f_minus
            .iter()
            .zip(f_plus.iter())
            .zip(u_minus.iter().zip(u_plus.iter()))
            .map(|((&fm, &fp), (&um, &up))| 0.5 * (fm + fp) - 0.5 * alpha * (up - um))
            .collect()
    }

    fn name(&self) -> &'static str {
        "lax-friedrichs"
    }
}

impl<M: PhysicalModel> NumericalFlux<M> for Box<dyn NumericalFlux<M>> {
    fn flux(&self, model: &M, u_minus: &[f64], u_plus: &[f64], dim: usize) -> Vec<f64> {
        (**self).flux(model, u_minus, u_plus, dim)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Recognized flux-scheme variants.
///
/// Only [`FluxScheme::LaxFriedrichs`] is implemented; the remaining
/// variants are part of the capability surface and selecting them is an
/// error rather than a silent fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FluxScheme {
    /// Lax-Friedrichs (Rusanov) dissipative central scheme.
    #[default]
    LaxFriedrichs,
    /// Roe linearized Riemann solver.
    Roe,
    /// HLLC three-wave solver.
    Hllc,
    /// Linear upwind scheme.
    LinearUpwind,
}

impl FluxScheme {
    /// Scheme name as used in configuration and logs.
    pub fn name(&self) -> &'static str {
        match self {
            FluxScheme::LaxFriedrichs => "lax-friedrichs",
            FluxScheme::Roe => "roe",
            FluxScheme::Hllc => "hllc",
            FluxScheme::LinearUpwind => "linear-upwind",
        }
    }

    /// Build the solver for this scheme.
    pub fn build<M: PhysicalModel>(self) -> Result<Box<dyn NumericalFlux<M>>, FluxError> {
        match self {
            FluxScheme::LaxFriedrichs => Ok(Box::new(LaxFriedrichs)),
            other => Err(FluxError::Unimplemented(other.name())),
        }
    }
}
