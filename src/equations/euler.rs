//! Compressible Euler equations.
//!
//! Conserved state: [ρ, ρu₁, ..., ρu_d, E]
//! Primitive state: [ρ, u₁, ..., u_d, p]
//!
//! with the ideal-gas closure p = (γ-1)(E - ½ρ|u|²).

use super::PhysicalModel;
use crate::solver::NodalState;

/// Ratio of specific heats for a diatomic ideal gas.
pub const GAMMA: f64 = 1.4;

/// Euler equations in `ND` spatial dimensions (mass, ND momenta, energy).
#[derive(Clone, Copy, Debug)]
pub struct Euler<const ND: usize> {
    /// Ratio of specific heats.
    pub gamma: f64,
}

/// One-dimensional Euler equations: state [ρ, ρu, E].
pub type Euler1D = Euler<1>;

impl<const ND: usize> Euler<ND> {
    /// Pressure index within both state layouts.
    const IP: usize = ND + 1;

    /// Euler equations with the standard γ = 1.4.
    pub fn new() -> Self {
        Self { gamma: GAMMA }
    }

    /// Euler equations with a custom ratio of specific heats.
    pub fn with_gamma(gamma: f64) -> Self {
        Self { gamma }
    }

    /// Pressure from a conserved state.
    pub fn pressure(&self, u: &[f64]) -> f64 {
        let mut ke = 0.0;
        for i in 0..ND {
            ke += 0.5 * u[1 + i] * u[1 + i];
        }
        (self.gamma - 1.0) * (u[Self::IP] - ke / u[0])
    }

    /// Speed of sound c = sqrt(γ p / ρ).
    pub fn sound_speed(&self, density: f64, pressure: f64) -> f64 {
        (self.gamma * pressure / density).sqrt()
    }
}

impl<const ND: usize> Default for Euler<ND> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ND: usize> PhysicalModel for Euler<ND> {
    const N_DIMS: usize = ND;
    const N_EQNS: usize = ND + 2;

    fn flux(&self, u: &[f64], dim: usize) -> Vec<f64> {
        debug_assert_eq!(u.len(), Self::N_EQNS);
        let iv = 1 + dim; // normal momentum index
        let p = self.pressure(u);

        let mut f = vec![0.0; Self::N_EQNS];
        for i in 0..ND {
            f[1 + i] = u[iv] * u[1 + i] / u[0];
        }
        f[0] = u[iv];
        f[iv] += p;
        f[Self::IP] = u[iv] / u[0] * (u[Self::IP] + p);

        f
    }

    fn conserved_to_primitive(&self, u: &[f64]) -> Vec<f64> {
        debug_assert_eq!(u.len(), Self::N_EQNS);

        let mut p = vec![0.0; Self::N_EQNS];
        p[0] = u[0];
        for i in 0..ND {
            p[1 + i] = u[1 + i] / u[0];
        }
        p[Self::IP] = self.pressure(u);

        p
    }

    fn primitive_to_conserved(&self, p: &[f64]) -> Vec<f64> {
        debug_assert_eq!(p.len(), Self::N_EQNS);

        let mut u = vec![0.0; Self::N_EQNS];
        let mut ke = 0.0;
        u[0] = p[0];
        for i in 0..ND {
            u[1 + i] = p[0] * p[1 + i];
            ke += 0.5 * p[1 + i] * p[1 + i];
        }
        u[Self::IP] = p[Self::IP] / (self.gamma - 1.0) + p[0] * ke;

        u
    }

    fn max_wave_speed(&self, u: &[f64], dim: usize) -> f64 {
        let velocity = u[1 + dim] / u[0];
        velocity.abs() + self.sound_speed(u[0], self.pressure(u))
    }

    fn local_dt(&self, p: &NodalState, size: f64) -> f64 {
        let mut dt = f64::INFINITY;
        for dim in 0..ND {
            let mut umax: f64 = 0.0;
            for j in 0..p.n_nodes() {
                let row = p.row(j);
                let speed = row[1 + dim].abs() + self.sound_speed(row[0], row[Self::IP]);
                umax = umax.max(speed);
            }
            dt = dt.min(size / umax);
        }
        dt
    }

    fn primitive_names(&self) -> Vec<&'static str> {
        let mut names = vec!["rho"];
        names.extend_from_slice(&["u", "v", "w"][..ND]);
        names.push("p");
        names
    }
}
