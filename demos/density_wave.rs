//! Advected density wave for the 1D Euler equations.
//!
//! A sinusoidal density profile carried by a uniform flow on a periodic
//! domain; the smooth analogue of a linear advection test. Writes
//! `density_wave_<k>.csv` frames.
//!
//! Run with: `cargo run --example density_wave`

use dg_spectral::{DgIntegrator, Driver, Euler1D, LaxFriedrichs, Mesh, Scene, SspRk3};
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let porder = 8;
    let mesh_size = 10;
    let domain_size = 1.0;
    let cfl = 0.5;

    let end_time = 1.0;
    let write_interval = 0.1;

    let mesh = Mesh::line_periodic(mesh_size, domain_size);

    let u_ref = 1.0;
    let scene = Scene::new(move |x| {
        let rho = 2.0 + (2.0 * PI * x).sin();
        vec![rho, u_ref, 1.0]
    });

    let integrator = DgIntegrator::new(&mesh, &scene, Euler1D::new(), LaxFriedrichs, porder, cfl)?;

    let mut driver = Driver::new("density_wave", integrator, SspRk3);
    let summary = driver.run(write_interval, end_time)?;

    println!(
        "finished after {} steps at t = {:.3e} ({} frames)",
        summary.n_steps, summary.final_time, summary.frames
    );

    Ok(())
}
