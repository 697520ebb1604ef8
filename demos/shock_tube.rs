//! Sod-type shock tube for the 1D Euler equations.
//!
//! A 2:1 density and pressure jump at the domain center, pass-through
//! boundaries on both sides. Writes `shock_tube_<k>.csv` frames.
//!
//! Run with: `cargo run --example shock_tube`

use dg_spectral::{DgIntegrator, Driver, Euler1D, LaxFriedrichs, Mesh, Scene, SspRk3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let porder = 4;
    let mesh_size = 50;
    let domain_size = 1.0;
    let cfl = 0.5;

    let end_time = 8.0e-4;
    let write_interval = 8.0e-5;

    let mesh = Mesh::line(mesh_size, domain_size);

    let scene = Scene::new(|x| {
        if x < 0.5 {
            vec![2.0, 0.0, 2.0e5]
        } else {
            vec![1.0, 0.0, 1.0e5]
        }
    });

    let integrator = DgIntegrator::new(&mesh, &scene, Euler1D::new(), LaxFriedrichs, porder, cfl)?;

    let mut driver = Driver::new("shock_tube", integrator, SspRk3);
    let summary = driver.run(write_interval, end_time)?;

    println!(
        "finished after {} steps at t = {:.3e} ({} frames)",
        summary.n_steps, summary.final_time, summary.frames
    );

    Ok(())
}
