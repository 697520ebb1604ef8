//! Convergence study of the spectral differentiation operator.
//!
//! Differentiates exp(sin(πx)) on [-1, 1] under p- and h-refinement and
//! writes the error curves to `p_refinement.csv` and `h_refinement.csv`.
//!
//! Run with: `cargo run --example convergence`

use dg_spectral::ReferenceElement;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};

fn f(x: f64) -> f64 {
    (PI * x).sin().exp()
}

fn dfdx(x: f64) -> f64 {
    PI * (PI * x).cos() * (PI * x).sin().exp()
}

fn derivative_error(n_cells: usize, order: usize) -> f64 {
    let elem = ReferenceElement::new(order + 1).unwrap();

    let dx = 2.0 / n_cells as f64;
    let mut error_sq = 0.0;
    let mut count = 0;

    for i in 0..n_cells {
        let x_left = -1.0 + i as f64 * dx;
        let xs: Vec<f64> = elem
            .nodes
            .iter()
            .map(|&r| x_left + 0.5 * (1.0 + r) * dx)
            .collect();

        let samples: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let approx = elem.differentiate(&samples);

        for (j, &x) in xs.iter().enumerate() {
            let d = approx[j] / (0.5 * dx);
            error_sq += (d - dfdx(x)).powi(2);
            count += 1;
        }
    }

    (error_sq / count as f64).sqrt()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // p-refinement: single element, rising order.
    let mut file = BufWriter::new(File::create("p_refinement.csv")?);
    writeln!(file, "p,error")?;
    for p in 2..=24 {
        let error = derivative_error(1, p);
        writeln!(file, "{p},{error:e}")?;
    }
    file.flush()?;

    // h-refinement: fixed order 2, rising cell count.
    let mut file = BufWriter::new(File::create("h_refinement.csv")?);
    writeln!(file, "n,error")?;
    for n_cells in [1usize, 2, 4, 8, 16, 32] {
        let error = derivative_error(n_cells, 2);
        writeln!(file, "{},{error:e}", 3 * n_cells)?;
    }
    file.flush()?;

    println!("wrote p_refinement.csv and h_refinement.csv");

    Ok(())
}
