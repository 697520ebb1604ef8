//! CSV output of per-node primitive state.
//!
//! One frame is a plain CSV file with header `x,<primitive names>` (for the
//! Euler equations: `x,rho,u,p`) and one row per quadrature node per cell,
//! in cell order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::equations::PhysicalModel;
use crate::flux::NumericalFlux;
use crate::solver::DgIntegrator;

/// Error type for CSV output.
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error during file operations.
    #[error("CSV I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one solution frame.
///
/// Reads the per-cell primitive state, so the caller must refresh it first
/// (the [`Driver`](crate::driver::Driver) does).
pub fn write_frame<M, F, P>(path: P, integrator: &DgIntegrator<M, F>) -> Result<(), CsvError>
where
    M: PhysicalModel,
    F: NumericalFlux<M>,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "x")?;
    for name in integrator.model.primitive_names() {
        write!(writer, ",{name}")?;
    }
    writeln!(writer)?;

    for cell in &integrator.cells {
        for (j, &x) in cell.x.iter().enumerate() {
            write!(writer, "{x}")?;
            for &value in cell.p.row(j) {
                write!(writer, ",{value}")?;
            }
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}
