//! Simulation driver: the outer time loop with periodic frame output.

use log::info;
use thiserror::Error;

use crate::equations::PhysicalModel;
use crate::flux::NumericalFlux;
use crate::io::{CsvError, write_frame};
use crate::solver::DgIntegrator;
use crate::time::TimeScheme;

/// Error type for a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Frame output failed.
    #[error(transparent)]
    Csv(#[from] CsvError),
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    /// Simulation time reached.
    pub final_time: f64,
    /// Number of time steps taken.
    pub n_steps: usize,
    /// Number of frames written after the initial one.
    pub frames: usize,
}

/// Owns the engine and a time scheme; runs the simulation to a configured
/// end time, writing CSV frames at a caller-chosen cadence.
pub struct Driver<M, F, T>
where
    M: PhysicalModel,
    F: NumericalFlux<M>,
    T: TimeScheme,
{
    name: String,
    /// The discretization engine being advanced.
    pub integrator: DgIntegrator<M, F>,
    scheme: T,
}

impl<M, F, T> Driver<M, F, T>
where
    M: PhysicalModel,
    F: NumericalFlux<M>,
    T: TimeScheme,
{
    /// Create a driver. `name` prefixes the frame files: `<name>_<k>.csv`.
    pub fn new(name: impl Into<String>, integrator: DgIntegrator<M, F>, scheme: T) -> Self {
        Self {
            name: name.into(),
            integrator,
            scheme,
        }
    }

    /// Run until `end_time`, writing a frame whenever at least
    /// `write_interval` of simulation time has passed since the last one.
    ///
    /// The final step is clamped so the run lands exactly on `end_time`.
    pub fn run(&mut self, write_interval: f64, end_time: f64) -> Result<RunSummary, DriverError> {
        let mut time = 0.0;
        let mut last_write_time = 0.0;
        let mut frame = 0usize;
        let mut n_steps = 0usize;

        self.write_data(frame)?;

        info!(
            "starting `{}`: {} cells, order {}, {} time scheme",
            self.name,
            self.integrator.n_cells(),
            self.integrator.order,
            self.scheme.name()
        );

        while time < end_time {
            let mut dt = self.integrator.compute_dt_global();
            if time + dt > end_time {
                dt = end_time - time;
            }
            time += dt;

            self.scheme.advance(&mut self.integrator, dt);
            n_steps += 1;

            if time - last_write_time >= write_interval || time >= end_time {
                frame += 1;
                info!("frame {frame} at t = {time:.6e} (dt = {dt:.3e})");
                last_write_time = time;
                self.write_data(frame)?;
            }
        }

        Ok(RunSummary {
            final_time: time,
            n_steps,
            frames: frame,
        })
    }

    /// Refresh primitives and write one CSV frame.
    fn write_data(&mut self, frame: usize) -> Result<(), CsvError> {
        self.integrator.refresh_primitives();
        let path = format!("{}_{}.csv", self.name, frame);
        write_frame(path, &self.integrator)
    }
}
