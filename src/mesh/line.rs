//! Uniform 1D line meshes.

use super::{Face, FaceLocation, Mesh, MeshCell};

impl Mesh {
    /// Uniform periodic partition of [0, length] into `n_cells` cells.
    ///
    /// Every face is interior; the wrap interface between the last and the
    /// first cell appears at both ends of the face list, so the list always
    /// has `n_cells + 1` entries.
    pub fn line_periodic(n_cells: usize, length: f64) -> Self {
        assert!(n_cells > 0, "need at least one cell");
        assert!(length > 0.0, "domain length must be positive");

        let dx = length / n_cells as f64;

        let cells = (0..n_cells)
            .map(|i| MeshCell {
                index: i,
                vertices: [i as f64 * dx, (i + 1) as f64 * dx],
                size: dx,
                det_j: 0.5 * dx,
            })
            .collect();

        let faces = (0..=n_cells)
            .map(|i| {
                if i == 0 || i == n_cells {
                    Face {
                        plus: 0,
                        minus: n_cells - 1,
                        location: FaceLocation::Interior,
                    }
                } else {
                    Face {
                        plus: i,
                        minus: i - 1,
                        location: FaceLocation::Interior,
                    }
                }
            })
            .collect();

        Self { cells, faces }
    }

    /// Uniform bounded partition of [0, length] into `n_cells` cells, with
    /// the first and last face marked as domain boundaries.
    pub fn line(n_cells: usize, length: f64) -> Self {
        let mut mesh = Self::line_periodic(n_cells, length);

        mesh.faces[0] = Face {
            plus: 0,
            minus: 0,
            location: FaceLocation::LeftBoundary,
        };
        mesh.faces[n_cells] = Face {
            plus: n_cells - 1,
            minus: n_cells - 1,
            location: FaceLocation::RightBoundary,
        };

        mesh
    }
}
