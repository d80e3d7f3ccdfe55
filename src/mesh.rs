//! Regular-grid evaluation helper for surface plotting.

use crate::error::{TexplotError, TexplotResult};

/// Flattened grid samples in x-major order (y varies fastest), ready to hand
/// to [`crate::Axis::surf`] and friends.
#[derive(Clone, Debug)]
pub struct MeshGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// Square-resolution convenience for [`mesh_grid_rect`].
pub fn mesh_grid(
    f: impl Fn(f64, f64) -> f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    res: usize,
) -> TexplotResult<MeshGrid> {
    mesh_grid_rect(f, x_min, x_max, y_min, y_max, res, res)
}

/// Evaluate `f(x, y)` over a regular grid, endpoints inclusive. A zero
/// `y_res` falls back to `x_res`.
pub fn mesh_grid_rect(
    f: impl Fn(f64, f64) -> f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    x_res: usize,
    y_res: usize,
) -> TexplotResult<MeshGrid> {
    let y_res = if y_res == 0 { x_res } else { y_res };
    if x_res < 2 || y_res < 2 {
        return Err(TexplotError::validation(
            "mesh grid resolution must be at least 2 per side",
        ));
    }

    let xs: Vec<f64> = (0..x_res)
        .map(|i| x_min + i as f64 * (x_max - x_min) / (x_res - 1) as f64)
        .collect();
    let ys: Vec<f64> = (0..y_res)
        .map(|j| y_min + j as f64 * (y_max - y_min) / (y_res - 1) as f64)
        .collect();

    let n = x_res * y_res;
    let mut grid = MeshGrid {
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
        z: Vec::with_capacity(n),
    };
    for &x in &xs {
        for &y in &ys {
            grid.x.push(x);
            grid.y.push(y);
            grid.z.push(f(x, y));
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_endpoints_inclusive() {
        let g = mesh_grid(|x, y| x + y, 0.0, 1.0, 2.0, 3.0, 3).unwrap();
        assert_eq!(g.x.len(), 9);
        assert_eq!(g.x[0], 0.0);
        assert_eq!(g.y[0], 2.0);
        assert_eq!(g.x[8], 1.0);
        assert_eq!(g.y[8], 3.0);
        assert_eq!(g.z[8], 4.0);
    }

    #[test]
    fn y_varies_fastest() {
        let g = mesh_grid_rect(|x, _| x, 0.0, 1.0, 0.0, 1.0, 2, 3).unwrap();
        assert_eq!(g.x, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(g.y, vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn zero_y_res_falls_back_to_x_res() {
        let g = mesh_grid_rect(|_, _| 0.0, 0.0, 1.0, 0.0, 1.0, 4, 0).unwrap();
        assert_eq!(g.x.len(), 16);
    }

    #[test]
    fn degenerate_resolution_is_rejected() {
        assert!(mesh_grid(|_, _| 0.0, 0.0, 1.0, 0.0, 1.0, 1).is_err());
        assert!(mesh_grid_rect(|_, _| 0.0, 0.0, 1.0, 0.0, 1.0, 2, 1).is_err());
    }
}
