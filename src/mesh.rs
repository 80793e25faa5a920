use serde::{Serialize, Deserialize};
use crate::cell::Cell;
use crate::traits::InitialModel;




/**
 * Abstract description of a uniformly spaced radial grid of spherical shells
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mesh {

    /// Inner boundary radius; may be zero [m]
    pub inner_radius: f64,

    /// Outer boundary radius [m]
    pub outer_radius: f64,

    /// Number of radial cells
    pub num_cells: usize,
}




// ============================================================================
impl Mesh {

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.inner_radius < 0.0 {
            anyhow::bail!("inner_radius must be >= 0")
        }
        if self.outer_radius <= self.inner_radius {
            anyhow::bail!("outer_radius must be greater than inner_radius")
        }
        if self.num_cells == 0 {
            anyhow::bail!("num_cells must be > 0")
        }
        Ok(())
    }

    /**
     * Return the radial length of each cell.
     */
    pub fn spacing(&self) -> f64 {
        (self.outer_radius - self.inner_radius) / self.num_cells as f64
    }

    /**
     * Return the radius of the i-th cell wall; wall 0 is the inner boundary.
     */
    pub fn wall(&self, i: usize) -> f64 {
        if i == self.num_cells {
            self.outer_radius
        } else {
            self.inner_radius + self.spacing() * i as f64
        }
    }

    /**
     * Generate the cells of this grid, with densities sampled from the given
     * model at the cell midpoints.
     */
    pub fn cells<M: InitialModel>(&self, model: &M) -> Vec<Cell> {
        (0..self.num_cells)
            .map(|i| {
                let cell = Cell::new(self.wall(i), self.wall(i + 1));
                let density = model.density_at(cell.midpoint());
                cell.with_density(density)
            })
            .collect()
    }
}
