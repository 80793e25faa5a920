use serde::{Serialize, Deserialize};
use crate::traits::InitialModel;




/**
 * Medium whose density falls off as a power of radius, rho ~ r^-index. An
 * index of 3/2 is the density of gas in free fall onto a point mass.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerLaw {

    /// Mass density at the reference radius [kg / m^3]
    pub density: f64,

    /// Reference radius [m]
    pub radius: f64,

    /// Power law index; the density decreases outward when positive
    pub index: f64,
}




// ============================================================================
impl InitialModel for PowerLaw {

    fn validate(&self) -> anyhow::Result<()> {
        if self.density <= 0.0 {
            anyhow::bail!("density must be > 0")
        }
        if self.radius <= 0.0 {
            anyhow::bail!("radius must be > 0")
        }
        Ok(())
    }

    fn density_at(&self, radius: f64) -> f64 {
        self.density * (radius / self.radius).powf(-self.index)
    }
}
