use serde::{Serialize, Deserialize};
use crate::traits::InitialModel;




/**
 * Medium of constant density
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Uniform {

    /// Mass density [kg / m^3]
    pub density: f64,
}




// ============================================================================
impl InitialModel for Uniform {

    fn validate(&self) -> anyhow::Result<()> {
        if self.density <= 0.0 {
            anyhow::bail!("density must be > 0")
        }
        Ok(())
    }

    fn density_at(&self, _radius: f64) -> f64 {
        self.density
    }
}
