use serde::{Serialize, Deserialize};
use crate::cell::Cell;
use crate::eos::EquationOfState;
use crate::traits::Hydrodynamics;




/**
 * Hydrodynamics that keeps the density fixed and advances the clock by a
 * fixed time step. A steady inflow through the inner boundary may be given so
 * that the central source accretes.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticHydro {

    /// Time step size [s]
    pub time_step: f64,

    /// Mass accretion rate through the inner boundary [kg / s]
    #[serde(default)]
    pub inflow_rate: f64,
}




/**
 * Enum for any of the supported hydrodynamics types
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum AnyHydro {
    Static(StaticHydro),
}




// ============================================================================
impl Hydrodynamics for StaticHydro {

    fn validate(&self) -> anyhow::Result<()> {
        if self.time_step <= 0.0 {
            anyhow::bail!("time_step must be > 0")
        }
        if self.inflow_rate < 0.0 {
            anyhow::bail!("inflow_rate must be >= 0")
        }
        Ok(())
    }

    fn time_step(&self, _cells: &[Cell]) -> f64 {
        self.time_step
    }

    fn advance(&self, cells: &mut [Cell], eos: &EquationOfState, dt: f64) -> anyhow::Result<f64> {
        for cell in cells.iter() {
            let pressure = eos.pressure(cell.density, cell.mapped_neutral_fraction);

            if !pressure.is_finite() || pressure < 0.0 {
                anyhow::bail!("bad pressure {} at r={:.4e}", pressure, cell.midpoint())
            }
        }
        Ok(-self.inflow_rate * dt)
    }
}




// ============================================================================
impl From<StaticHydro> for AnyHydro {
    fn from(hydro: StaticHydro) -> Self {
        Self::Static(hydro)
    }
}

impl AnyHydro {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            AnyHydro::Static(hydro) => hydro.validate(),
        }
    }
}
