use serde::{Serialize, Deserialize};




/**
 * Equation of state used by the hydrodynamics to turn density (and the
 * neutral fraction, for photoionized gas) into pressure
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum EquationOfState {

    /// Adiabatic gas with the given index and adiabatic sound speed
    Ideal { gamma_law_index: f64, sound_speed: f64 },

    /// Gas at a fixed sound speed
    Isothermal { sound_speed: f64 },

    /// Isothermal gas whose temperature is raised by `pressure_contrast` where
    /// it is ionized
    Bondi { sound_speed: f64, pressure_contrast: f64 },
}




// ============================================================================
impl EquationOfState {

    pub fn validate(&self) -> anyhow::Result<()> {
        match *self {
            EquationOfState::Ideal { gamma_law_index, sound_speed } => {
                if gamma_law_index <= 1.0 {
                    anyhow::bail!("gamma_law_index must be > 1")
                }
                if sound_speed <= 0.0 {
                    anyhow::bail!("sound_speed must be > 0")
                }
            }
            EquationOfState::Isothermal { sound_speed } => {
                if sound_speed <= 0.0 {
                    anyhow::bail!("sound_speed must be > 0")
                }
            }
            EquationOfState::Bondi { sound_speed, pressure_contrast } => {
                if sound_speed <= 0.0 {
                    anyhow::bail!("sound_speed must be > 0")
                }
                if pressure_contrast < 1.0 {
                    anyhow::bail!("pressure_contrast must be >= 1")
                }
            }
        }
        Ok(())
    }

    /**
     * Gas pressure (Pa) at the given mass density and neutral fraction.
     */
    pub fn pressure(&self, density: f64, neutral_fraction: f64) -> f64 {
        match *self {
            EquationOfState::Ideal { gamma_law_index, sound_speed } => {
                density * sound_speed * sound_speed / gamma_law_index
            }
            EquationOfState::Isothermal { sound_speed } => {
                density * sound_speed * sound_speed
            }
            EquationOfState::Bondi { sound_speed, pressure_contrast } => {
                let ionized_fraction = 1.0 - neutral_fraction;
                density * sound_speed * sound_speed * (pressure_contrast * ionized_fraction + neutral_fraction)
            }
        }
    }
}
