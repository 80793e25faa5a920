use serde::{Serialize, Deserialize};
use crate::app::{self, Configuration};
use crate::eos::EquationOfState;
use crate::state::State;




/**
 * Useful per-cell data for post-processing and plotting
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct CellProducts {
    pub lower_wall: f64,
    pub upper_wall: f64,
    pub density: f64,
    pub pressure: f64,
    pub mean_intensity: f64,
    pub neutral_fraction: f64,
    pub mapped_neutral_fraction: f64,
}




/**
 * Useful data for post-processing and plotting
 */
#[derive(Serialize, Deserialize)]
pub struct Products {
    pub time: f64,
    pub front_radius: f64,
    pub central_mass: f64,
    pub packets_in_flight: usize,
    pub cells: Vec<CellProducts>,
    pub config: Configuration,
    pub version: String,
}




// ============================================================================
impl Products {
    pub fn from_state(state: &State, eos: &EquationOfState, config: &Configuration) -> Self {
        let cells = state.cells.iter().map(|cell| CellProducts {
            lower_wall: cell.lower_wall,
            upper_wall: cell.upper_wall,
            density: cell.density,
            pressure: eos.pressure(cell.density, cell.mapped_neutral_fraction),
            mean_intensity: cell.mean_intensity,
            neutral_fraction: cell.neutral_fraction,
            mapped_neutral_fraction: cell.mapped_neutral_fraction,
        }).collect();

        Products {
            time: state.time,
            front_radius: state.front.radius,
            central_mass: state.accretion.central_mass,
            packets_in_flight: state.bank.live_count(),
            cells,
            config: config.clone(),
            version: app::VERSION_AND_BUILD.to_string(),
        }
    }
}
