use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Serialize, Deserialize};
use crate::bank::PacketBank;
use crate::cell::Cell;
use crate::front::{self, Accretion, FrontTracker};
use crate::mesh::Mesh;
use crate::radiation::Radiation;
use crate::traits::InitialModel;




/**
 * The full solution state for the simulation
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct State {
    pub time: f64,
    pub iteration: u64,
    pub cells: Vec<Cell>,
    pub bank: PacketBank,
    pub front: FrontTracker,
    pub accretion: Accretion,
    pub rng: ChaChaRng,
}




// ============================================================================
impl State {

    /**
     * Generate a state from the given initial model, mesh, and radiation
     * parameters. The front starts at the configured initial radius: the
     * neutral fractions follow its profile, and the ionisation budget that
     * the self-consistent front will hold on to is the one which places the
     * front there.
     */
    pub fn from_model<M: InitialModel>(model: &M, mesh: &Mesh, radiation: &Radiation, time: f64) -> Self {
        let profile = radiation.profile(radiation.initial_radius);
        let mut cells = mesh.cells(model);

        for cell in &mut cells {
            cell.cross_section = radiation.cross_section;
            cell.recombination_coefficient = radiation.recombination_coefficient;
            cell.shell_budget = front::shell_budget(cell);
            cell.mapped_neutral_fraction = profile.neutral_fraction(cell.lower_wall, cell.upper_wall);
            cell.set_neutral_fraction(cell.mapped_neutral_fraction);
        }
        let target_budget = front::target_budget(&cells, radiation.initial_radius);

        Self {
            time,
            iteration: 0,
            cells,
            bank: PacketBank::new(radiation.bank_capacity),
            front: FrontTracker::new(radiation.initial_radius, target_budget),
            accretion: Accretion::new(radiation.central_mass, radiation.volume_correction),
            rng: ChaChaRng::seed_from_u64(radiation.seed),
        }
    }

    /**
     * Return the total number of grid cells in this state.
     */
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use crate::front::{IonisationMode, self_consistent_radius};
    use crate::mesh::Mesh;
    use crate::models::Uniform;
    use crate::profile::Transition;
    use crate::radiation::Radiation;
    use super::State;

    fn radiation() -> Radiation {
        serde_yaml::from_str("
            mode: self_consistent
            transition: jump
            initial_radius: 5.0
            bank_capacity: 100
        ").unwrap()
    }

    #[test]
    fn initial_state_holds_front_at_initial_radius() {
        let mesh = Mesh { inner_radius: 0.0, outer_radius: 10.0, num_cells: 10 };
        let radiation = radiation();
        let state = State::from_model(&Uniform { density: 1.0 }, &mesh, &radiation, 0.0);

        assert_eq!(state.total_cells(), 10);
        assert_eq!(state.front.radius, 5.0);
        assert_eq!(state.bank.capacity(), 100);
        assert_eq!(state.cells[4].neutral_fraction, 0.0);
        assert_eq!(state.cells[5].neutral_fraction, 1.0);
        assert!((self_consistent_radius(&state.cells, state.front.target_budget) - 5.0).abs() < 1e-12);
        assert_eq!(radiation.mode, IonisationMode::SelfConsistent);
        assert_eq!(radiation.transition, Transition::Jump);
    }
}
