use serde::{Serialize, Deserialize};
use crate::cell::Cell;




/**
 * Relative change of the front radius above which a new record is logged
 */
pub static RECORD_TOLERANCE: f64 = 1e-4;




/**
 * How the ionisation front radius is obtained each time step
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IonisationMode {

    /// The front stays at its initial radius
    Constant,

    /// The front is where the integrated recombination rate, r^2 rho^2 dr,
    /// uses up the source's ionisation budget
    SelfConsistent,

    /// The front is the first cell that the Monte Carlo transport left
    /// mostly neutral
    MonteCarlo,
}




/**
 * One entry of the front radius log
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrontRecord {
    pub time: f64,
    pub radius: f64,
    pub ionising_rate: f64,
}




/**
 * Keeps the current front radius, and the radius that was last written to
 * the log
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrontTracker {
    pub radius: f64,
    pub last_recorded: f64,
    pub target_budget: f64,
}




/**
 * The mass of the accreting point source. The source luminosity grows with
 * the mass it accretes through the inner boundary.
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Accretion {
    pub initial_mass: f64,
    pub central_mass: f64,

    /// Fraction of the mass flux into the inner boundary that is added to
    /// the central mass
    pub volume_correction: f64,
}




// ============================================================================
impl FrontTracker {

    pub fn new(radius: f64, target_budget: f64) -> Self {
        Self {
            radius,
            last_recorded: 0.0,
            target_budget,
        }
    }

    pub fn moved_appreciably(&self, radius: f64) -> bool {
        (radius - self.last_recorded).abs() > RECORD_TOLERANCE * (radius + self.last_recorded).abs()
    }

    /**
     * Set the new front radius. Returns true if it moved far enough from the
     * last recorded radius to be recorded again, in which case it becomes the
     * last recorded radius.
     */
    pub fn update(&mut self, radius: f64) -> bool {
        self.radius = radius;

        if self.moved_appreciably(radius) {
            self.last_recorded = radius;
            true
        } else {
            false
        }
    }
}




// ============================================================================
impl Accretion {

    pub fn new(central_mass: f64, volume_correction: f64) -> Self {
        Self {
            initial_mass: central_mass,
            central_mass,
            volume_correction,
        }
    }

    /**
     * Account for a mass flux `mass_flux` through the inner boundary; the
     * flux is negative for inflow.
     */
    pub fn accrete(&mut self, mass_flux: f64) {
        self.central_mass -= mass_flux * self.volume_correction;
    }

    pub fn luminosity_factor(&self) -> f64 {
        luminosity_factor(self.central_mass / self.initial_mass)
    }
}




/**
 * Increase of the ionising luminosity of a source which has grown to
 * `mass_ratio` times its initial mass, fitted to Keto (2003).
 */
pub fn luminosity_factor(mass_ratio: f64) -> f64 {
    7.96185873 * (mass_ratio.powf(2.47692987) - 1.0) + 1.0
}




/**
 * The integrated density squared, r^2 rho^2 dr, of a cell.
 */
pub fn shell_budget(cell: &Cell) -> f64 {
    cell.volume_integral() * cell.density * cell.density
}




/**
 * The ionisation budget that places the front at `radius`: the sum of the
 * shell budgets inside it, counting the shell it falls in by volume. The
 * cells' `shell_budget` must be current.
 */
pub fn target_budget(cells: &[Cell], radius: f64) -> f64 {
    let r3 = radius.powi(3);

    cells.iter().map(|cell| {
        let (rmin, rmax) = (cell.lower_wall, cell.upper_wall);

        if rmax < radius {
            cell.shell_budget
        } else if rmin < radius {
            cell.shell_budget * (r3 - rmin.powi(3)) / (rmax.powi(3) - rmin.powi(3))
        } else {
            0.0
        }
    }).sum()
}




/**
 * Radius out to which the ionisation budget `budget` is able to keep the gas
 * ionized. Shells are used up from the inside out; within the shell where the
 * budget runs out, the radius is interpolated by volume. The cells'
 * `shell_budget` must be current.
 */
pub fn self_consistent_radius(cells: &[Cell], budget: f64) -> f64 {
    let mut remaining = budget;
    let mut radius = 0.0;

    for cell in cells {
        if remaining <= 0.0 {
            break
        }
        let (rmin, rmax) = (cell.lower_wall, cell.upper_wall);
        let ifac = (remaining / cell.shell_budget).min(1.0);

        if ifac >= 1.0 {
            radius = rmax;
        } else if ifac > 0.0 {
            radius = (ifac * rmax.powi(3) + (1.0 - ifac) * rmin.powi(3)).cbrt();
        }
        remaining -= ifac * cell.shell_budget;
    }
    radius
}




/**
 * Radius of the lower wall of the innermost cell that is at least half
 * neutral, or the outer edge of the grid if there is none.
 */
pub fn threshold_radius(cells: &[Cell]) -> f64 {
    match cells.iter().find(|cell| cell.neutral_fraction >= 0.5) {
        Some(cell) => cell.lower_wall,
        None => cells.last().map_or(0.0, |cell| cell.upper_wall),
    }
}
