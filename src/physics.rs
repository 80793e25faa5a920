/// Speed of light in m / s
pub static LIGHT_SPEED: f64 = 2.99792458e8;

/// Mass of a hydrogen atom in kg
pub static HYDROGEN_MASS: f64 = 1.6737236e-27;

/// Hydrogen photoionisation cross section at 13.6 eV in m^2
pub static HYDROGEN_CROSS_SECTION: f64 = 6.3e-22;

/// Case-B recombination coefficient of hydrogen at 10^4 K in m^3 / s
pub static CASE_B_RECOMBINATION: f64 = 2.7e-19;

/// Neutral fraction assigned to a cell which is overshot out of the fully
/// neutral state in a single step
pub static NEUTRAL_FLOOR: f64 = 1e-8;




/**
 * Errors raised by the radiation transport engine
 */
#[derive(thiserror::Error, Debug, Clone)]
pub enum RadiationError {

    #[error("packet bank overflow: {stored} packets stored, capacity is {capacity}")]
    BankOverflow { stored: usize, capacity: usize },

    #[error("a parallel worker failed: {0}")]
    WorkerFailed(String),
}
