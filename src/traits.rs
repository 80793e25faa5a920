use crate::cell::Cell;
use crate::eos::EquationOfState;




/**
 * Implemented by types that can generate the density field used as an
 * initial value
 */
pub trait InitialModel: Clone {

    /**
     * Return an error if this model was not configured to yield acceptable
     * data.
     */
    fn validate(&self) -> anyhow::Result<()>;

    /**
     * Return the mass density (kg / m^3) at the given radius.
     */
    fn density_at(&self, radius: f64) -> f64;
}




/**
 * Interface to the hydrodynamics solver which the radiation transport is
 * coupled to. The solver owns the density of the cells and reads back their
 * mapped neutral fraction through the equation of state.
 */
pub trait Hydrodynamics: Clone {

    /**
     * Return an error if the hydrodynamics instance was somehow configured
     * improperly.
     */
    fn validate(&self) -> anyhow::Result<()>;

    /**
     * Return the time step size (s) for the current cell state.
     */
    fn time_step(&self, cells: &[Cell]) -> f64;

    /**
     * Advance the hydrodynamic fields of the cells by `dt`, and return the
     * mass flux (kg) through the inner boundary during the step; negative for
     * inflow.
     */
    fn advance(&self, cells: &mut [Cell], eos: &EquationOfState, dt: f64) -> anyhow::Result<f64>;
}
