use std::f64::consts::PI;
use serde::{Serialize, Deserialize};
use crate::physics::{HYDROGEN_MASS, HYDROGEN_CROSS_SECTION, CASE_B_RECOMBINATION};




/**
 * A single spherical shell of the radial grid. The geometry and the
 * hydrodynamic inputs are owned by the hydrodynamics solver; the radiative
 * fields are owned by the transport engine.
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {

    /// Radius of the inner wall (m)
    pub lower_wall: f64,

    /// Radius of the outer wall (m)
    pub upper_wall: f64,

    /// Physical radial length of the shell (m)
    pub length: f64,

    /// Mass density (kg / m^3)
    pub density: f64,

    /// Photoionisation cross section (m^2)
    pub cross_section: f64,

    /// Case-B recombination coefficient (m^3 / s)
    pub recombination_coefficient: f64,

    /// Photoionisation rate estimated from the packet path lengths (1 / s)
    pub mean_intensity: f64,

    /// Total packet path length through this shell during the current
    /// time step (m)
    pub path_length: f64,

    /// Neutral hydrogen fraction evolved by the equilibrium solver
    pub neutral_fraction: f64,

    /// Ionized hydrogen fraction; always one minus the neutral fraction
    pub ionized_fraction: f64,

    /// Ionized fraction at the end of the previous time step, the initial
    /// value for the next equilibrium update
    pub previous_ionized_fraction: f64,

    /// Neutral fraction from the front profile, consumed by the equation of
    /// state
    pub mapped_neutral_fraction: f64,

    /// Integrated density squared, r^2 rho^2 dr, of the shell
    pub shell_budget: f64,
}




// ============================================================================
impl Cell {

    /**
     * Create a fully neutral cell spanning the given radii, with hydrogen
     * cross section and recombination coefficient, and zero density.
     */
    pub fn new(lower_wall: f64, upper_wall: f64) -> Self {
        Self {
            lower_wall,
            upper_wall,
            length: upper_wall - lower_wall,
            density: 0.0,
            cross_section: HYDROGEN_CROSS_SECTION,
            recombination_coefficient: CASE_B_RECOMBINATION,
            mean_intensity: 0.0,
            path_length: 0.0,
            neutral_fraction: 1.0,
            ionized_fraction: 0.0,
            previous_ionized_fraction: 0.0,
            mapped_neutral_fraction: 1.0,
            shell_budget: 0.0,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /**
     * Set the neutral fraction, keeping the ionized fraction and the
     * equilibrium initial condition consistent with it.
     */
    pub fn set_neutral_fraction(&mut self, neutral_fraction: f64) {
        self.neutral_fraction = neutral_fraction;
        self.ionized_fraction = 1.0 - neutral_fraction;
        self.previous_ionized_fraction = self.ionized_fraction;
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower_wall + self.upper_wall)
    }

    /**
     * Hydrogen number density (1 / m^3).
     */
    pub fn number_density(&self) -> f64 {
        self.density / HYDROGEN_MASS
    }

    /**
     * Optical depth per unit length of the neutral gas (1 / m).
     */
    pub fn opacity(&self) -> f64 {
        self.cross_section * self.number_density() * self.neutral_fraction
    }

    /**
     * Physical volume of the shell (m^3). The innermost cell of a grid that
     * starts at the origin is a filled sphere.
     */
    pub fn volume(&self) -> f64 {
        if self.lower_wall == 0.0 {
            4.0 / 3.0 * PI * self.length.powi(3)
        } else {
            4.0 / 3.0 * PI * (self.upper_wall.powi(3) - self.lower_wall.powi(3))
        }
    }

    /**
     * The radial integral of r^2 over the shell, (r_max^3 - r_min^3) / 3.
     */
    pub fn volume_integral(&self) -> f64 {
        (self.upper_wall.powi(3) - self.lower_wall.powi(3)) / 3.0
    }
}
