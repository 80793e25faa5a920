use crate::cell::Cell;
use crate::physics::NEUTRAL_FLOOR;




/**
 * Monte Carlo estimate of the photoionisation rate in a cell (1 / s), from
 * the total path length the packets covered in it during the time step. Each
 * of the `photons_per_step` emitted packets represents an equal share of the
 * source's ionising photon rate.
 */
pub fn mean_intensity(cell: &Cell, ionising_rate: f64, photons_per_step: usize) -> f64 {
    ionising_rate * cell.cross_section * cell.path_length / (photons_per_step as f64 * cell.volume())
}




/**
 * Ionized fraction after a time `dt` of pure recombination, starting from
 * `f0`, with recombination rate `c` = n_H alpha_B.
 */
pub fn recombine(f0: f64, c: f64, dt: f64) -> f64 {
    1.0 / (1.0 / f0 + c * dt)
}




/**
 * Exact solution of df/dt = (1 - f) J - f^2 C after a time `dt`, starting
 * from `f0`. Requires J > 0 and C > 0.
 */
pub fn ionize(f0: f64, j: f64, c: f64, dt: f64) -> f64 {
    let r = j / c;
    let root = (r * (r + 4.0)).sqrt();
    let arg = (2.0 * f0 + r) / root;
    let t = (0.5 * c * root * dt).tanh();
    0.5 * root * (arg + t) / (1.0 + arg * t) - 0.5 * r
}




/**
 * Advance the ionization state of the cell over the time step `dt`, using the
 * cell's mean intensity and the ionized fraction left by the previous step.
 *
 * A fully neutral cell is ionized linearly, since the recombination term
 * vanishes; if that overshoots, the cell is left at the neutral floor rather
 * than exactly ionized. A fully ionized cell, or one without radiation, only
 * recombines.
 */
pub fn update_ionization(cell: &mut Cell, dt: f64) {
    let f0 = cell.previous_ionized_fraction;
    let j = cell.mean_intensity;
    let c = cell.number_density() * cell.recombination_coefficient;

    let (ionized, neutral) = if cell.neutral_fraction == 1.0 {
        let f = f0 + j * dt;

        if f > 1.0 {
            (1.0 - NEUTRAL_FLOOR, NEUTRAL_FLOOR)
        } else {
            (f, 1.0 - f)
        }
    } else if j == 0.0 || cell.neutral_fraction == 0.0 {
        let f = recombine(f0, c, dt);
        (f, 1.0 - f)
    } else {
        let f = ionize(f0, j, c, dt);
        (f, 1.0 - f)
    };

    cell.ionized_fraction = ionized;
    cell.neutral_fraction = neutral;
    cell.previous_ionized_fraction = ionized;
}




// ============================================================================
#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use crate::cell::Cell;
    use crate::physics::{HYDROGEN_MASS, NEUTRAL_FLOOR};
    use super::*;

    /**
     * A cell with hydrogen number density 1, so that C equals the
     * recombination coefficient.
     */
    fn cell(neutral_fraction: f64, mean_intensity: f64, c: f64) -> Cell {
        let mut cell = Cell::new(1.0, 2.0).with_density(HYDROGEN_MASS);
        cell.recombination_coefficient = c;
        cell.mean_intensity = mean_intensity;
        cell.set_neutral_fraction(neutral_fraction);
        cell
    }

    #[test]
    fn dark_cell_recombines() {
        let mut c = cell(0.5, 0.0, 0.1);
        update_ionization(&mut c, 1.0);
        assert_relative_eq!(c.ionized_fraction, 1.0 / 2.1, max_relative = 1e-12);
        assert_relative_eq!(c.neutral_fraction, 1.0 - 1.0 / 2.1, max_relative = 1e-12);
        assert_eq!(c.previous_ionized_fraction, c.ionized_fraction);
    }

    #[test]
    fn zero_time_step_leaves_every_branch_unchanged() {
        for &(x, j) in &[(1.0, 0.3), (0.0, 0.3), (0.4, 0.0), (0.4, 0.3)] {
            let mut c = cell(x, j, 0.1);
            let f0 = c.previous_ionized_fraction;
            update_ionization(&mut c, 0.0);
            assert_relative_eq!(c.ionized_fraction, f0, epsilon = 1e-14);
            assert_relative_eq!(c.neutral_fraction + c.ionized_fraction, 1.0);
        }
    }

    #[test]
    fn neutral_cell_ionizes_linearly() {
        let mut c = cell(1.0, 0.2, 0.1);
        update_ionization(&mut c, 2.0);
        assert_relative_eq!(c.ionized_fraction, 0.4, max_relative = 1e-12);
        assert_relative_eq!(c.neutral_fraction, 0.6, max_relative = 1e-12);
    }

    #[test]
    fn overshooting_neutral_cell_is_held_at_floor() {
        let mut c = cell(1.0, 5.0, 0.1);
        update_ionization(&mut c, 1.0);
        assert_eq!(c.neutral_fraction, NEUTRAL_FLOOR);
        assert_eq!(c.ionized_fraction, 1.0 - NEUTRAL_FLOOR);
        assert!(c.ionized_fraction.is_finite());
    }

    #[test]
    fn fully_ionized_cell_does_not_produce_nan() {
        let mut c = cell(0.0, 3.0, 0.1);
        update_ionization(&mut c, 1.0);
        assert!(c.ionized_fraction.is_finite());
        assert_relative_eq!(c.ionized_fraction, 1.0 / 1.1, max_relative = 1e-12);
    }

    #[test]
    fn long_time_step_reaches_ionization_equilibrium() {
        let (j, c) = (0.3f64, 0.1f64);
        let r = j / c;
        let equilibrium = 0.5 * ((r * (r + 4.0)).sqrt() - r);
        let f = ionize(0.2, j, c, 1e4);
        assert_relative_eq!(f, equilibrium, max_relative = 1e-10);
        assert_relative_eq!((1.0 - f) * j, f * f * c, max_relative = 1e-8);
    }

    #[test]
    fn mean_intensity_scales_with_path_length() {
        let mut c = Cell::new(0.0, 1.0);
        c.cross_section = 2.0;
        c.path_length = 3.0;
        let j = mean_intensity(&c, 10.0, 5);
        assert_relative_eq!(j, 10.0 * 2.0 * 3.0 / (5.0 * 4.0 / 3.0 * std::f64::consts::PI));
    }
}
