use serde::{Serialize, Deserialize};




/**
 * Shape of the transition from ionized to neutral gas across the front
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Jump,
    Smooth,
}




/**
 * Radial profile of the neutral fraction around an ionisation front.
 *
 * The smooth profile is the cubic f(x) = A x^3 + S x + 1/2 in x = r - R,
 * which is 1/2 with slope S at the front radius R, and reaches 0 and 1 with
 * zero slope at x = -W/2 and x = +W/2. These conditions fix S = 3 / (2W)
 * and A = -16 S^3 / 27.
 */
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    transition: Transition,
    front_radius: f64,
    half_width: f64,
    slope: f64,
    cubic: f64,
}




// ============================================================================
fn cube_difference(a: f64, b: f64) -> f64 {
    (b - a) * (b * b + a * b + a * a)
}




// ============================================================================
impl Profile {

    /**
     * Create a profile around the given front radius, with a transition band
     * of full width `width`. A smooth transition of zero width is a jump.
     */
    pub fn new(transition: Transition, front_radius: f64, width: f64) -> Self {
        let transition = match transition {
            Transition::Smooth if width <= 0.0 => Transition::Jump,
            t => t,
        };
        let slope = if width > 0.0 { 1.5 / width } else { 0.0 };

        Self {
            transition,
            front_radius,
            half_width: 0.5 * width.max(0.0),
            slope,
            cubic: -16.0 * slope.powi(3) / 27.0,
        }
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn front_radius(&self) -> f64 {
        self.front_radius
    }

    /**
     * Inner and outer edges of the transition band.
     */
    pub fn band(&self) -> (f64, f64) {
        (self.front_radius - self.half_width, self.front_radius + self.half_width)
    }

    /**
     * The neutral fraction at radius `r`.
     */
    pub fn value_at(&self, r: f64) -> f64 {
        match self.transition {
            Transition::Jump => {
                if r < self.front_radius { 0.0 } else { 1.0 }
            }
            Transition::Smooth => {
                let x = r - self.front_radius;

                if x <= -self.half_width {
                    0.0
                } else if x >= self.half_width {
                    1.0
                } else {
                    self.cubic * x.powi(3) + self.slope * x + 0.5
                }
            }
        }
    }

    /**
     * The volume-averaged neutral fraction of the shell between `rmin` and
     * `rmax`.
     */
    pub fn neutral_fraction(&self, rmin: f64, rmax: f64) -> f64 {
        match self.transition {
            Transition::Jump   => self.jump_fraction(rmin, rmax),
            Transition::Smooth => self.smooth_fraction(rmin, rmax),
        }
    }

    fn jump_fraction(&self, rmin: f64, rmax: f64) -> f64 {
        let r = self.front_radius;

        if rmax <= r {
            0.0
        } else if rmin < r {
            cube_difference(r, rmax) / cube_difference(rmin, rmax)
        } else {
            1.0
        }
    }

    fn smooth_fraction(&self, rmin: f64, rmax: f64) -> f64 {
        let (lo, hi) = self.band();

        if rmax <= lo {
            return 0.0
        }
        if rmin >= hi {
            return 1.0
        }
        let (a, b, outside) = match (rmin < lo, rmax > hi) {
            (true,  false) => (lo,   rmax, 0.0),
            (false, false) => (rmin, rmax, 0.0),
            (false, true)  => (rmin, hi,   cube_difference(hi, rmax)),
            (true,  true)  => (lo,   hi,   cube_difference(hi, rmax)),
        };
        (self.smooth_integral(a, b) + outside) / cube_difference(rmin, rmax)
    }

    /**
     * Three times the integral of f(r) r^2 from `a` to `b`, both inside the
     * band. Evaluated in the offset x = r - R to avoid cancellation at large
     * radii.
     */
    fn smooth_integral(&self, a: f64, b: f64) -> f64 {
        let r = self.front_radius;
        let (c3, c1) = (self.cubic, self.slope);

        let antiderivative = |x: f64| {
            let x2 = x * x;
            let x3 = x * x2;
            c3 * x2 * x2 * (x2 / 6.0 + 0.4 * r * x + 0.25 * r * r)
                + c1 * x2 * (0.25 * x2 + 2.0 / 3.0 * r * x + 0.5 * r * r)
                + 0.5 * (x3 / 3.0 + r * x2 + r * r * x)
        };
        3.0 * (antiderivative(b - r) - antiderivative(a - r))
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use super::{Profile, Transition, cube_difference};

    #[test]
    fn smooth_profile_matches_its_boundary_conditions() {
        let p = Profile::new(Transition::Smooth, 10.0, 2.0);
        let (lo, hi) = p.band();
        let h = 1e-6;
        assert_eq!((lo, hi), (9.0, 11.0));
        assert_relative_eq!(p.value_at(10.0), 0.5);
        assert_relative_eq!((p.value_at(10.0 + h) - p.value_at(10.0 - h)) / (2.0 * h), 0.75, max_relative = 1e-6);
        assert_relative_eq!(p.value_at(lo + h), 0.0, epsilon = 1e-10);
        assert_relative_eq!(p.value_at(hi - h), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn cells_outside_the_band_are_ionized_or_neutral() {
        let p = Profile::new(Transition::Smooth, 10.0, 2.0);
        assert_eq!(p.neutral_fraction(8.0, 9.0), 0.0);
        assert_eq!(p.neutral_fraction(11.0, 12.0), 1.0);
        assert_relative_eq!(p.neutral_fraction(8.999, 9.0), 0.0);
        assert_relative_eq!(p.neutral_fraction(9.0, 9.001), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.neutral_fraction(10.999, 11.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.neutral_fraction(11.0, 11.001), 1.0);
    }

    #[test]
    fn cell_averages_add_up_to_the_combined_interval() {
        let p = Profile::new(Transition::Smooth, 10.0, 2.0);
        let walls = [8.5, 9.3, 9.9, 10.4, 10.8, 11.6];
        let summed: f64 = walls
            .windows(2)
            .map(|w| p.neutral_fraction(w[0], w[1]) * cube_difference(w[0], w[1]))
            .sum();
        let direct = p.neutral_fraction(8.5, 11.6) * cube_difference(8.5, 11.6);
        assert_relative_eq!(summed, direct, max_relative = 1e-10);
    }

    #[test]
    fn symmetric_cell_around_the_front_matches_the_midpoint_integral() {
        let p = Profile::new(Transition::Smooth, 10.0, 2.0);
        let numerical: f64 = (0..10000)
            .map(|i| {
                let r = 9.5 + (i as f64 + 0.5) * 1e-4;
                p.value_at(r) * r * r * 1e-4
            })
            .sum::<f64>() * 3.0 / cube_difference(9.5, 10.5);
        assert_relative_eq!(p.neutral_fraction(9.5, 10.5), numerical, max_relative = 1e-6);
    }

    #[test]
    fn jump_profile_is_volume_weighted() {
        let p = Profile::new(Transition::Jump, 2.0, 0.0);
        assert_eq!(p.neutral_fraction(0.0, 1.0), 0.0);
        assert_eq!(p.neutral_fraction(2.0, 3.0), 1.0);
        assert_relative_eq!(p.neutral_fraction(1.0, 3.0), 19.0 / 26.0);
    }

    #[test]
    fn smooth_profile_without_width_is_a_jump() {
        let p = Profile::new(Transition::Smooth, 2.0, 0.0);
        assert_eq!(p.transition(), Transition::Jump);
        assert_relative_eq!(p.neutral_fraction(1.0, 3.0), 19.0 / 26.0);
    }

    #[test]
    fn smooth_profile_is_accurate_at_large_radii() {
        let p = Profile::new(Transition::Smooth, 1.5e13, 7.5e11);
        let (lo, hi) = p.band();
        let x = p.neutral_fraction(lo - 1e10, hi + 1e10);
        let coarse = Profile::new(Transition::Smooth, 1.5, 0.075).neutral_fraction(lo * 1e-13 - 1e-3, hi * 1e-13 + 1e-3);
        assert_relative_eq!(x, coarse, max_relative = 1e-9);
    }
}
