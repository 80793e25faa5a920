use serde::{Serialize, Deserialize};
use crate::bank::DEFAULT_CAPACITY;
use crate::front::IonisationMode;
use crate::physics::{HYDROGEN_CROSS_SECTION, CASE_B_RECOMBINATION};
use crate::profile::{Profile, Transition};
use crate::source::EmissionSource;




/**
 * Parameters of the ionising source and of the radiation transport
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Radiation {

    /// How the ionisation front is found: [constant | self_consistent | monte_carlo]
    pub mode: IonisationMode,

    /// Shape of the neutral fraction across the front: [jump | smooth]
    pub transition: Transition,

    /// Full width of a smooth transition [m]
    #[serde(default)]
    pub transition_width: f64,

    /// Front radius at the start of the run [m]
    pub initial_radius: f64,

    /// Ionising photon rate of the source [1 / s]
    #[serde(default = "Radiation::default_ionising_rate")]
    pub ionising_rate: f64,

    /// Number of packets emitted per time step
    #[serde(default = "Radiation::default_photons_per_step")]
    pub photons_per_step: usize,

    /// Number of packets that may be carried between time steps
    #[serde(default = "Radiation::default_bank_capacity")]
    pub bank_capacity: usize,

    /// Seed for the packet random number generator
    #[serde(default)]
    pub seed: u64,

    /// Photoionisation cross section [m^2]
    #[serde(default = "Radiation::default_cross_section")]
    pub cross_section: f64,

    /// Case-B recombination coefficient [m^3 / s]
    #[serde(default = "Radiation::default_recombination_coefficient")]
    pub recombination_coefficient: f64,

    /// Mass of the central source [kg]
    #[serde(default = "Radiation::default_central_mass")]
    pub central_mass: f64,

    /// Fraction of the inner boundary mass flux added to the central mass;
    /// zero keeps the source luminosity fixed
    #[serde(default)]
    pub volume_correction: f64,

    /// Name of the binary front radius log, relative to the output directory
    #[serde(default = "Radiation::default_log_file")]
    pub log_file: String,
}




// ============================================================================
impl Radiation {
    fn default_ionising_rate() -> f64 { 1e47 }
    fn default_photons_per_step() -> usize { 1000 }
    fn default_bank_capacity() -> usize { DEFAULT_CAPACITY }
    fn default_cross_section() -> f64 { HYDROGEN_CROSS_SECTION }
    fn default_recombination_coefficient() -> f64 { CASE_B_RECOMBINATION }
    fn default_central_mass() -> f64 { 1.0 }
    fn default_log_file() -> String { "ionisation_radius.dat".into() }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.initial_radius < 0.0 {
            anyhow::bail!("initial_radius must be >= 0")
        }
        if self.transition_width < 0.0 {
            anyhow::bail!("transition_width must be >= 0")
        }
        if self.transition == Transition::Smooth && self.transition_width == 0.0 {
            anyhow::bail!("a smooth transition needs transition_width > 0")
        }
        if self.mode == IonisationMode::MonteCarlo {
            if self.photons_per_step == 0 {
                anyhow::bail!("photons_per_step must be > 0")
            }
            if self.ionising_rate <= 0.0 {
                anyhow::bail!("ionising_rate must be > 0")
            }
        }
        if self.cross_section <= 0.0 || self.recombination_coefficient <= 0.0 {
            anyhow::bail!("cross_section and recombination_coefficient must be > 0")
        }
        if self.central_mass <= 0.0 {
            anyhow::bail!("central_mass must be > 0")
        }
        Ok(())
    }

    pub fn source(&self, luminosity_factor: f64) -> EmissionSource {
        EmissionSource {
            ionising_rate: self.ionising_rate * luminosity_factor,
            photons_per_step: self.photons_per_step,
        }
    }

    pub fn profile(&self, front_radius: f64) -> Profile {
        Profile::new(self.transition, front_radius, self.transition_width)
    }
}
