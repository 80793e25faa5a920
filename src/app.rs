pub static DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub static VERSION_AND_BUILD: &str = git_version::git_version!(prefix=concat!("v", env!("CARGO_PKG_VERSION"), " "), fallback="unknown");


use std::{
    ffi::OsStr,
    fs::{File, read_to_string},
    path::Path,
};
use serde::{
    Serialize,
    Deserialize,
};
use crate::eos::EquationOfState;
use crate::hydro::AnyHydro;
use crate::io;
use crate::mesh::Mesh;
use crate::models::{
    Uniform,
    PowerLaw,
};
use crate::radiation::Radiation;
use crate::state::State;
use crate::tasks::Tasks;
use crate::traits::InitialModel;
use crate::yaml_patch::{self, Patch};


// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum Error {

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("{0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    YamlPatch(#[from] yaml_patch::Error),

    #[error("{0}")]
    AppIO(#[from] io::Error),

    #[error("unknown input file type '{0}'")]
    UnknownInputType(String),
}


/**
 * Model choice
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum Model {
    Uniform(Uniform),
    PowerLaw(PowerLaw),
}


/**
 * Simulation control: how long to run for, how frequently to perform side
 * effects, etc
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Control {
    pub final_time: f64,
    pub start_time: f64,
    pub checkpoint_interval: f64,
    pub products_interval: f64,

    /// Number of worker threads; zero runs every cell update on the main
    /// thread
    #[serde(default = "Control::default_num_threads")]
    pub num_threads: usize,

    /// Number of cells handed to a worker at a time
    #[serde(default = "Control::default_block_size")]
    pub block_size: usize,
}


/**
 * User configuration
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub radiation: Radiation,
    pub hydro: AnyHydro,
    pub model: Model,
    pub mesh: Mesh,
    pub eos: EquationOfState,
    pub control: Control,
}


/**
 * App state
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct App {
    pub state: State,
    pub tasks: Tasks,
    pub config: Configuration,
    pub version: String,
}




// ============================================================================
impl Control {
    fn default_num_threads() -> usize {
        num_cpus::get()
    }

    fn default_block_size() -> usize {
        256
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.num_threads >= 1024 {
            anyhow::bail!("num_threads must be < 1024")
        }
        if self.block_size == 0 {
            anyhow::bail!("block_size must be > 0")
        }
        if self.checkpoint_interval < 0.0 {
            anyhow::bail!("checkpoint_interval <= 0.0")
        }
        if self.products_interval < 0.0 {
            anyhow::bail!("products_interval <= 0.0")
        }
        if self.final_time < self.start_time {
            anyhow::bail!("final_time < start_time")
        }
        Ok(())
    }
}




// ============================================================================
impl InitialModel for Model {
    fn validate(&self) -> anyhow::Result<()> {
        match self {
            Model::Uniform(m)  => m.validate(),
            Model::PowerLaw(m) => m.validate(),
        }
    }

    fn density_at(&self, radius: f64) -> f64 {
        match self {
            Model::Uniform(m)  => m.density_at(radius),
            Model::PowerLaw(m) => m.density_at(radius),
        }
    }
}




// ============================================================================
impl Configuration {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.radiation.validate()?;
        self.hydro.validate()?;
        self.model.validate()?;
        self.mesh.validate()?;
        self.eos.validate()?;
        self.control.validate()?;
        Ok(())
    }
}




// ============================================================================
impl App {

    /**
     * Return self as a result, which will be in an error state if any of the
     * configuration items did not pass validation.
     */
    pub fn validate(self) -> anyhow::Result<Self> {
        self.config.validate()?;
        Ok(self)
    }

    /**
     * Construct a new App instance from a user configuration, after applying
     * the given patches. A patch is either a YAML file name or a
     * `key.subkey=value` item.
     */
    pub fn from_config(mut config: Configuration, patches: &[String]) -> Result<Self, Error> {
        for extra_config_str in patches {
            if extra_config_str.ends_with(".yaml") {
                config.patch_from_reader(File::open(extra_config_str)?)?
            } else {
                config.patch_from_key_val(extra_config_str)?
            }
        }

        let state = State::from_model(&config.model, &config.mesh, &config.radiation, config.control.start_time);
        let tasks = Tasks::new(config.control.start_time);
        Ok(Self{state, tasks, config, version: VERSION_AND_BUILD.to_string()})
    }

    /**
     * Construct a new App instance from a file: may be a config.yaml or a
     * chkpt.0000.cbor. Patches to a checkpoint only change its configuration
     * and leave the solution state as it was.
     */
    pub fn from_file(filename: &str, patches: &[String]) -> Result<Self, Error> {
        match Path::new(&filename).extension().and_then(OsStr::to_str) {
            Some("yaml") => Self::from_config(serde_yaml::from_str(&read_to_string(filename)?)?, patches),
            Some("cbor") => {
                let mut app: Self = io::read_cbor(filename)?;
                for extra_config_str in patches {
                    app.config.patch_from_key_val(extra_config_str)?
                }
                Ok(app)
            }
            _ => Err(Error::UnknownInputType(filename.to_string())),
        }
    }

    /**
     * Construct a new App instance from a preset (hard-coded) configuration
     * name, or otherwise an input file if no matching preset is found.
     */
    pub fn from_preset_or_file(input: &str, patches: &[String]) -> Result<Self, Error> {
        match input {
            "bondi" => Self::from_config(serde_yaml::from_str(std::include_str!("../setups/bondi.yaml"))?, patches),
            _ => Self::from_file(input, patches),
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use crate::front::IonisationMode;
    use crate::hydro::AnyHydro;
    use super::{App, Error};

    #[test]
    fn bondi_preset_is_valid() {
        let app = App::from_preset_or_file("bondi", &[]).unwrap().validate().unwrap();
        assert_eq!(app.state.total_cells(), 2700);
        assert_eq!(app.state.time, 0.0);
        assert!(app.config.control.num_threads > 0);
    }

    #[test]
    fn patches_override_the_preset() {
        let patches = vec![
            "radiation.mode=monte_carlo".to_string(),
            "mesh.num_cells=100".to_string(),
            "hydro.static.time_step=10.0".to_string(),
        ];
        let app = App::from_preset_or_file("bondi", &patches).unwrap().validate().unwrap();
        assert_eq!(app.config.radiation.mode, IonisationMode::MonteCarlo);
        assert_eq!(app.state.total_cells(), 100);

        match app.config.hydro {
            AnyHydro::Static(hydro) => assert_eq!(hydro.time_step, 10.0),
        }
    }

    #[test]
    fn unknown_input_type_is_an_error() {
        match App::from_preset_or_file("setup.toml", &[]) {
            Err(Error::UnknownInputType(name)) => assert_eq!(name, "setup.toml"),
            _ => panic!("expected an unknown input type"),
        }
    }

    #[cfg(feature = "serde_cbor")]
    #[test]
    fn checkpoint_restores_the_app() {
        let app = App::from_preset_or_file("bondi", &["mesh.num_cells=10".to_string()]).unwrap();
        let path = std::env::temp_dir().join(format!("ionfront-chkpt-{}.cbor", std::process::id()));
        let path_str = path.to_str().unwrap();

        crate::io::write_cbor(&app, path_str).unwrap();
        let restored = App::from_file(path_str, &["control.final_time=2.0e9".to_string()]).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(restored.state.total_cells(), 10);
        assert_eq!(restored.state.front.target_budget, app.state.front.target_budget);
        assert_eq!(restored.config.control.final_time, 2.0e9);
    }
}
