pub mod app;
pub mod bank;
pub mod cell;
pub mod eos;
pub mod equilibrium;
pub mod front;
pub mod hydro;
pub mod io;
pub mod mesh;
pub mod models;
pub mod physics;
pub mod products;
pub mod profile;
pub mod radiation;
pub mod scheme;
pub mod source;
pub mod state;
pub mod tasks;
pub mod traits;
pub mod transport;
pub mod yaml_patch;
