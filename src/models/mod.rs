mod uniform;
mod power_law;

pub use uniform::Uniform;
pub use power_law::PowerLaw;
