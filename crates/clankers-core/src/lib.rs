// clankers-core: Errors and solver configuration for the Clankers IK crates.

pub mod config;
pub mod error;

pub use config::PlanarArmConfig;
pub use error::{ClankersError, ConfigError, IkError};
