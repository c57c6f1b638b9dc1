pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{CountRange, GalaxyGenerationConfig};
pub use error::{GalaxyError, Result};
pub use random::RandomSource;
