pub mod data;
pub mod evolution;
pub mod manager;
pub mod traits;

pub use data::DataConfig;
pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
