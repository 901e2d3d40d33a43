pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{FactoryConfig, ProductTypeSpec, StageRoute};
pub use simulation_engine::{Simulation, SimulationObserver};
