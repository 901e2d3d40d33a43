pub mod core;

// Re-export commonly used types
pub use crate::core::errors::{ConfigError, ReportError, SimError};
pub use crate::core::event::{DispatchRecord, EventId, EventKind};
pub use crate::core::execution::{
    FactoryConfig, ProductTypeSpec, Simulation, SimulationObserver, StageRoute,
};
pub use crate::core::flow::{AdmissionPolicy, BoundedRetry, DropAndPenalize, Rejection};
pub use crate::core::resource_pool::ResourcePool;
pub use crate::core::stats::Statistics;
pub use crate::core::types::{Product, ProductTypeId, ResourceClass, SimTime};
