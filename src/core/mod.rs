pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod flow;
pub mod resource_pool;
pub mod stats;
pub mod types;
