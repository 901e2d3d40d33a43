pub mod admission;
pub mod arrivals;
pub mod maintenance;
pub mod pipeline;
pub mod shift;

pub use admission::{AdmissionPolicy, BoundedRetry, DropAndPenalize, Rejection};
