pub mod report;
pub mod statistics;

pub use statistics::Statistics;
