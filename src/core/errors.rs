use super::types::{ProductTypeId, ResourceClass, SimTime};
use std::path::PathBuf;

/// Configuration rejected before a simulation is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("no stage routes configured")]
    NoStages,

    #[error("stage '{stage}' uses resource class '{resource}' which has no configured capacity")]
    UnknownStageResource { stage: String, resource: ResourceClass },

    #[error("product type '{product_type}' defines no stages")]
    EmptyProduct { product_type: ProductTypeId },

    #[error("product type '{product_type}' defines {defined} stages but only {routes} stage routes exist")]
    TooManyStages {
        product_type: ProductTypeId,
        defined: usize,
        routes: usize,
    },

    #[error("arrival stream references unknown product type '{0}'")]
    UnknownArrivalProduct(ProductTypeId),

    #[error("arrival rate for '{product_type}' must be positive and finite, got {rate}")]
    InvalidArrivalRate { product_type: ProductTypeId, rate: f64 },

    #[error("{what} must be finite and non-negative, got {value}")]
    InvalidDuration { what: String, value: f64 },

    #[error("shift length must be positive and finite, got {0}")]
    InvalidShiftLength(f64),
}

/// Defects detected while the simulation is running or being driven.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("cannot schedule event at t={requested} when current time is t={current}")]
    NonCausalEvent { requested: SimTime, current: SimTime },

    #[error("time must be a finite number, got {0}")]
    NonFiniteTime(SimTime),

    #[error("unknown resource class '{0}'")]
    UnknownResource(ResourceClass),

    #[error("unknown product type '{0}'")]
    UnknownProductType(ProductTypeId),

    #[error("product type '{product_type}' has no stage {stage}")]
    StageOutOfRange {
        product_type: ProductTypeId,
        stage: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure to persist the results report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Simulation(#[from] SimError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_causal_display_mentions_both_times() {
        let e = SimError::NonCausalEvent {
            requested: 1.5,
            current: 4.0,
        };
        let s = e.to_string();
        assert!(s.contains("t=1.5"));
        assert!(s.contains("t=4"));
    }

    #[test]
    fn test_config_error_converts_into_sim_error() {
        let e: SimError = ConfigError::NoStages.into();
        assert_eq!(e, SimError::Config(ConfigError::NoStages));
        assert_eq!(e.to_string(), "no stage routes configured");
    }

    #[test]
    fn test_report_error_is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(ReportError::Io {
            path: PathBuf::from("/nowhere/report.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert!(e.to_string().contains("/nowhere/report.txt"));
    }
}
