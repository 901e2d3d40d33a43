//! Configuration for a factory simulation run
//!
//! Resource capacities, the stage -> resource-class routing table, product
//! recipes, arrival streams and the run horizon are all fixed here before the
//! simulation is constructed. `validate` rejects anything the engine would
//! otherwise trip over at run time.

use crate::core::errors::ConfigError;
use crate::core::types::{ProductTypeId, ResourceClass, SimTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One processing stage and the resource class it occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRoute {
    pub stage: String,
    pub resource: ResourceClass,
}

impl StageRoute {
    pub fn new(stage: impl Into<String>, resource: impl Into<ResourceClass>) -> Self {
        Self {
            stage: stage.into(),
            resource: resource.into(),
        }
    }
}

/// Recipe for one product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTypeSpec {
    /// Processing duration of each stage, in route order
    pub stage_durations: Vec<SimTime>,
    /// Changeover charged on the first stage only
    pub setup_duration: SimTime,
}

impl ProductTypeSpec {
    pub fn new(stage_durations: Vec<SimTime>, setup_duration: SimTime) -> Self {
        Self {
            stage_durations,
            setup_duration,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stage_durations.len()
    }

    /// Time a product needs when it never waits for a resource.
    pub fn uncontested_lead_time(&self) -> SimTime {
        self.setup_duration + self.stage_durations.iter().sum::<SimTime>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub capacities: BTreeMap<ResourceClass, u32>,
    pub stage_routes: Vec<StageRoute>,
    pub product_types: BTreeMap<ProductTypeId, ProductTypeSpec>,
    /// Mean arrival rate per product type; each entry is a recurring stream
    pub arrivals: BTreeMap<ProductTypeId, f64>,
    pub shift_length: SimTime,
    pub horizon: SimTime,
    pub maintenance_duration: SimTime,
    /// `None` seeds from the wall clock
    pub random_seed: Option<u64>,
    pub enable_event_logging: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        let mut capacities = BTreeMap::new();
        capacities.insert(ResourceClass::from("machines"), 10);
        capacities.insert(ResourceClass::from("operators"), 5);

        let mut product_types = BTreeMap::new();
        product_types.insert(
            ProductTypeId::from("ProductA"),
            ProductTypeSpec::new(vec![2.0, 1.5, 1.0, 1.0], 0.5),
        );
        product_types.insert(
            ProductTypeId::from("ProductB"),
            ProductTypeSpec::new(vec![3.0, 2.0, 1.5, 1.5], 0.75),
        );

        let mut arrivals = BTreeMap::new();
        arrivals.insert(ProductTypeId::from("ProductA"), 1.0);

        Self {
            capacities,
            stage_routes: vec![
                StageRoute::new("machining", "machines"),
                StageRoute::new("assembly", "machines"),
                StageRoute::new("quality_control", "operators"),
                StageRoute::new("packaging", "operators"),
            ],
            product_types,
            arrivals,
            shift_length: 8.0,
            horizon: 1000.0,
            maintenance_duration: 5.0,
            random_seed: None,
            enable_event_logging: false,
        }
    }
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, class: impl Into<ResourceClass>, units: u32) -> Self {
        self.capacities.insert(class.into(), units);
        self
    }

    /// Replace every capacity at once.
    pub fn with_capacities(mut self, capacities: BTreeMap<ResourceClass, u32>) -> Self {
        self.capacities = capacities;
        self
    }

    pub fn with_stage_routes(mut self, routes: Vec<StageRoute>) -> Self {
        self.stage_routes = routes;
        self
    }

    pub fn with_product_type(
        mut self,
        id: impl Into<ProductTypeId>,
        spec: ProductTypeSpec,
    ) -> Self {
        self.product_types.insert(id.into(), spec);
        self
    }

    /// Drop all configured product types (and their arrival streams).
    pub fn without_product_types(mut self) -> Self {
        self.product_types.clear();
        self.arrivals.clear();
        self
    }

    pub fn with_arrival_rate(mut self, id: impl Into<ProductTypeId>, rate: f64) -> Self {
        self.arrivals.insert(id.into(), rate);
        self
    }

    pub fn without_arrivals(mut self) -> Self {
        self.arrivals.clear();
        self
    }

    pub fn with_shift_length(mut self, length: SimTime) -> Self {
        self.shift_length = length;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_maintenance_duration(mut self, duration: SimTime) -> Self {
        self.maintenance_duration = duration;
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_event_logging_enabled(mut self, enabled: bool) -> Self {
        self.enable_event_logging = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stage_routes.is_empty() {
            return Err(ConfigError::NoStages);
        }

        for route in &self.stage_routes {
            if !self.capacities.contains_key(&route.resource) {
                return Err(ConfigError::UnknownStageResource {
                    stage: route.stage.clone(),
                    resource: route.resource.clone(),
                });
            }
        }

        for (id, spec) in &self.product_types {
            if spec.stage_durations.is_empty() {
                return Err(ConfigError::EmptyProduct {
                    product_type: id.clone(),
                });
            }
            if spec.stage_count() > self.stage_routes.len() {
                return Err(ConfigError::TooManyStages {
                    product_type: id.clone(),
                    defined: spec.stage_count(),
                    routes: self.stage_routes.len(),
                });
            }
            check_duration(&format!("setup duration of '{}'", id), spec.setup_duration)?;
            for (index, &duration) in spec.stage_durations.iter().enumerate() {
                check_duration(&format!("stage {} duration of '{}'", index, id), duration)?;
            }
        }

        for (id, &rate) in &self.arrivals {
            if !self.product_types.contains_key(id) {
                return Err(ConfigError::UnknownArrivalProduct(id.clone()));
            }
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ConfigError::InvalidArrivalRate {
                    product_type: id.clone(),
                    rate,
                });
            }
        }

        if !(self.shift_length.is_finite() && self.shift_length > 0.0) {
            return Err(ConfigError::InvalidShiftLength(self.shift_length));
        }
        check_duration("maintenance duration", self.maintenance_duration)?;
        check_duration("horizon", self.horizon)?;

        Ok(())
    }
}

fn check_duration(what: &str, value: SimTime) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration {
            what: what.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FactoryConfig::default();
        assert_eq!(config.capacities[&ResourceClass::from("machines")], 10);
        assert_eq!(config.capacities[&ResourceClass::from("operators")], 5);
        assert_eq!(config.shift_length, 8.0);
        assert_eq!(config.horizon, 1000.0);
        assert_eq!(config.stage_routes.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FactoryConfig::new()
            .with_capacity("machines", 12)
            .with_capacity("operators", 7)
            .with_shift_length(4.0)
            .with_random_seed(Some(7))
            .with_event_logging_enabled(true);

        assert_eq!(config.capacities[&ResourceClass::from("machines")], 12);
        assert_eq!(config.capacities[&ResourceClass::from("operators")], 7);
        assert_eq!(config.shift_length, 4.0);
        assert_eq!(config.random_seed, Some(7));
        assert!(config.enable_event_logging);
    }

    #[test]
    fn test_uncontested_lead_time() {
        let spec = ProductTypeSpec::new(vec![2.0, 1.5, 1.0, 1.0], 0.5);
        assert_eq!(spec.uncontested_lead_time(), 6.0);
    }

    #[test]
    fn test_rejects_route_to_unknown_resource() {
        let config =
            FactoryConfig::new().with_stage_routes(vec![StageRoute::new("welding", "welders")]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownStageResource {
                stage: "welding".to_string(),
                resource: "welders".into(),
            })
        );
    }

    #[test]
    fn test_rejects_more_stages_than_routes() {
        let config = FactoryConfig::new().with_product_type(
            "ProductC",
            ProductTypeSpec::new(vec![1.0, 1.0, 1.0, 1.0, 1.0], 0.0),
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyStages { defined: 5, routes: 4, .. })
        ));
    }

    #[test]
    fn test_rejects_arrivals_for_unknown_product() {
        let config = FactoryConfig::new().with_arrival_rate("ProductZ", 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownArrivalProduct("ProductZ".into()))
        );
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(FactoryConfig::new().with_shift_length(0.0).validate().is_err());
        assert!(FactoryConfig::new().with_arrival_rate("ProductA", 0.0).validate().is_err());
        assert!(FactoryConfig::new().with_maintenance_duration(-1.0).validate().is_err());
        assert!(FactoryConfig::new()
            .with_product_type("ProductA", ProductTypeSpec::new(vec![1.0, f64::NAN], 0.0))
            .validate()
            .is_err());
        assert!(FactoryConfig::new()
            .with_product_type("ProductA", ProductTypeSpec::new(vec![], 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_unbounded_horizon() {
        for horizon in [f64::INFINITY, f64::NAN, -1.0] {
            assert!(matches!(
                FactoryConfig::new().with_horizon(horizon).validate(),
                Err(ConfigError::InvalidDuration { ref what, .. }) if what == "horizon"
            ));
        }
        assert!(FactoryConfig::new().with_horizon(0.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_recipe() {
        assert!(FactoryConfig::new()
            .with_product_type("ProductA", ProductTypeSpec::new(vec![], 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serde_round_trip_keeps_routes() {
        let config = FactoryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: FactoryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stage_routes, config.stage_routes);
        assert_eq!(back.product_types, config.product_types);
    }
}
