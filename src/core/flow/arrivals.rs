//! Raw material arrivals.
//!
//! Each configured stream draws exponential inter-arrival times and keeps
//! rescheduling itself; only the run horizon ends it.

use crate::core::errors::SimError;
use crate::core::event::{EventId, EventKind};
use crate::core::execution::simulation_engine::Simulation;
use crate::core::types::{Product, ProductTypeId, SimTime};
use log::info;
use rand_distr::Distribution;

impl Simulation {
    pub(crate) fn start_arrival_streams(&mut self) -> Result<(), SimError> {
        let streams: Vec<ProductTypeId> = self.arrival_dists.keys().cloned().collect();
        for product_type in streams {
            self.schedule_next_arrival(product_type)?;
        }
        Ok(())
    }

    fn schedule_next_arrival(&mut self, product_type: ProductTypeId) -> Result<(), SimError> {
        let Some(dist) = self.arrival_dists.get(&product_type) else {
            return Err(SimError::UnknownProductType(product_type));
        };
        let gap: SimTime = dist.sample(&mut self.rng);
        self.scheduler.schedule_after(
            gap,
            EventKind::Arrival {
                product_type,
                recurring: true,
            },
        )?;
        Ok(())
    }

    /// Schedule a single arrival at `time` that does not start a stream.
    pub fn inject_arrival(
        &mut self,
        time: SimTime,
        product_type: impl Into<ProductTypeId>,
    ) -> Result<EventId, SimError> {
        let product_type = product_type.into();
        if !self.config.product_types.contains_key(&product_type) {
            return Err(SimError::UnknownProductType(product_type));
        }
        self.scheduler.schedule_event(
            time,
            EventKind::Arrival {
                product_type,
                recurring: false,
            },
        )
    }

    pub(crate) fn handle_arrival(
        &mut self,
        product_type: ProductTypeId,
        recurring: bool,
    ) -> Result<(), SimError> {
        self.stats.record_arrival();
        info!(
            "Raw material for {} arrived at time {}",
            product_type,
            self.current_time()
        );

        if recurring {
            self.schedule_next_arrival(product_type.clone())?;
        }
        self.attempt_stage(Product::new(product_type))
    }
}
