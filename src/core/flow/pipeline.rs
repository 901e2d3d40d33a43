//! Stage pipeline: moves a product through its fixed stage sequence.
//!
//! ```text
//! Arrived -> AwaitingStage(n) -> InSetup(0) -> InProcessing(n) -> StageComplete(n)
//!                  ^                                                   |
//!                  +---------------- n + 1 < stage count --------------+
//! ```
//!
//! Setup time is charged to the resource when the stage is admitted, and
//! processing time when setup completes.

use super::admission::Rejection;
use crate::core::errors::SimError;
use crate::core::event::EventKind;
use crate::core::execution::simulation_engine::Simulation;
use crate::core::resource_pool::Release;
use crate::core::types::{Product, ResourceClass, SimTime};
use log::{debug, info};

/// Everything needed to admit a product to one stage.
struct StagePlan {
    stage: String,
    resource: ResourceClass,
    processing: SimTime,
    setup: SimTime,
}

impl Simulation {
    /// `None` once the product has gone past its last stage.
    fn stage_plan(&self, product: &Product) -> Result<Option<StagePlan>, SimError> {
        let spec = self
            .config
            .product_types
            .get(&product.product_type)
            .ok_or_else(|| SimError::UnknownProductType(product.product_type.clone()))?;

        let Some(&processing) = spec.stage_durations.get(product.stage_index) else {
            return Ok(None);
        };
        let route = self
            .config
            .stage_routes
            .get(product.stage_index)
            .ok_or_else(|| SimError::StageOutOfRange {
                product_type: product.product_type.clone(),
                stage: product.stage_index,
            })?;

        Ok(Some(StagePlan {
            stage: route.stage.clone(),
            resource: route.resource.clone(),
            processing,
            setup: if product.stage_index == 0 {
                spec.setup_duration
            } else {
                0.0
            },
        }))
    }

    /// Try to admit `product` to its current stage.
    pub(crate) fn attempt_stage(&mut self, mut product: Product) -> Result<(), SimError> {
        let Some(plan) = self.stage_plan(&product)? else {
            return Ok(());
        };

        if self.pool.try_acquire(&plan.resource)? {
            self.stats.record_usage(&plan.resource, plan.setup);
            debug!(
                "t={:.3} {} admitted to {} on {} (setup {})",
                self.current_time(),
                product.product_type,
                plan.stage,
                plan.resource,
                plan.setup
            );
            self.scheduler.schedule_after(
                plan.setup,
                EventKind::StageSetupComplete {
                    product,
                    resource: plan.resource,
                    processing: plan.processing,
                },
            )?;
            return Ok(());
        }

        self.stats.record_wait(&plan.resource, plan.processing);
        match self.admission.on_exhausted(&product, &plan.resource) {
            Rejection::Drop => {
                self.stats.record_drop();
                info!(
                    "t={:.3} {} dropped at {}: no {} available",
                    self.current_time(),
                    product.product_type,
                    plan.stage,
                    plan.resource
                );
            }
            Rejection::RetryAfter(delay) => {
                product.retries += 1;
                debug!(
                    "t={:.3} {} waits {} for {} (retry {})",
                    self.current_time(),
                    product.product_type,
                    delay,
                    plan.resource,
                    product.retries
                );
                self.scheduler
                    .schedule_after(delay, EventKind::StageRetry { product })?;
            }
        }
        Ok(())
    }

    pub(crate) fn handle_setup_complete(
        &mut self,
        product: Product,
        resource: ResourceClass,
        processing: SimTime,
    ) -> Result<(), SimError> {
        self.stats.record_usage(&resource, processing);
        self.scheduler.schedule_after(
            processing,
            EventKind::StageProcessingComplete { product, resource },
        )?;
        Ok(())
    }

    /// Release the finished stage's unit, then finish the product or send it
    /// on to the next stage.
    pub(crate) fn complete_stage(
        &mut self,
        mut product: Product,
        resource: ResourceClass,
    ) -> Result<(), SimError> {
        if self.pool.release(&resource)? == Release::Withheld {
            info!(
                "{} unit freed at time {} taken out of service by a pending breakdown",
                resource,
                self.current_time()
            );
        }
        let stage = self
            .config
            .stage_routes
            .get(product.stage_index)
            .map(|route| route.stage.as_str())
            .unwrap_or("unknown");
        info!(
            "{} for {} completed at time {}",
            stage,
            product.product_type,
            self.current_time()
        );

        product.advance();
        if self.stage_plan(&product)?.is_none() {
            self.stats.record_finished(&product.product_type);
            Ok(())
        } else {
            self.attempt_stage(product)
        }
    }
}
