//! Breakdowns and maintenance.
//!
//! Nothing inside the simulation schedules breakdowns; they are injected from
//! outside through `trigger_breakdown`.

use crate::core::errors::SimError;
use crate::core::event::{EventId, EventKind};
use crate::core::execution::simulation_engine::Simulation;
use crate::core::resource_pool::{Outage, Release, Restore};
use crate::core::types::{ResourceClass, SimTime};
use log::info;

impl Simulation {
    /// Schedule a breakdown of one `resource` unit at time `at`.
    pub fn trigger_breakdown(
        &mut self,
        resource: impl Into<ResourceClass>,
        at: SimTime,
    ) -> Result<EventId, SimError> {
        let resource = resource.into();
        if !self.pool.contains(&resource) {
            return Err(SimError::UnknownResource(resource));
        }
        self.scheduler
            .schedule_event(at, EventKind::Breakdown { resource })
    }

    /// Take a unit out of service and book its return after the maintenance
    /// duration. With every unit busy, the next one released is taken.
    pub(crate) fn handle_breakdown(&mut self, resource: ResourceClass) -> Result<(), SimError> {
        match self.pool.take_offline(&resource)? {
            Outage::Immediate => {
                info!("Breakdown occurred on {} at time {}", resource, self.current_time())
            }
            Outage::Deferred => info!(
                "Breakdown occurred on {} at time {}; no idle unit, next release goes offline",
                resource,
                self.current_time()
            ),
        }
        self.stats.record_breakdown();
        self.scheduler.schedule_after(
            self.config.maintenance_duration,
            EventKind::MaintenanceComplete { resource },
        )?;
        Ok(())
    }

    pub(crate) fn handle_maintenance(&mut self, resource: ResourceClass) -> Result<(), SimError> {
        match self.pool.restore(&resource)? {
            Restore::Released(Release::Clamped) => info!(
                "Maintenance completed on {} at time {} (unit already restored by shift change)",
                resource,
                self.current_time()
            ),
            Restore::Released(_) => info!(
                "Maintenance completed on {} at time {}",
                resource,
                self.current_time()
            ),
            Restore::Cancelled => info!(
                "Maintenance completed on {} at time {} before any unit was freed",
                resource,
                self.current_time()
            ),
        }
        Ok(())
    }
}
