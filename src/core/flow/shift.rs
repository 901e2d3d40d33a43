//! Shift changeovers: every `shift_length` time units all pools are refilled
//! to capacity, without reconciling units still held by in-flight products.

use crate::core::errors::SimError;
use crate::core::event::EventKind;
use crate::core::execution::simulation_engine::Simulation;
use log::info;

impl Simulation {
    pub(crate) fn start_shift_clock(&mut self) -> Result<(), SimError> {
        self.scheduler
            .schedule_event(self.config.shift_length, EventKind::ShiftChange)?;
        Ok(())
    }

    pub(crate) fn handle_shift_change(&mut self) -> Result<(), SimError> {
        info!("Shift change at time {}", self.current_time());
        self.pool.reset_to_full();
        self.stats.record_shift_change();
        self.scheduler
            .schedule_after(self.config.shift_length, EventKind::ShiftChange)?;
        Ok(())
    }
}
