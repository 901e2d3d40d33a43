use crate::core::types::{ProductTypeId, ResourceClass, SimTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run totals accumulated as a side effect of event handling.
///
/// Every field only ever grows during a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub usage_time: BTreeMap<ResourceClass, SimTime>,
    pub waiting_time: BTreeMap<ResourceClass, SimTime>,
    pub finished_count: u64,
    pub finished_by_type: BTreeMap<ProductTypeId, u64>,
    pub raw_material_count: u64,
    pub dropped_count: u64,
    pub shift_changes: u64,
    pub breakdowns: u64,
}

impl Statistics {
    /// Start with zeroed entries for every known resource class and product
    /// type so the report lists them even when nothing happened.
    pub fn new<'a>(
        classes: impl IntoIterator<Item = &'a ResourceClass>,
        product_types: impl IntoIterator<Item = &'a ProductTypeId>,
    ) -> Self {
        let mut stats = Self::default();
        for class in classes {
            stats.usage_time.insert(class.clone(), 0.0);
            stats.waiting_time.insert(class.clone(), 0.0);
        }
        for id in product_types {
            stats.finished_by_type.insert(id.clone(), 0);
        }
        stats
    }

    pub fn record_usage(&mut self, class: &ResourceClass, duration: SimTime) {
        *self.usage_time.entry(class.clone()).or_insert(0.0) += duration;
    }

    pub fn record_wait(&mut self, class: &ResourceClass, duration: SimTime) {
        *self.waiting_time.entry(class.clone()).or_insert(0.0) += duration;
    }

    pub fn record_arrival(&mut self) {
        self.raw_material_count += 1;
    }

    pub fn record_finished(&mut self, product_type: &ProductTypeId) {
        self.finished_count += 1;
        let of_type = self.finished_by_type.entry(product_type.clone()).or_insert(0);
        *of_type += 1;
        debug!(
            "finished {} ({} total, {} of this type)",
            product_type, self.finished_count, of_type
        );
    }

    pub fn record_drop(&mut self) {
        self.dropped_count += 1;
    }

    pub fn record_shift_change(&mut self) {
        self.shift_changes += 1;
    }

    pub fn record_breakdown(&mut self) {
        self.breakdowns += 1;
    }

    pub fn usage(&self, class: &ResourceClass) -> SimTime {
        self.usage_time.get(class).copied().unwrap_or(0.0)
    }

    pub fn waiting(&self, class: &ResourceClass) -> SimTime {
        self.waiting_time.get(class).copied().unwrap_or(0.0)
    }

    pub fn finished_of(&self, product_type: &ProductTypeId) -> u64 {
        self.finished_by_type.get(product_type).copied().unwrap_or(0)
    }
}
