use super::errors::SimError;
use super::types::ResourceClass;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSlot {
    pub capacity: u32,
    pub available: u32,
}

/// Outcome of handing a unit back to its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Returned,
    /// The pool was already full (a shift reset returned this unit early),
    /// so the release was absorbed.
    Clamped,
    /// A breakdown was waiting for a unit of this class; the returned unit
    /// went straight out of service.
    Withheld,
}

/// Outcome of a breakdown hitting a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outage {
    /// An idle unit was taken out of service at once.
    Immediate,
    /// Every unit was busy; the next unit released goes out of service.
    Deferred,
}

/// Outcome of maintenance finishing on a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restore {
    /// The broken unit is back in service (possibly clamped).
    Released(Release),
    /// The outage was still waiting for a unit, so it is simply cancelled.
    Cancelled,
}

/// Finite pools of interchangeable units, keyed by resource class.
///
/// `0 <= available <= capacity` holds for every class after every operation.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    slots: BTreeMap<ResourceClass, ResourceSlot>,
    /// Breakdowns still waiting for a busy unit to come back
    pending_outages: BTreeMap<ResourceClass, u32>,
    clamped_releases: u64,
}

impl ResourcePool {
    pub fn new(capacities: &BTreeMap<ResourceClass, u32>) -> Self {
        let slots = capacities
            .iter()
            .map(|(class, &capacity)| {
                (
                    class.clone(),
                    ResourceSlot {
                        capacity,
                        available: capacity,
                    },
                )
            })
            .collect();
        Self {
            slots,
            pending_outages: BTreeMap::new(),
            clamped_releases: 0,
        }
    }

    fn slot_mut(&mut self, class: &ResourceClass) -> Result<&mut ResourceSlot, SimError> {
        self.slots
            .get_mut(class)
            .ok_or_else(|| SimError::UnknownResource(class.clone()))
    }

    /// Take one unit if any is free. A `false` result creates no obligation
    /// to release.
    pub fn try_acquire(&mut self, class: &ResourceClass) -> Result<bool, SimError> {
        let slot = self.slot_mut(class)?;
        if slot.available > 0 {
            slot.available -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Return one unit to the pool, unless a deferred outage claims it.
    pub fn release(&mut self, class: &ResourceClass) -> Result<Release, SimError> {
        if self.take_pending_outage(class) {
            return Ok(Release::Withheld);
        }
        self.put_back(class)
    }

    fn put_back(&mut self, class: &ResourceClass) -> Result<Release, SimError> {
        let slot = self.slot_mut(class)?;
        if slot.available < slot.capacity {
            slot.available += 1;
            Ok(Release::Returned)
        } else {
            warn!(
                "release on '{}' absorbed: pool already at capacity {}",
                class, slot.capacity
            );
            self.clamped_releases += 1;
            Ok(Release::Clamped)
        }
    }

    /// Take one unit out of service: an idle one if there is any, otherwise
    /// the next one released.
    pub fn take_offline(&mut self, class: &ResourceClass) -> Result<Outage, SimError> {
        if self.try_acquire(class)? {
            Ok(Outage::Immediate)
        } else {
            *self.pending_outages.entry(class.clone()).or_insert(0) += 1;
            Ok(Outage::Deferred)
        }
    }

    /// Put a broken unit back in service. An outage that never got its unit
    /// is cancelled instead, leaving availability untouched.
    pub fn restore(&mut self, class: &ResourceClass) -> Result<Restore, SimError> {
        if self.take_pending_outage(class) {
            Ok(Restore::Cancelled)
        } else {
            self.put_back(class).map(Restore::Released)
        }
    }

    fn take_pending_outage(&mut self, class: &ResourceClass) -> bool {
        match self.pending_outages.get_mut(class) {
            Some(pending) if *pending > 0 => {
                *pending -= 1;
                true
            }
            _ => false,
        }
    }

    /// Refill every class to capacity and forget deferred outages. Units
    /// still held by in-flight products are not tracked, so the pool may
    /// report more free units than are physically idle until those products
    /// release.
    pub fn reset_to_full(&mut self) {
        for slot in self.slots.values_mut() {
            slot.available = slot.capacity;
        }
        self.pending_outages.clear();
    }

    pub fn available(&self, class: &ResourceClass) -> Option<u32> {
        self.slots.get(class).map(|slot| slot.available)
    }

    pub fn capacity(&self, class: &ResourceClass) -> Option<u32> {
        self.slots.get(class).map(|slot| slot.capacity)
    }

    pub fn contains(&self, class: &ResourceClass) -> bool {
        self.slots.contains_key(class)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&ResourceClass, &ResourceSlot)> {
        self.slots.iter()
    }

    pub fn clamped_releases(&self) -> u64 {
        self.clamped_releases
    }

    /// Breakdowns on `class` still waiting for a unit to be released.
    pub fn pending_outages(&self, class: &ResourceClass) -> u32 {
        self.pending_outages.get(class).copied().unwrap_or(0)
    }
}
