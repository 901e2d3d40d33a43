use crate::core::types::{Product, ResourceClass, SimTime};

/// What to do with a product whose stage resource is exhausted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Abandon the product. It never finishes.
    Drop,
    /// Try the same stage again after the given delay.
    RetryAfter(SimTime),
}

/// Decides the fate of a product that could not acquire its stage resource.
///
/// Waiting time for the rejected attempt is booked by the pipeline before the
/// policy is consulted, whatever the policy decides.
pub trait AdmissionPolicy {
    fn on_exhausted(&mut self, product: &Product, resource: &ResourceClass) -> Rejection;
}

/// Drop the product on the first rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropAndPenalize;

impl AdmissionPolicy for DropAndPenalize {
    fn on_exhausted(&mut self, _product: &Product, _resource: &ResourceClass) -> Rejection {
        Rejection::Drop
    }
}

/// Retry a rejected stage every `delay` time units, dropping the product
/// after `max_retries` failed retries.
#[derive(Debug, Clone, Copy)]
pub struct BoundedRetry {
    pub delay: SimTime,
    pub max_retries: u32,
}

impl BoundedRetry {
    pub fn new(delay: SimTime, max_retries: u32) -> Self {
        Self { delay, max_retries }
    }
}

impl AdmissionPolicy for BoundedRetry {
    fn on_exhausted(&mut self, product: &Product, _resource: &ResourceClass) -> Rejection {
        if product.retries >= self.max_retries {
            Rejection::Drop
        } else {
            Rejection::RetryAfter(self.delay)
        }
    }
}
