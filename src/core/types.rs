use serde::{Deserialize, Serialize};

/// Simulated time in abstract time units.
pub type SimTime = f64;

/// Named pool of interchangeable capacity units (e.g. "machines")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceClass(String);

impl ResourceClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceClass {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a configured product type (e.g. "ProductA")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductTypeId(String);

impl ProductTypeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductTypeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for ProductTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work travelling through the stage pipeline.
///
/// Products are passed by value from one scheduled event to the next; nothing
/// else holds a reference to an in-flight product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_type: ProductTypeId,
    pub stage_index: usize,
    /// Rejected admission attempts at the current stage
    pub retries: u32,
}

impl Product {
    pub fn new(product_type: ProductTypeId) -> Self {
        Self {
            product_type,
            stage_index: 0,
            retries: 0,
        }
    }

    /// Move on to the next stage, clearing the retry count.
    pub fn advance(&mut self) {
        self.stage_index += 1;
        self.retries = 0;
    }
}
