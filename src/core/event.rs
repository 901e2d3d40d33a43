use super::types::{Product, ProductTypeId, ResourceClass, SimTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happens when an event fires. Each variant carries only the data its
/// handler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Raw material for a product type arrives. Recurring arrivals schedule
    /// the next draw from their stream.
    Arrival {
        product_type: ProductTypeId,
        recurring: bool,
    },
    /// Setup on the held unit is done; processing starts.
    StageSetupComplete {
        product: Product,
        resource: ResourceClass,
        processing: SimTime,
    },
    /// The product's current stage is finished and its unit can be released.
    StageProcessingComplete {
        product: Product,
        resource: ResourceClass,
    },
    /// A previously rejected product tries its current stage again.
    StageRetry { product: Product },
    Breakdown { resource: ResourceClass },
    MaintenanceComplete { resource: ResourceClass },
    ShiftChange,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Arrival { .. } => "arrival",
            EventKind::StageSetupComplete { .. } => "setup_complete",
            EventKind::StageProcessingComplete { .. } => "stage_complete",
            EventKind::StageRetry { .. } => "stage_retry",
            EventKind::Breakdown { .. } => "breakdown",
            EventKind::MaintenanceComplete { .. } => "maintenance",
            EventKind::ShiftChange => "shift_change",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Arrival { product_type, .. } => write!(f, "Arrival({})", product_type),
            EventKind::StageSetupComplete {
                product, resource, ..
            } => write!(
                f,
                "SetupComplete({} stage {} on {})",
                product.product_type, product.stage_index, resource
            ),
            EventKind::StageProcessingComplete { product, resource } => write!(
                f,
                "StageComplete({} stage {} on {})",
                product.product_type, product.stage_index, resource
            ),
            EventKind::StageRetry { product } => write!(
                f,
                "StageRetry({} stage {} attempt {})",
                product.product_type,
                product.stage_index,
                product.retries + 1
            ),
            EventKind::Breakdown { resource } => write!(f, "Breakdown({})", resource),
            EventKind::MaintenanceComplete { resource } => write!(f, "Maintenance({})", resource),
            EventKind::ShiftChange => write!(f, "ShiftChange"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub time: SimTime,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: SimTime, kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            time,
            kind,
        }
    }
}

/// One entry of the dispatch trace kept when event logging is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub time: SimTime,
    pub kind: EventKind,
}
