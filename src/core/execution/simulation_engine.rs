use crate::core::errors::{ConfigError, ReportError, SimError};
use crate::core::event::{DispatchRecord, Event, EventKind};
use crate::core::event_scheduler::EventScheduler;
use crate::core::execution::config::FactoryConfig;
use crate::core::flow::admission::{AdmissionPolicy, DropAndPenalize};
use crate::core::resource_pool::ResourcePool;
use crate::core::stats::Statistics;
use crate::core::types::{ProductTypeId, ResourceClass, SimTime};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Exp;
use std::collections::BTreeMap;
use std::path::Path;

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called when the simulation clock moves forward
    fn on_clock_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}

    /// Called after an event's handler has run
    fn on_event_dispatched(&mut self, _record: &DispatchRecord, _pool: &ResourcePool) {}
}

/// A single factory run: clock, event queue, resource pools, statistics and
/// random source, all owned by one value.
pub struct Simulation {
    pub(crate) config: FactoryConfig,
    pub(crate) scheduler: EventScheduler,
    pub(crate) pool: ResourcePool,
    pub(crate) stats: Statistics,
    pub(crate) rng: StdRng,
    pub(crate) arrival_dists: BTreeMap<ProductTypeId, Exp<f64>>,
    pub(crate) admission: Box<dyn AdmissionPolicy>,
    seed: u64,
    observers: Vec<Box<dyn SimulationObserver>>,
    trace: Vec<DispatchRecord>,
}

impl Simulation {
    /// Validate `config` and build a simulation with the first shift change
    /// and the first arrival of every stream already scheduled.
    pub fn new(config: FactoryConfig) -> Result<Self, SimError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(wall_clock_seed);
        let mut arrival_dists = BTreeMap::new();
        for (id, &rate) in &config.arrivals {
            let dist = Exp::new(rate).map_err(|_| ConfigError::InvalidArrivalRate {
                product_type: id.clone(),
                rate,
            })?;
            arrival_dists.insert(id.clone(), dist);
        }

        let pool = ResourcePool::new(&config.capacities);
        let stats = Statistics::new(config.capacities.keys(), config.product_types.keys());

        let mut sim = Self {
            config,
            scheduler: EventScheduler::new(),
            pool,
            stats,
            rng: StdRng::seed_from_u64(seed),
            arrival_dists,
            admission: Box::new(DropAndPenalize),
            seed,
            observers: Vec::new(),
            trace: Vec::new(),
        };

        sim.start_shift_clock()?;
        sim.start_arrival_streams()?;
        debug!(
            "simulation ready: seed {}, {} events pending",
            seed,
            sim.scheduler.len()
        );
        Ok(sim)
    }

    /// Replace the default drop-on-exhaustion policy.
    pub fn with_admission_policy(mut self, policy: impl AdmissionPolicy + 'static) -> Self {
        self.admission = Box::new(policy);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Dispatch the next event if it fires before `horizon`. Returns whether
    /// an event was dispatched.
    ///
    /// The shift clock never runs dry, so `horizon` must be finite.
    pub fn step(&mut self, horizon: SimTime) -> Result<bool, SimError> {
        if !horizon.is_finite() {
            return Err(SimError::NonFiniteTime(horizon));
        }
        let old_time = self.scheduler.current_time();
        let Some(event) = self.scheduler.pop_before(horizon) else {
            return Ok(false);
        };

        let new_time = self.scheduler.current_time();
        if new_time > old_time {
            for observer in &mut self.observers {
                observer.on_clock_advance(old_time, new_time);
            }
        }

        debug!("t={:.3} dispatch {}", new_time, event.kind);
        let record = DispatchRecord {
            time: event.time,
            kind: event.kind.clone(),
        };
        self.dispatch(event)?;

        for observer in &mut self.observers {
            observer.on_event_dispatched(&record, &self.pool);
        }
        if self.config.enable_event_logging {
            self.trace.push(record);
        }
        Ok(true)
    }

    /// Dispatch events until the queue drains or the next one is due at or
    /// after `horizon`. Returns the clock value reached.
    pub fn run_until(&mut self, horizon: SimTime) -> Result<SimTime, SimError> {
        let mut dispatched = 0u64;
        while self.step(horizon)? {
            dispatched += 1;
        }
        info!(
            "run stopped at t={:.3} (horizon {}): {} events dispatched, {} finished, {} dropped",
            self.current_time(),
            horizon,
            dispatched,
            self.stats.finished_count,
            self.stats.dropped_count
        );
        Ok(self.current_time())
    }

    /// Run to the configured horizon.
    pub fn run(&mut self) -> Result<SimTime, SimError> {
        self.run_until(self.config.horizon)
    }

    /// Run to `horizon` and write the results report to `report_path`.
    pub fn run_simulation(
        &mut self,
        horizon: SimTime,
        report_path: impl AsRef<Path>,
    ) -> Result<&Statistics, ReportError> {
        self.run_until(horizon)?;
        self.stats.write_report(report_path)?;
        Ok(&self.stats)
    }

    fn dispatch(&mut self, event: Event) -> Result<(), SimError> {
        match event.kind {
            EventKind::Arrival {
                product_type,
                recurring,
            } => self.handle_arrival(product_type, recurring),
            EventKind::StageSetupComplete {
                product,
                resource,
                processing,
            } => self.handle_setup_complete(product, resource, processing),
            EventKind::StageProcessingComplete { product, resource } => {
                self.complete_stage(product, resource)
            }
            EventKind::StageRetry { product } => self.attempt_stage(product),
            EventKind::Breakdown { resource } => self.handle_breakdown(resource),
            EventKind::MaintenanceComplete { resource } => self.handle_maintenance(resource),
            EventKind::ShiftChange => self.handle_shift_change(),
        }
    }

    pub fn current_time(&self) -> SimTime {
        self.scheduler.current_time()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn available(&self, class: &ResourceClass) -> Option<u32> {
        self.pool.available(class)
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Seed actually used, including one drawn from the wall clock.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Events dispatched so far. Empty unless event logging is enabled.
    pub fn trace(&self) -> &[DispatchRecord] {
        &self.trace
    }
}

fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
