use super::errors::SimError;
use super::event::{Event, EventId, EventKind};
use super::types::SimTime;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent {
    pub sequence_num: u64,
    pub event: Event,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default).
        // Equal times fall back to insertion order.
        other
            .event
            .time
            .total_cmp(&self.event.time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Time-ordered queue of pending events plus the simulation clock.
///
/// The clock only moves when an event is taken off the queue, and nothing may
/// be scheduled before the current clock value.
pub struct EventScheduler {
    event_queue: BinaryHeap<ScheduledEvent>,
    sequence_counter: u64,
    current_time: SimTime,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            current_time: 0.0,
        }
    }

    /// Schedule an event at absolute time `time`.
    pub fn schedule_event(&mut self, time: SimTime, kind: EventKind) -> Result<EventId, SimError> {
        if !time.is_finite() {
            return Err(SimError::NonFiniteTime(time));
        }
        if time < self.current_time {
            return Err(SimError::NonCausalEvent {
                requested: time,
                current: self.current_time,
            });
        }

        let event = Event::new(time, kind);
        let id = event.id;
        self.event_queue.push(ScheduledEvent {
            sequence_num: self.sequence_counter,
            event,
        });
        self.sequence_counter += 1;
        Ok(id)
    }

    /// Schedule an event `delay` time units after the current clock.
    pub fn schedule_after(&mut self, delay: SimTime, kind: EventKind) -> Result<EventId, SimError> {
        self.schedule_event(self.current_time + delay, kind)
    }

    /// Take the earliest event if it fires strictly before `horizon`,
    /// advancing the clock to its time. A NaN horizon admits nothing.
    pub fn pop_before(&mut self, horizon: SimTime) -> Option<Event> {
        let next = self.peek_next_time()?;
        if horizon.is_nan() || next >= horizon {
            return None;
        }
        let scheduled = self.event_queue.pop()?;
        debug!(
            "t={:.3} -> t={:.3} ({} pending)",
            self.current_time,
            scheduled.event.time,
            self.event_queue.len()
        );
        self.current_time = scheduled.event.time;
        Some(scheduled.event)
    }

    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|scheduled| scheduled.event.time)
    }

    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.event_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_queue.is_empty()
    }

    pub fn current_time(&self) -> SimTime {
        self.current_time
    }
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(name: &str) -> EventKind {
        EventKind::Breakdown {
            resource: name.into(),
        }
    }

    #[test]
    fn test_time_ordering() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(3.0, breakdown("late")).unwrap();
        sched.schedule_event(1.0, breakdown("early")).unwrap();
        sched.schedule_event(2.0, breakdown("mid")).unwrap();

        let times: Vec<SimTime> = std::iter::from_fn(|| sched.pop_before(f64::INFINITY))
            .map(|e| e.time)
            .collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_fifo_at_same_time() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(5.0, breakdown("first")).unwrap();
        sched.schedule_event(5.0, breakdown("second")).unwrap();
        sched.schedule_event(5.0, breakdown("third")).unwrap();

        let order: Vec<EventKind> = std::iter::from_fn(|| sched.pop_before(10.0))
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            order,
            vec![breakdown("first"), breakdown("second"), breakdown("third")]
        );
    }

    #[test]
    fn test_pop_advances_clock() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(2.5, EventKind::ShiftChange).unwrap();
        assert_eq!(sched.current_time(), 0.0);
        sched.pop_before(100.0).unwrap();
        assert_eq!(sched.current_time(), 2.5);
    }

    #[test]
    fn test_horizon_is_exclusive() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(10.0, EventKind::ShiftChange).unwrap();
        assert!(sched.pop_before(10.0).is_none());
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.current_time(), 0.0);
        assert!(sched.pop_before(10.5).is_some());
    }

    #[test]
    fn test_nan_horizon_admits_nothing() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(1.0, EventKind::ShiftChange).unwrap();
        assert!(sched.pop_before(f64::NAN).is_none());
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_rejects_past_events() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(4.0, EventKind::ShiftChange).unwrap();
        sched.pop_before(f64::INFINITY).unwrap();

        let err = sched.schedule_event(3.0, EventKind::ShiftChange).unwrap_err();
        assert_eq!(
            err,
            SimError::NonCausalEvent {
                requested: 3.0,
                current: 4.0
            }
        );
        // Same instant is allowed.
        assert!(sched.schedule_event(4.0, EventKind::ShiftChange).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_time() {
        let mut sched = EventScheduler::new();
        assert!(matches!(
            sched.schedule_event(f64::NAN, EventKind::ShiftChange),
            Err(SimError::NonFiniteTime(_))
        ));
        assert!(sched.is_empty());
    }

    #[test]
    fn test_schedule_after_is_relative_to_clock() {
        let mut sched = EventScheduler::new();
        sched.schedule_event(2.0, EventKind::ShiftChange).unwrap();
        sched.pop_before(f64::INFINITY).unwrap();
        sched.schedule_after(1.5, EventKind::ShiftChange).unwrap();
        assert_eq!(sched.peek_next_time(), Some(3.5));
    }
}
