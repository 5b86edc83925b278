use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The single "decision in flight" flag.
///
/// Not a queue: [`DecisionGate::try_acquire`] either hands out the only ticket
/// or refuses. The flag clears when the ticket drops.
#[derive(Debug, Default)]
pub struct DecisionGate {
    in_flight: AtomicBool,
}

impl DecisionGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn try_acquire(self: &Arc<Self>) -> Option<DecisionTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DecisionTicket {
                gate: Arc::clone(self),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the outstanding decision.
#[derive(Debug)]
pub struct DecisionTicket {
    gate: Arc<DecisionGate>,
}

impl Drop for DecisionTicket {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}
