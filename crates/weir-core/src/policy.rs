//! Action policies: the blocking, signalling, and movement primitives the
//! driver invokes while interpreting the transition tables.
//!
//! The machine knows *when* a side must wait, be woken, or move an item;
//! a policy decides *how*. Every callback receives the held guard over the
//! shared `{state, next_state}` cell, so a policy can inspect the
//! transition in flight, and a wait implementation can hand the lock to a
//! condition variable and observe the peer's rewrites when it resumes.
//!
//! ## Contract
//!
//! - `on_source_wait` / `on_sink_wait` atomically release the lock, block,
//!   and re-acquire before returning. Spurious wakes are tolerated by the
//!   protocol provided the driver is invoked again.
//! - `notify_source` / `notify_sink` signal the relevant condition without
//!   releasing the lock; the waiter only observes the wake after the
//!   current event returns and the lock is free.
//! - `on_source_move` / `on_sink_move` relocate an item across slots and
//!   must not release the lock. The driver renormalises the state
//!   afterwards when the move runs in the entry phase.
//! - `on_return` unwinds to the caller; the driver short-circuits once it
//!   returns.

use parking_lot::Condvar;

use crate::fsm::PortGuard;
use crate::state::PortState;

/// Blocking, signalling, and movement callbacks for a port state machine.
///
/// All callbacks default to no-ops, so a policy only implements the
/// primitives it actually provides.
pub trait PortPolicy<S: PortState> {
    /// Unwind back to the caller. Diagnostic name `ac_return`.
    fn on_return(&self, _port: &mut PortGuard<'_, S>) {}

    /// Relocate an item away from the source slot. Must not release the
    /// lock.
    fn on_source_move(&self, _port: &mut PortGuard<'_, S>) {}

    /// Relocate an item into the sink slot. Must not release the lock.
    fn on_sink_move(&self, _port: &mut PortGuard<'_, S>) {}

    /// Block the source side. Must release the lock while blocked and
    /// re-acquire it before returning.
    fn on_source_wait(&self, _port: &mut PortGuard<'_, S>) {}

    /// Block the sink side. Same locking contract as
    /// [`on_source_wait`](Self::on_source_wait).
    fn on_sink_wait(&self, _port: &mut PortGuard<'_, S>) {}

    /// Wake the source side without releasing the lock.
    fn notify_source(&self, _port: &mut PortGuard<'_, S>) {}

    /// Wake the sink side without releasing the lock.
    fn notify_sink(&self, _port: &mut PortGuard<'_, S>) {}
}

/// Pass-through policy: every callback is a no-op.
///
/// Drives the machine through its tabulated transitions without blocking,
/// signalling, or moving anything. Event sequences become pure functions
/// of the tables, which is what the deterministic tests and the benches
/// rely on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPolicy;

impl<S: PortState> PortPolicy<S> for NullPolicy {}

/// Logs every callback with the transition it observed.
///
/// Useful when diagnosing action orderings; behaviourally identical to
/// [`NullPolicy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracePolicy;

impl<S: PortState> PortPolicy<S> for TracePolicy {
    fn on_return(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action ac_return");
    }

    fn on_source_move(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action source_move");
    }

    fn on_sink_move(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action sink_move");
    }

    fn on_source_wait(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action source_wait");
    }

    fn on_sink_wait(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action sink_wait");
    }

    fn notify_source(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action notify_source");
    }

    fn notify_sink(&self, port: &mut PortGuard<'_, S>) {
        tracing::debug!(state = %port.state, next = %port.next_state, "action notify_sink");
    }
}

/// Condition-variable policy for one producer thread and one consumer
/// thread running against the same machine.
///
/// Waits park on the side's own condvar, handing the port lock to it;
/// notifies signal the opposite side's condvar under the lock. Movement
/// callbacks are no-ops: the machine only coordinates *when* an item may
/// cross slots, and embedders that attach storage implement the move
/// callbacks in their own policy.
///
/// A woken waiter resumes inside the exit phase of its original event;
/// the driver then commits whatever state the peer left behind and
/// re-reads the entry action, which is how a parked push or pull turns
/// into the move the peer made possible.
#[derive(Debug, Default)]
pub struct BlockingPolicy {
    source_cv: Condvar,
    sink_cv: Condvar,
}

impl BlockingPolicy {
    /// Creates the policy with both condvars unsignalled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source_cv: Condvar::new(),
            sink_cv: Condvar::new(),
        }
    }
}

impl<S: PortState> PortPolicy<S> for BlockingPolicy {
    fn on_source_wait(&self, port: &mut PortGuard<'_, S>) {
        self.source_cv.wait(port);
    }

    fn on_sink_wait(&self, port: &mut PortGuard<'_, S>) {
        self.sink_cv.wait(port);
    }

    fn notify_source(&self, _port: &mut PortGuard<'_, S>) {
        self.source_cv.notify_one();
    }

    fn notify_sink(&self, _port: &mut PortGuard<'_, S>) {
        self.sink_cv.notify_one();
    }
}

/// [`BlockingPolicy`] with a single condvar shared by both sides.
///
/// Valid for exactly one producer and one consumer: the source parks only
/// with every slot full and the sink only with every slot empty, so at
/// most one side is ever parked and `notify_one` always wakes the right
/// thread.
#[derive(Debug, Default)]
pub struct UnifiedBlockingPolicy {
    cv: Condvar,
}

impl UnifiedBlockingPolicy {
    /// Creates the policy with the shared condvar unsignalled.
    #[must_use]
    pub const fn new() -> Self {
        Self { cv: Condvar::new() }
    }
}

impl<S: PortState> PortPolicy<S> for UnifiedBlockingPolicy {
    fn on_source_wait(&self, port: &mut PortGuard<'_, S>) {
        self.cv.wait(port);
    }

    fn on_sink_wait(&self, port: &mut PortGuard<'_, S>) {
        self.cv.wait(port);
    }

    fn notify_source(&self, _port: &mut PortGuard<'_, S>) {
        self.cv.notify_one();
    }

    fn notify_sink(&self, _port: &mut PortGuard<'_, S>) {
        self.cv.notify_one();
    }
}
