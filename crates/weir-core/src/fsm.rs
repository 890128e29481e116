//! Mutex-protected event driver for the port state machine.
//!
//! [`PortStateMachine`] serialises events from any number of threads and
//! interprets the transition tables: on each event it looks up the next
//! state and the exit/entry actions, invokes the policy callbacks in a
//! fixed order with the lock held, and commits the state change.
//!
//! ## Ordering discipline
//!
//! One `event()` call proceeds as:
//!
//! 1. look up `next_state`, the exit action (by current state), and the
//!    entry action (by **next** state, current event);
//! 2. intercept `shutdown` (reserved; never moves the machine);
//! 3. exit phase: run the exit action's policy callback;
//! 4. commit `state = next_state`;
//! 5. re-read the entry action from the committed state;
//! 6. entry phase: run the entry action's policy callback, then collapse
//!    the state after an entry-phase move.
//!
//! The re-read in step 5 is load-bearing: a wait callback in the exit
//! phase releases the lock, and the peer thread may have rewritten both
//! `state` and `next_state` before the waiter resumes. The resumed thread
//! must act on the peer's committed picture, not its own stale lookup.
//! This is also why the `{state, next_state}` pair lives inside the mutex
//! and travels into every callback.
//!
//! ## Suspension
//!
//! The driver itself never blocks. Only the policy's wait callbacks
//! suspend, and they re-acquire the lock before returning, so the mutex
//! is held from entry to exit of `event()` from the machine's point of
//! view.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::action::PortAction;
use crate::event::PortEvent;
use crate::policy::PortPolicy;
use crate::state::PortState;

/// Process-wide sequence number stamped on every emitted trace line.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Current value of the global trace sequence counter. Diagnostic only.
#[must_use]
pub fn event_sequence() -> u64 {
    EVENT_SEQ.load(Ordering::Relaxed)
}

fn next_seq() -> u64 {
    EVENT_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// The shared transition cell: the only data the machine owns.
///
/// Both fields are deliberately public to policy callbacks (which receive
/// the held guard): a wait implementation stands in for a suspended thread
/// whose peer may rewrite the committed state and the in-flight
/// destination while it sleeps.
#[derive(Debug)]
pub struct PortCell<S> {
    /// Committed state.
    pub state: S,
    /// Destination of the in-flight event. Scratch between the table
    /// lookup and the commit.
    pub next_state: S,
}

/// Guard over the shared cell, passed to every policy callback.
pub type PortGuard<'a, S> = MutexGuard<'a, PortCell<S>>;

/// Port state machine driving producer/consumer handoff across a bounded
/// staging pipeline.
///
/// Generic over the state alphabet `S` ([`TwoStage`](crate::TwoStage) or
/// [`ThreeStage`](crate::ThreeStage)) and an action policy `P`, dispatched
/// statically. The machine starts in the all-empty state.
///
/// # Example
///
/// ```
/// use weir_core::{NullPolicy, PortStateMachine, TwoStage};
///
/// let port = PortStateMachine::<TwoStage, _>::new(NullPolicy);
/// port.do_fill("");
/// port.do_push("");
/// assert_eq!(port.state(), TwoStage::St01);
/// ```
pub struct PortStateMachine<S, P> {
    cell: Mutex<PortCell<S>>,
    policy: P,
    debug: AtomicBool,
}

impl<S: PortState, P: PortPolicy<S>> PortStateMachine<S, P> {
    /// Creates a machine in the all-empty state with the given policy.
    pub fn new(policy: P) -> Self {
        Self {
            cell: Mutex::new(PortCell {
                state: S::EMPTY,
                next_state: S::EMPTY,
            }),
            policy,
            debug: AtomicBool::new(false),
        }
    }

    /// The committed state.
    #[must_use]
    pub fn state(&self) -> S {
        self.cell.lock().state
    }

    /// Destination of the most recent table lookup.
    #[must_use]
    pub fn next_state(&self) -> S {
        self.cell.lock().next_state
    }

    /// Forces the committed state. Test hook.
    pub fn set_state(&self, state: S) {
        self.cell.lock().state = state;
    }

    /// Forces the scratch next state. Test hook.
    pub fn set_next_state(&self, next_state: S) {
        self.cell.lock().next_state = next_state;
    }

    /// The injected policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Emit a trace line for every phase of every event.
    pub fn enable_debug(&self) {
        self.debug.store(true, Ordering::Relaxed);
    }

    /// Trace only events carrying a non-empty diagnostic tag.
    pub fn disable_debug(&self) {
        self.debug.store(false, Ordering::Relaxed);
    }

    /// Whether per-phase tracing is on.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Submits a `source_fill` event. `msg` tags the trace lines; empty
    /// means untagged.
    pub fn do_fill(&self, msg: &str) {
        self.event(PortEvent::SourceFill, msg);
    }

    /// Submits a `source_push` event.
    pub fn do_push(&self, msg: &str) {
        self.event(PortEvent::SourcePush, msg);
    }

    /// Submits a `sink_drain` event.
    pub fn do_drain(&self, msg: &str) {
        self.event(PortEvent::SinkDrain, msg);
    }

    /// Submits a `sink_pull` event.
    pub fn do_pull(&self, msg: &str) {
        self.event(PortEvent::SinkPull, msg);
    }

    /// Submits the reserved `shutdown` event. Never changes the committed
    /// state.
    pub fn do_shutdown(&self, msg: &str) {
        self.event(PortEvent::Shutdown, msg);
    }

    fn event(&self, event: PortEvent, msg: &str) {
        let mut port = self.cell.lock();

        let old_state = port.state;
        port.next_state = old_state.next(event);
        let exit_action = old_state.exit_action(event);
        let mut entry_action = port.next_state.entry_action(event);

        self.trace(msg, "on event start", event, old_state, exit_action, entry_action, port.next_state);

        // Reserved. The tables route shutdown to error from every state,
        // but the event is intercepted here and must leave the committed
        // state untouched.
        if event == PortEvent::Shutdown {
            return;
        }

        if port.next_state == S::ERROR {
            tracing::warn!(
                seq = next_seq(),
                msg,
                event = %event,
                from = %old_state,
                "illegal transition routed to error state"
            );
        }

        self.trace(msg, "pre exit", event, old_state, exit_action, entry_action, port.next_state);

        match exit_action {
            PortAction::None => {}
            PortAction::Return => {
                self.policy.on_return(&mut port);
                return;
            }
            PortAction::SourceMove => self.policy.on_source_move(&mut port),
            PortAction::SinkMove => self.policy.on_sink_move(&mut port),
            PortAction::SourceWait => self.policy.on_source_wait(&mut port),
            PortAction::SinkWait => self.policy.on_sink_wait(&mut port),
            PortAction::NotifySource => self.policy.notify_source(&mut port),
            PortAction::NotifySink => self.policy.notify_sink(&mut port),
            PortAction::Error => panic!(
                "unexpected exit action {exit_action} on {event}: {} -> {}",
                old_state, port.next_state
            ),
        }

        self.trace(msg, "post exit", event, old_state, exit_action, entry_action, port.next_state);

        // Commit. A wait above may have released the lock and let the peer
        // rewrite both fields, so the entry action must be re-read from
        // the committed state rather than reused from the initial lookup.
        let committed = port.next_state;
        port.state = committed;
        entry_action = committed.entry_action(event);

        self.trace(msg, "pre entry", event, old_state, exit_action, entry_action, committed);

        match entry_action {
            PortAction::None => {}
            PortAction::Return => {
                self.policy.on_return(&mut port);
                return;
            }
            PortAction::SourceMove => {
                self.policy.on_source_move(&mut port);
                let collapsed = port.state.collapse_after_move();
                port.state = collapsed;
            }
            PortAction::SinkMove => {
                self.policy.on_sink_move(&mut port);
                let collapsed = port.state.collapse_after_move();
                port.state = collapsed;
            }
            PortAction::SourceWait => self.policy.on_source_wait(&mut port),
            PortAction::SinkWait => self.policy.on_sink_wait(&mut port),
            PortAction::NotifySource => self.policy.notify_source(&mut port),
            PortAction::NotifySink => self.policy.notify_sink(&mut port),
            PortAction::Error => panic!(
                "unexpected entry action {entry_action} on {event}: {} -> {}",
                old_state, port.state
            ),
        }

        self.trace(msg, "post entry", event, port.state, exit_action, entry_action, port.next_state);
    }

    #[allow(clippy::too_many_arguments)]
    fn trace(
        &self,
        msg: &str,
        phase: &str,
        event: PortEvent,
        from: S,
        exit: PortAction,
        entry: PortAction,
        to: S,
    ) {
        if msg.is_empty() && !self.debug_enabled() {
            return;
        }
        tracing::debug!(
            seq = next_seq(),
            msg,
            phase,
            event = %event,
            from = %from,
            exit = %exit,
            entry = %entry,
            to = %to,
            "port transition"
        );
    }
}
