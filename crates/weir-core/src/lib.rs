//! # Weir Core
//!
//! The port state machine that coordinates producer/consumer handoff
//! across a bounded staging pipeline with one intermediate slot
//! (two-stage) or two intermediate slots (three-stage).
//!
//! A weir port sits between a producing endpoint (the source) and a
//! consuming endpoint (the sink). The machine does not touch payloads; it
//! decides when the source may fill, when items may advance through the
//! staging slots, when the sink may drain, and when either side must wait.
//! The blocking, signalling, and movement primitives themselves are
//! injected as a [`PortPolicy`].
//!
//! ## Architecture
//!
//! - [`TwoStage`] / [`ThreeStage`] — state alphabets; `st_<bits>` encodes
//!   slot occupancy (MSB = source slot), plus `error`/`done` sentinels.
//! - [`PortEvent`] — `source_fill`, `source_push`, `sink_drain`,
//!   `sink_pull`, and the reserved `shutdown`.
//! - [`PortAction`] — the exit/entry actions attached to transitions.
//! - [`PortStateMachine`] — the mutex-protected driver interpreting the
//!   tables over an injected policy, statically dispatched.
//!
//! ## Example
//!
//! ```
//! use weir_core::{NullPolicy, PortStateMachine, ThreeStage};
//!
//! let port = PortStateMachine::<ThreeStage, _>::new(NullPolicy);
//! port.do_fill("");
//! port.do_push("");
//! port.do_drain("");
//! assert_eq!(port.state(), ThreeStage::St000);
//! ```
//!
//! For a blocking producer/consumer pair, construct the machine with a
//! [`BlockingPolicy`] and call the source operations from one thread and
//! the sink operations from another.

#![warn(missing_docs)]

mod action;
mod error;
mod event;
mod fsm;
mod policy;
mod state;
mod tables;

pub use action::PortAction;
pub use error::ParseAlphabetError;
pub use event::PortEvent;
pub use fsm::{event_sequence, PortCell, PortGuard, PortStateMachine};
pub use policy::{
    BlockingPolicy, NullPolicy, PortPolicy, TracePolicy, UnifiedBlockingPolicy,
};
pub use state::{PortState, ThreeStage, TwoStage};
