//! Action alphabet for the port state machine.
//!
//! Exit and entry tables map each `(state, event)` pair to one of these
//! actions. The driver interprets an action by invoking the matching
//! policy callback; the alphabet itself carries no behaviour.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlphabetError;

/// An action attached to a transition, performed during the exit phase
/// (before the state commit) or the entry phase (after it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortAction {
    /// No action.
    None,
    /// Unwind back to the caller; the driver short-circuits after the
    /// policy callback returns. Diagnostic name `ac_return`. No shipped
    /// table entry produces it, but the driver keeps the branch live for
    /// policies that rewrite their tables.
    Return,
    /// Relocate an item away from the source slot.
    SourceMove,
    /// Relocate an item into the sink slot.
    SinkMove,
    /// Wake the source side.
    NotifySource,
    /// Wake the sink side.
    NotifySink,
    /// Block the source side until woken.
    SourceWait,
    /// Block the sink side until woken.
    SinkWait,
    /// Table sentinel. Reaching this value in either phase is a logic
    /// fault and panics the driver.
    Error,
}

impl PortAction {
    /// Number of actions in the alphabet.
    pub const COUNT: usize = 9;

    /// Stable diagnostic name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PortAction::None => "none",
            PortAction::Return => "ac_return",
            PortAction::SourceMove => "source_move",
            PortAction::SinkMove => "sink_move",
            PortAction::NotifySource => "notify_source",
            PortAction::NotifySink => "notify_sink",
            PortAction::SourceWait => "source_wait",
            PortAction::SinkWait => "sink_wait",
            PortAction::Error => "error",
        }
    }
}

impl fmt::Display for PortAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PortAction {
    type Err = ParseAlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PortAction::None),
            "ac_return" => Ok(PortAction::Return),
            "source_move" => Ok(PortAction::SourceMove),
            "sink_move" => Ok(PortAction::SinkMove),
            "notify_source" => Ok(PortAction::NotifySource),
            "notify_sink" => Ok(PortAction::NotifySink),
            "source_wait" => Ok(PortAction::SourceWait),
            "sink_wait" => Ok(PortAction::SinkWait),
            "error" => Ok(PortAction::Error),
            other => Err(ParseAlphabetError::Action(other.to_string())),
        }
    }
}
