//! Event alphabet for the port state machine.
//!
//! Five events drive every transition: the source side fills and pushes,
//! the sink side drains and pulls, and `shutdown` is reserved. The enum
//! declaration order is the column order of the transition tables.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlphabetError;

/// An event presented to the port state machine.
///
/// Source events originate from the producing endpoint, sink events from
/// the consuming endpoint. Any thread may submit any event; the machine
/// serialises them internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortEvent {
    /// The source deposits an item into its slot.
    SourceFill,
    /// An item advances from the source side toward the sink side.
    SourcePush,
    /// The sink removes an item from its slot.
    SinkDrain,
    /// An item advances into the sink's slot.
    SinkPull,
    /// Reserved. Currently intercepted by the driver before any state
    /// change takes place.
    Shutdown,
}

impl PortEvent {
    /// Number of events in the alphabet.
    pub const COUNT: usize = 5;

    /// All events, in table column order.
    pub const ALL: [PortEvent; Self::COUNT] = [
        PortEvent::SourceFill,
        PortEvent::SourcePush,
        PortEvent::SinkDrain,
        PortEvent::SinkPull,
        PortEvent::Shutdown,
    ];

    /// Column index of this event in the transition tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable diagnostic name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PortEvent::SourceFill => "source_fill",
            PortEvent::SourcePush => "source_push",
            PortEvent::SinkDrain => "sink_drain",
            PortEvent::SinkPull => "sink_pull",
            PortEvent::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for PortEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PortEvent {
    type Err = ParseAlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source_fill" => Ok(PortEvent::SourceFill),
            "source_push" => Ok(PortEvent::SourcePush),
            "sink_drain" => Ok(PortEvent::SinkDrain),
            "sink_pull" => Ok(PortEvent::SinkPull),
            "shutdown" => Ok(PortEvent::Shutdown),
            other => Err(ParseAlphabetError::Event(other.to_string())),
        }
    }
}
