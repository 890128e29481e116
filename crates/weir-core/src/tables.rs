//! Transition, exit-action, and entry-action tables.
//!
//! These six tables are the authoritative definition of port behaviour;
//! the driver is a mechanical interpreter over them. Each table is indexed
//! `[state][event]` with rows in state ordinal order and columns in event
//! order (`source_fill`, `source_push`, `sink_drain`, `sink_pull`,
//! `shutdown`).
//!
//! Illegal transitions (filling a full source slot, draining an empty sink
//! slot) deliberately map to the `error` state rather than panicking: the
//! policy layer is responsible for ordering events legally, and the tables
//! record what happens when it does not. The `shutdown` column routes to
//! `error` from every state, but the driver intercepts the event first and
//! never consults it.

pub(crate) use three::{THREE_STAGE_ENTRY, THREE_STAGE_EXIT, THREE_STAGE_TRANSITION};
pub(crate) use two::{TWO_STAGE_ENTRY, TWO_STAGE_EXIT, TWO_STAGE_TRANSITION};

mod two {
    use crate::action::PortAction;
    use crate::action::PortAction::{
        None, NotifySink, NotifySource, SinkMove, SinkWait, SourceMove, SourceWait,
    };
    use crate::event::PortEvent;
    use crate::state::PortState;
    use crate::state::TwoStage::{self, Error, St00, St01, St10, St11};

    #[rustfmt::skip]
    pub const TWO_STAGE_TRANSITION: [[TwoStage; PortEvent::COUNT]; TwoStage::STATE_COUNT] = [
        //           fill   push   drain  pull   shutdown
        /* st_00 */ [St10,  St00,  Error, St00,  Error],
        /* st_01 */ [St11,  St01,  St00,  St01,  Error],
        /* st_10 */ [Error, St01,  Error, St01,  Error],
        /* st_11 */ [Error, St11,  St10,  St11,  Error],
        /* error */ [Error, Error, Error, Error, Error],
        /* done  */ [Error, Error, Error, Error, Error],
    ];

    #[rustfmt::skip]
    pub const TWO_STAGE_EXIT: [[PortAction; PortEvent::COUNT]; TwoStage::STATE_COUNT] = [
        //           fill  push        drain  pull      shutdown
        /* st_00 */ [None, None,       None,  SinkWait, None],
        /* st_01 */ [None, None,       None,  None,     None],
        /* st_10 */ [None, SourceMove, None,  SinkMove, None],
        /* st_11 */ [None, SourceWait, None,  None,     None],
        /* error */ [None, None,       None,  None,     None],
        /* done  */ [None, None,       None,  None,     None],
    ];

    #[rustfmt::skip]
    pub const TWO_STAGE_ENTRY: [[PortAction; PortEvent::COUNT]; TwoStage::STATE_COUNT] = [
        //           fill        push        drain          pull      shutdown
        /* st_00 */ [None,       None,       NotifySource,  None,     None],
        /* st_01 */ [None,       None,       None,          None,     None],
        /* st_10 */ [NotifySink, SourceMove, NotifySource,  SinkMove, None],
        /* st_11 */ [NotifySink, None,       None,          None,     None],
        /* error */ [None,       None,       None,          None,     None],
        /* done  */ [None,       None,       None,          None,     None],
    ];
}

mod three {
    use crate::action::PortAction;
    use crate::action::PortAction::{
        None, NotifySink, NotifySource, SinkMove, SinkWait, SourceMove, SourceWait,
    };
    use crate::event::PortEvent;
    use crate::state::PortState;
    use crate::state::ThreeStage::{
        self, Error, St000, St001, St010, St011, St100, St101, St110, St111,
    };

    #[rustfmt::skip]
    pub const THREE_STAGE_TRANSITION: [[ThreeStage; PortEvent::COUNT]; ThreeStage::STATE_COUNT] = [
        //            fill   push   drain  pull   shutdown
        /* st_000 */ [St100, St000, Error, St000, Error],
        /* st_001 */ [St101, St001, St000, St001, Error],
        /* st_010 */ [St110, St001, Error, St001, Error],
        /* st_011 */ [St111, St011, St010, St011, Error],
        /* st_100 */ [Error, St001, Error, St001, Error],
        /* st_101 */ [Error, St011, St100, St011, Error],
        /* st_110 */ [Error, St011, Error, St011, Error],
        /* st_111 */ [Error, St111, St110, St111, Error],
        /* error  */ [Error, Error, Error, Error, Error],
        /* done   */ [Error, Error, Error, Error, Error],
    ];

    #[rustfmt::skip]
    pub const THREE_STAGE_EXIT: [[PortAction; PortEvent::COUNT]; ThreeStage::STATE_COUNT] = [
        //            fill  push        drain  pull      shutdown
        /* st_000 */ [None, None,       None,  SinkWait, None],
        /* st_001 */ [None, None,       None,  None,     None],
        /* st_010 */ [None, SourceMove, None,  SinkMove, None],
        /* st_011 */ [None, None,       None,  None,     None],
        /* st_100 */ [None, SourceMove, None,  SinkMove, None],
        /* st_101 */ [None, SourceMove, None,  SinkMove, None],
        /* st_110 */ [None, SourceMove, None,  SinkMove, None],
        /* st_111 */ [None, SourceWait, None,  None,     None],
        /* error  */ [None, None,       None,  None,     None],
        /* done   */ [None, None,       None,  None,     None],
    ];

    #[rustfmt::skip]
    pub const THREE_STAGE_ENTRY: [[PortAction; PortEvent::COUNT]; ThreeStage::STATE_COUNT] = [
        //            fill        push        drain          pull      shutdown
        /* st_000 */ [None,       None,       NotifySource,  None,     None],
        /* st_001 */ [None,       None,       None,          None,     None],
        /* st_010 */ [None,       SourceMove, NotifySource,  SinkMove, None],
        /* st_011 */ [None,       None,       None,          None,     None],
        /* st_100 */ [NotifySink, SourceMove, NotifySource,  SinkMove, None],
        /* st_101 */ [NotifySink, SourceMove, None,          SinkMove, None],
        /* st_110 */ [NotifySink, SourceMove, NotifySource,  SinkMove, None],
        /* st_111 */ [NotifySink, None,       None,          None,     None],
        /* error  */ [None,       None,       None,          None,     None],
        /* done   */ [None,       None,       None,          None,     None],
    ];
}

#[cfg(test)]
mod tests {
    use crate::action::PortAction;
    use crate::event::PortEvent;
    use crate::state::{PortState, ThreeStage, TwoStage};

    /// Sentinel rows absorb everything: every event maps to `error`.
    #[test]
    fn test_sentinel_rows_route_to_error() {
        for event in PortEvent::ALL {
            assert_eq!(TwoStage::Error.next(event), TwoStage::Error);
            assert_eq!(TwoStage::Done.next(event), TwoStage::Error);
            assert_eq!(ThreeStage::Error.next(event), ThreeStage::Error);
            assert_eq!(ThreeStage::Done.next(event), ThreeStage::Error);
        }
    }

    #[test]
    fn test_shutdown_column_routes_to_error() {
        for state in TwoStage::ALL {
            assert_eq!(state.next(PortEvent::Shutdown), TwoStage::Error);
        }
        for state in ThreeStage::ALL {
            assert_eq!(state.next(PortEvent::Shutdown), ThreeStage::Error);
        }
    }

    #[test]
    fn test_sentinel_rows_carry_no_actions() {
        for event in PortEvent::ALL {
            for state in [TwoStage::Error, TwoStage::Done] {
                assert_eq!(state.exit_action(event), PortAction::None);
                assert_eq!(state.entry_action(event), PortAction::None);
            }
            for state in [ThreeStage::Error, ThreeStage::Done] {
                assert_eq!(state.exit_action(event), PortAction::None);
                assert_eq!(state.entry_action(event), PortAction::None);
            }
        }
    }

    fn expected_two_stage_exit(state: TwoStage, event: PortEvent) -> PortAction {
        match (state, event) {
            (TwoStage::St00, PortEvent::SinkPull) => PortAction::SinkWait,
            (TwoStage::St10, PortEvent::SourcePush) => PortAction::SourceMove,
            (TwoStage::St10, PortEvent::SinkPull) => PortAction::SinkMove,
            (TwoStage::St11, PortEvent::SourcePush) => PortAction::SourceWait,
            _ => PortAction::None,
        }
    }

    fn expected_two_stage_entry(state: TwoStage, event: PortEvent) -> PortAction {
        match (state, event) {
            (TwoStage::St00, PortEvent::SinkDrain) => PortAction::NotifySource,
            (TwoStage::St10, PortEvent::SourceFill) => PortAction::NotifySink,
            (TwoStage::St10, PortEvent::SourcePush) => PortAction::SourceMove,
            (TwoStage::St10, PortEvent::SinkDrain) => PortAction::NotifySource,
            (TwoStage::St10, PortEvent::SinkPull) => PortAction::SinkMove,
            (TwoStage::St11, PortEvent::SourceFill) => PortAction::NotifySink,
            _ => PortAction::None,
        }
    }

    #[test]
    fn test_two_stage_action_tables_exhaustive() {
        for state in TwoStage::ALL {
            for event in PortEvent::ALL {
                assert_eq!(
                    state.exit_action(event),
                    expected_two_stage_exit(*state, event),
                    "exit action for ({state}, {event})"
                );
                assert_eq!(
                    state.entry_action(event),
                    expected_two_stage_entry(*state, event),
                    "entry action for ({state}, {event})"
                );
            }
        }
    }

    /// The source-side moves and the sink-side moves fire from the same
    /// four states: the ones with an item behind an empty slot.
    #[test]
    fn test_three_stage_move_states_are_symmetric() {
        let movable = [
            ThreeStage::St010,
            ThreeStage::St100,
            ThreeStage::St101,
            ThreeStage::St110,
        ];
        for state in ThreeStage::ALL {
            let expect_move = movable.contains(state);
            assert_eq!(
                state.exit_action(PortEvent::SourcePush) == PortAction::SourceMove,
                expect_move
            );
            assert_eq!(
                state.exit_action(PortEvent::SinkPull) == PortAction::SinkMove,
                expect_move
            );
            assert_eq!(
                state.entry_action(PortEvent::SourcePush) == PortAction::SourceMove,
                expect_move
            );
            assert_eq!(
                state.entry_action(PortEvent::SinkPull) == PortAction::SinkMove,
                expect_move
            );
        }
    }

    #[test]
    fn test_three_stage_waits_and_notifies() {
        assert_eq!(
            ThreeStage::St111.exit_action(PortEvent::SourcePush),
            PortAction::SourceWait
        );
        assert_eq!(
            ThreeStage::St000.exit_action(PortEvent::SinkPull),
            PortAction::SinkWait
        );

        // Draining into a sink-empty state wakes the source.
        for state in [
            ThreeStage::St000,
            ThreeStage::St010,
            ThreeStage::St100,
            ThreeStage::St110,
        ] {
            assert_eq!(
                state.entry_action(PortEvent::SinkDrain),
                PortAction::NotifySource
            );
        }

        // Filling into a source-full state wakes the sink.
        for state in [
            ThreeStage::St100,
            ThreeStage::St101,
            ThreeStage::St110,
            ThreeStage::St111,
        ] {
            assert_eq!(
                state.entry_action(PortEvent::SourceFill),
                PortAction::NotifySink
            );
        }
    }

    /// Legal fill/drain transitions flip exactly the expected slot bit.
    #[test]
    fn test_fill_and_drain_flip_single_bits() {
        for state in ThreeStage::ALL {
            let next = state.next(PortEvent::SourceFill);
            if next != ThreeStage::Error {
                assert_eq!(next.index(), state.index() | 0b100);
            }
            let next = state.next(PortEvent::SinkDrain);
            if next != ThreeStage::Error {
                assert_eq!(next.index(), state.index() & !0b001);
            }
        }
    }
}
