//! The event stream vocabulary.
//!
//! Every event carries the turn it describes. Within one turn the order
//! is fixed: all [`Event::CellFlipped`] events in row-major order, then
//! exactly one [`Event::TurnComplete`].

use std::fmt;

use crate::cell::Cell;

/// Execution state announced through [`Event::StateChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Turns are being computed.
    Executing,
    /// The scheduler is waiting for a resume command.
    Paused,
    /// The scheduler is shutting down; the stream closes next.
    Quitting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executing => write!(f, "Executing"),
            Self::Paused => write!(f, "Paused"),
            Self::Quitting => write!(f, "Quitting"),
        }
    }
}

/// One entry in the ordered event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A cell changed state between the previous and current generation.
    CellFlipped {
        /// Turn whose step produced the change.
        turn: u64,
        /// The cell that flipped.
        cell: Cell,
    },
    /// All flips for `turn` have been emitted.
    TurnComplete {
        /// The completed turn.
        turn: u64,
    },
    /// Periodic population report, emitted on a wall-clock cadence.
    AliveCellsCount {
        /// Turn current when the timer fired.
        turn: u64,
        /// Number of live cells.
        count: usize,
    },
    /// Final board after the turn budget was exhausted.
    FinalTurnComplete {
        /// Number of completed turns.
        turn: u64,
        /// Live cells in row-major order.
        alive: Vec<Cell>,
    },
    /// The scheduler changed execution state.
    StateChange {
        /// Turn current at the transition.
        turn: u64,
        /// The new state.
        state: State,
    },
}

impl Event {
    /// The turn this event refers to.
    pub fn turn(&self) -> u64 {
        match self {
            Self::CellFlipped { turn, .. }
            | Self::TurnComplete { turn }
            | Self::AliveCellsCount { turn, .. }
            | Self::FinalTurnComplete { turn, .. }
            | Self::StateChange { turn, .. } => *turn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellFlipped { turn, cell } => write!(f, "turn {turn}: cell {cell} flipped"),
            Self::TurnComplete { turn } => write!(f, "turn {turn}: complete"),
            Self::AliveCellsCount { turn, count } => {
                write!(f, "turn {turn}: {count} cells alive")
            }
            Self::FinalTurnComplete { turn, alive } => {
                write!(f, "turn {turn}: final, {} cells alive", alive.len())
            }
            Self::StateChange { turn, state } => write!(f, "turn {turn}: {state}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_accessor_covers_all_variants() {
        let events = [
            Event::CellFlipped {
                turn: 1,
                cell: Cell::new(0, 0),
            },
            Event::TurnComplete { turn: 2 },
            Event::AliveCellsCount { turn: 3, count: 9 },
            Event::FinalTurnComplete {
                turn: 4,
                alive: vec![],
            },
            Event::StateChange {
                turn: 5,
                state: State::Quitting,
            },
        ];
        let turns: Vec<u64> = events.iter().map(Event::turn).collect();
        assert_eq!(turns, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn display_is_human_readable() {
        let e = Event::CellFlipped {
            turn: 7,
            cell: Cell::new(3, 4),
        };
        assert_eq!(e.to_string(), "turn 7: cell (3, 4) flipped");
        let s = Event::StateChange {
            turn: 2,
            state: State::Paused,
        };
        assert_eq!(s.to_string(), "turn 2: Paused");
    }
}
