//! Diff-based event reporting.
//!
//! [`EventReporter`] is the single producer on the event stream. It owns
//! the sending half of the channel; [`close()`](EventReporter::close)
//! consumes the reporter, so nothing can be emitted after the stream is
//! closed.

use crossbeam_channel::Sender;
use lifegrid_core::{Cell, Event, Grid, State};
use tracing::warn;

/// Cells whose state differs between `previous` and `current`, in
/// row-major order.
///
/// Both grids must have the same dimensions.
pub fn diff<'a>(previous: &'a Grid, current: &'a Grid) -> impl Iterator<Item = Cell> + 'a {
    debug_assert_eq!(
        (previous.width(), previous.height()),
        (current.width(), current.height())
    );
    let width = current.width();
    (0..current.height()).flat_map(move |y| {
        (0..width).filter_map(move |x| {
            let (xi, yi) = (x as i64, y as i64);
            (previous.is_alive(xi, yi) != current.is_alive(xi, yi)).then_some(Cell::new(x, y))
        })
    })
}

/// Emits per-cell and per-turn events onto the event stream.
#[derive(Debug)]
pub struct EventReporter {
    events: Sender<Event>,
    disconnected: bool,
}

impl EventReporter {
    /// Wrap the sending half of the event stream.
    pub fn new(events: Sender<Event>) -> Self {
        Self {
            events,
            disconnected: false,
        }
    }

    fn emit(&mut self, event: Event) {
        if self.events.send(event).is_err() && !self.disconnected {
            self.disconnected = true;
            warn!(
                target: "lifegrid::reporter",
                "event consumer disconnected; further events are dropped"
            );
        }
    }

    /// Emit one `CellFlipped` per changed cell, without a `TurnComplete`.
    ///
    /// Returns the number of flips.
    pub fn report_flips(&mut self, previous: &Grid, current: &Grid, turn: u64) -> usize {
        let mut flipped = 0;
        for cell in diff(previous, current) {
            self.emit(Event::CellFlipped { turn, cell });
            flipped += 1;
        }
        flipped
    }

    /// Emit the flips for a completed step followed by `TurnComplete`.
    ///
    /// Returns the number of flips.
    pub fn report_turn(&mut self, previous: &Grid, current: &Grid, turn: u64) -> usize {
        let flipped = self.report_flips(previous, current, turn);
        self.emit(Event::TurnComplete { turn });
        flipped
    }

    /// Emit a periodic population report.
    pub fn report_alive_count(&mut self, turn: u64, count: usize) {
        self.emit(Event::AliveCellsCount { turn, count });
    }

    /// Emit the final board.
    pub fn report_final(&mut self, grid: &Grid, turn: u64) {
        self.emit(Event::FinalTurnComplete {
            turn,
            alive: grid.alive_cells(),
        });
    }

    /// Announce that the scheduler paused.
    pub fn report_paused(&mut self, turn: u64) {
        self.emit(Event::StateChange {
            turn,
            state: State::Paused,
        });
    }

    /// Announce that the scheduler resumed.
    pub fn report_resumed(&mut self, turn: u64) {
        self.emit(Event::StateChange {
            turn,
            state: State::Executing,
        });
    }

    /// Emit `StateChange(Quitting)` and close the stream.
    pub fn close(mut self, turn: u64) {
        self.emit(Event::StateChange {
            turn,
            state: State::Quitting,
        });
    }
}
