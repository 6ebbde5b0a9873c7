//! The control loop that drives turns.
//!
//! Each iteration picks exactly one action, in priority order:
//!
//! 1. finish, once the turn budget is reached;
//! 2. a pending interactive command (snapshot, quit, pause);
//! 3. a pending population-report tick;
//! 4. otherwise, advance one turn.
//!
//! Advancing is always possible until the budget runs out, so the loop
//! only blocks while paused. Commands and ticks are observed between
//! steps, never during one.
//!
//! Every exit path, including store failures, closes the event stream
//! exactly once with `StateChange(Quitting)`.

use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use lifegrid_core::{ConfigError, Event};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::SchedulerConfig;
use crate::engine::SimulationEngine;
use crate::reporter::EventReporter;
use crate::store::{save_snapshot, GridStore, StoreError};

// ── Errors and results ─────────────────────────────────────────────

/// Errors that end a scheduler run early.
#[derive(Debug)]
pub enum SchedulerError {
    /// The store failed while saving a snapshot or flushing.
    Store(StoreError),
    /// The background control thread could not be started.
    ThreadSpawnFailed {
        /// Why the spawn failed.
        reason: String,
    },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store: {e}"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn control thread: {reason}")
            }
        }
    }
}

impl std::error::Error for SchedulerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::ThreadSpawnFailed { .. } => None,
        }
    }
}

impl From<StoreError> for SchedulerError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The turn budget was reached.
    Completed,
    /// A quit command arrived first.
    Quit,
}

/// Summary returned by [`ControlScheduler::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Turns completed when the run ended.
    pub turns_completed: u64,
    /// How the run ended.
    pub outcome: Outcome,
}

// ── ControlScheduler ───────────────────────────────────────────────

/// Drives a [`SimulationEngine`] until its turn budget is spent or a
/// quit command arrives.
///
/// The scheduler owns the engine, the store, the command receiver and
/// the event sender. Run it inline with [`run()`](Self::run) or on a
/// named thread with [`spawn()`](Self::spawn).
pub struct ControlScheduler {
    engine: SimulationEngine,
    store: Box<dyn GridStore>,
    keys: Receiver<char>,
    keys_open: bool,
    reporter: EventReporter,
    config: SchedulerConfig,
}

impl fmt::Debug for ControlScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlScheduler")
            .field("engine", &self.engine)
            .field("keys_open", &self.keys_open)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ControlScheduler {
    /// Assemble a scheduler.
    ///
    /// `keys` delivers interactive command tokens; `events` is the
    /// stream the scheduler reports into and eventually closes.
    pub fn new(
        engine: SimulationEngine,
        store: Box<dyn GridStore>,
        keys: Receiver<char>,
        events: Sender<Event>,
        config: SchedulerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine,
            store,
            keys,
            keys_open: true,
            reporter: EventReporter::new(events),
            config,
        })
    }

    /// Run to completion on the calling thread.
    pub fn run(mut self) -> Result<RunReport, SchedulerError> {
        info!(
            target: "lifegrid::scheduler",
            width = self.engine.width(),
            height = self.engine.height(),
            workers = self.engine.workers(),
            turns = self.config.turns,
            "scheduler started"
        );
        let result = self.drive();
        let turn = self.engine.turn();
        self.reporter.close(turn);
        match &result {
            Ok(report) => info!(
                target: "lifegrid::scheduler",
                turns = report.turns_completed,
                outcome = ?report.outcome,
                "scheduler finished"
            ),
            Err(e) => warn!(
                target: "lifegrid::scheduler",
                turn,
                error = %e,
                "scheduler aborted"
            ),
        }
        result
    }

    /// Run on a background thread named `lifegrid-control`.
    pub fn spawn(self) -> Result<JoinHandle<Result<RunReport, SchedulerError>>, SchedulerError> {
        thread::Builder::new()
            .name("lifegrid-control".into())
            .spawn(move || self.run())
            .map_err(|e| SchedulerError::ThreadSpawnFailed {
                reason: e.to_string(),
            })
    }

    fn drive(&mut self) -> Result<RunReport, SchedulerError> {
        let ticker = crossbeam_channel::tick(self.config.report_interval);

        if self.engine.turn() == 0 {
            self.reporter
                .report_flips(self.engine.previous(), self.engine.grid(), 0);
        }

        loop {
            let turn = self.engine.turn();
            if turn >= self.config.turns {
                return self.finish();
            }

            match self.next_command() {
                Some(Command::Snapshot) => {
                    self.snapshot()?;
                    continue;
                }
                Some(Command::Quit) => return self.quit(),
                Some(Command::TogglePause) => {
                    self.pause();
                    while ticker.try_recv().is_ok() {}
                    continue;
                }
                None => {}
            }

            if ticker.try_recv().is_ok() {
                let count = self.engine.alive_count();
                debug!(target: "lifegrid::scheduler", turn, count, "population report");
                self.reporter.report_alive_count(turn, count);
                continue;
            }

            self.engine.step();
            self.reporter
                .report_turn(self.engine.previous(), self.engine.grid(), turn + 1);
        }
    }

    /// Next recognized command, skipping unknown tokens.
    fn next_command(&mut self) -> Option<Command> {
        while self.keys_open {
            match self.keys.try_recv() {
                Ok(key) => match Command::from_key(key) {
                    Some(command) => return Some(command),
                    None => debug!(target: "lifegrid::scheduler", ?key, "ignoring key"),
                },
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.keys_open = false;
                    debug!(target: "lifegrid::scheduler", "command source closed");
                }
            }
        }
        None
    }

    fn snapshot(&mut self) -> Result<String, SchedulerError> {
        let turn = self.engine.turn();
        let name = save_snapshot(self.store.as_mut(), self.engine.grid(), turn)?;
        info!(target: "lifegrid::scheduler", turn, %name, "snapshot saved");
        Ok(name)
    }

    fn quit(&mut self) -> Result<RunReport, SchedulerError> {
        info!(target: "lifegrid::scheduler", turn = self.engine.turn(), "quit requested");
        self.snapshot()?;
        self.store.wait_idle()?;
        Ok(RunReport {
            turns_completed: self.engine.turn(),
            outcome: Outcome::Quit,
        })
    }

    fn finish(&mut self) -> Result<RunReport, SchedulerError> {
        let turn = self.engine.turn();
        self.reporter.report_final(self.engine.grid(), turn);
        self.snapshot()?;
        self.store.wait_idle()?;
        Ok(RunReport {
            turns_completed: turn,
            outcome: Outcome::Completed,
        })
    }

    /// Block until the pause token arrives again.
    fn pause(&mut self) {
        let turn = self.engine.turn();
        self.reporter.report_paused(turn);
        info!(target: "lifegrid::scheduler", turn, "paused");
        loop {
            match self.keys.recv() {
                Ok(key) if Command::from_key(key) == Some(Command::TogglePause) => break,
                Ok(key) => debug!(target: "lifegrid::scheduler", ?key, "ignoring key while paused"),
                Err(_) => {
                    self.keys_open = false;
                    warn!(
                        target: "lifegrid::scheduler",
                        turn,
                        "command source closed while paused; resuming"
                    );
                    break;
                }
            }
        }
        self.reporter.report_resumed(turn);
        info!(target: "lifegrid::scheduler", turn, "resumed");
    }
}
