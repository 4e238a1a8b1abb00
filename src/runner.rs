//! Cooperative game loop
//!
//! Drives two independently-clocked periodic tasks over one owned simulation
//! state: the physics tick (fast cadence) and the scroll controller (slow
//! cadence), using the fixed-timestep accumulator pattern with a catch-up cap.
//!
//! Cancellation is race-free by construction: `start` issues a `RunToken`,
//! and every `advance` must present one. Stopping a run (or starting the next)
//! bumps the internal generation, so a late-firing driver that still holds a
//! token from a superseded run observes `Pulse::Stale` and never mutates the
//! state of a run that conceptually ended.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::*;
use crate::sim::{GameState, RunOutcome, RunPhase, Snapshot, TickInput, scroll_step, tick};
use crate::tuning::Tuning;

/// Held-key provider, sampled once per physics tick
///
/// `observe` receives the post-tick snapshot; an interactive frontend uses it
/// to render, an autopilot to steer.
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
    fn observe(&mut self, _snapshot: &Snapshot) {}
}

/// Capability to advance one specific run; stale after that run is superseded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Result of one `advance` call
#[derive(Debug, Clone, PartialEq)]
pub enum Pulse {
    /// Token from a superseded run; nothing was advanced
    Stale,
    /// Simulation advanced; the run is still live
    Running,
    /// The terminal condition was reached (now or earlier)
    Ended(RunOutcome),
}

/// Owns the simulation state and the two periodic cadences
pub struct GameLoop {
    state: GameState,
    generation: u64,
    tick_acc: Duration,
    scroll_acc: Duration,
}

impl GameLoop {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(0, tuning),
            generation: 0,
            tick_acc: Duration::ZERO,
            scroll_acc: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Begin a fresh run: all state zeroed, one seed platform, new token
    ///
    /// Any token issued earlier becomes stale.
    pub fn start(&mut self, seed: u64) -> RunToken {
        let tuning = self.state.tuning;
        self.state = GameState::with_tuning(seed, tuning);
        self.state.phase = RunPhase::Running;
        self.generation += 1;
        self.tick_acc = Duration::ZERO;
        self.scroll_acc = Duration::ZERO;
        log::info!("run {} started (seed {seed})", self.generation);
        RunToken(self.generation)
    }

    /// Leave `Running`, deterministically cancelling both cadences
    pub fn stop(&mut self) {
        self.generation += 1;
        self.tick_acc = Duration::ZERO;
        self.scroll_acc = Duration::ZERO;
        if self.state.phase == RunPhase::Running {
            self.state.phase = RunPhase::Idle;
            log::info!("run stopped at score {}", self.state.score());
        }
    }

    /// Feed elapsed wall-clock time, firing whatever came due
    ///
    /// Scroll firings align to the next tick boundary; when both cadences are
    /// due the scroll fires first, so freshly generated platforms are visible
    /// to the physics that follows.
    pub fn advance(
        &mut self,
        token: RunToken,
        elapsed: Duration,
        input: &mut dyn InputSource,
    ) -> Pulse {
        if token.0 != self.generation {
            return Pulse::Stale;
        }
        if self.state.phase == RunPhase::GameOver {
            // Already terminal; outcome exists from the finishing tick
            if let Some(outcome) = &self.state.outcome {
                return Pulse::Ended(outcome.clone());
            }
        }

        let tick_period = Duration::from_millis(TICK_MS);
        let scroll_period = Duration::from_millis(SCROLL_INTERVAL_MS);

        self.tick_acc += elapsed;
        self.scroll_acc += elapsed;
        // Cap catch-up work after a long stall
        let max_backlog = tick_period * MAX_CATCHUP_TICKS;
        if self.tick_acc > max_backlog {
            self.tick_acc = max_backlog;
        }
        if self.scroll_acc > scroll_period + max_backlog {
            self.scroll_acc = scroll_period + max_backlog;
        }

        while self.tick_acc >= tick_period {
            if self.scroll_acc >= scroll_period {
                scroll_step(&mut self.state);
                self.scroll_acc -= scroll_period;
            }

            tick(&mut self.state, input.sample());
            self.tick_acc -= tick_period;
            input.observe(&self.state.snapshot());

            if self.state.phase == RunPhase::GameOver {
                self.tick_acc = Duration::ZERO;
                self.scroll_acc = Duration::ZERO;
                let outcome = self
                    .state
                    .outcome
                    .clone()
                    .unwrap_or(RunOutcome { score: 0, ticks: 0 });
                log::info!(
                    "run {} over: score {} after {} ticks",
                    self.generation,
                    outcome.score,
                    outcome.ticks
                );
                return Pulse::Ended(outcome);
            }
        }
        Pulse::Running
    }

    /// Blocking driver: sleeps between ticks until the run ends
    ///
    /// Returns `None` if the token went stale underway.
    pub fn run(&mut self, token: RunToken, input: &mut dyn InputSource) -> Option<RunOutcome> {
        let period = Duration::from_millis(TICK_MS);
        let mut last = Instant::now();
        loop {
            thread::sleep(period);
            let now = Instant::now();
            match self.advance(token, now - last, input) {
                Pulse::Stale => return None,
                Pulse::Running => {}
                Pulse::Ended(outcome) => return Some(outcome),
            }
            last = now;
        }
    }
}
