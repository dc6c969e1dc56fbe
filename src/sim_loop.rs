// sim_loop.rs - Tick bookkeeping and the two ways of driving an automaton
//
// A host with its own frame callback (the egui app) polls
// `Automaton::advance_if_due` each frame. A host without one awaits `run`,
// which sleeps on tokio between steps. Both share the same `SimulationLoop`
// state, so a loop is only ever stepped by one chain at a time.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::automaton::Automaton;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationLoop {
    ticks: u64,
    goal: u64,
    stopped: bool,
    cooldown: Duration,
    last_step: Option<Instant>,
}

impl SimulationLoop {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            ticks: 0,
            goal: u64::MAX,
            stopped: true,
            cooldown,
            last_step: None,
        }
    }

    /// Clears the stopped flag. Returns `false`, and changes nothing, if the
    /// loop was already running.
    pub fn start(&mut self) -> bool {
        if !self.stopped {
            warn!("simulation already started; not starting again");
            return false;
        }
        self.stopped = false;
        self.last_step = None;
        true
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Stops and zeroes the counters; the cooldown is kept.
    pub fn reset(&mut self) {
        self.stopped = true;
        self.ticks = 0;
        self.goal = u64::MAX;
        self.last_step = None;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn goal(&self) -> u64 {
        self.goal
    }

    /// Stops the loop once `ticks` reaches `goal`.
    pub fn set_goal(&mut self, goal: u64) {
        self.goal = goal;
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.cooldown = cooldown;
    }

    /// Running, and at least one cooldown has passed since the last step.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.stopped
            && self
                .last_step
                .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown)
    }

    pub(crate) fn mark(&mut self, now: Instant) {
        self.last_step = Some(now);
    }

    /// Counts a finished step and checks the goal.
    pub(crate) fn complete_step(&mut self) {
        self.ticks += 1;
        if self.ticks >= self.goal {
            debug!(ticks = self.ticks, "goal reached");
            self.stop();
        }
    }
}

impl Default for SimulationLoop {
    fn default() -> Self {
        Self::new(Duration::from_millis(1))
    }
}

/// Steps `automaton` until its loop stops, waiting one cooldown between steps.
///
/// The automaton is borrowed only while a step runs, so other local tasks may
/// draw on it in between. A step is counted in the same borrow that ran it, so
/// a reset during the cooldown starts again from zero. Returns the tick count
/// when the loop stops. Call it again after a later `start` to resume.
///
/// A failing step stops the loop before the error is returned.
pub async fn run<A: Automaton + ?Sized>(automaton: &RefCell<A>) -> Result<u64> {
    loop {
        let cooldown = {
            let mut automaton = automaton.borrow_mut();
            if automaton.sim().is_stopped() {
                break;
            }
            if let Err(err) = automaton.step() {
                automaton.stop();
                return Err(err);
            }
            let sim = automaton.cells_mut().sim_mut();
            sim.complete_step();
            if sim.is_stopped() {
                break;
            }
            sim.cooldown()
        };

        if cooldown.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(cooldown).await;
        }
    }

    let ticks = automaton.borrow().sim().ticks();
    debug!(ticks, "simulation loop stopped");
    Ok(ticks)
}
