//! Paced stepping of the addiction simulator.
//!
//! The runner is a poll-driven clock: the caller polls it from its own loop
//! and each poll advances at most one day, only once the interval has
//! elapsed. There is no background thread, so a `stop()` or `reset()` always
//! lands before the next step.

use super::logic::{advance_day, new_events};
use super::types::{AddictionConfig, LifeEvent, SimulationDayState};
use crate::notify::{GameEvent, NotificationSink};
use std::time::{Duration, Instant};

/// What one step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStep {
    /// Day number that was simulated.
    pub day: u32,
    pub new_events: Vec<LifeEvent>,
    /// This step ended the simulation.
    pub finished: bool,
}

/// Drives [`advance_day`] on a fixed cadence.
#[derive(Debug, Clone)]
pub struct AddictionRunner {
    config: AddictionConfig,
    state: SimulationDayState,
    running: bool,
    finished: bool,
    interval: Duration,
    last_step: Option<Instant>,
}

impl AddictionRunner {
    pub fn new(config: AddictionConfig) -> Self {
        let state = SimulationDayState::from_config(&config);
        Self::resume(config, state)
    }

    /// Continue from a saved state.
    pub fn resume(config: AddictionConfig, state: SimulationDayState) -> Self {
        let finished = state.is_terminal(config.horizon_days);
        Self {
            interval: Duration::from_millis(config.day_interval_ms),
            config,
            state,
            running: false,
            finished,
            last_step: None,
        }
    }

    pub fn state(&self) -> &SimulationDayState {
        &self.state
    }

    pub fn config(&self) -> &AddictionConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start stepping. Has no effect once the simulation is finished.
    pub fn start(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_step = None;
    }

    /// Stop and return to the initial state.
    pub fn reset(&mut self) {
        self.stop();
        self.state = SimulationDayState::from_config(&self.config);
        self.finished = false;
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Advance one day if running and the interval has elapsed since the
    /// last step. The first poll after `start()` steps immediately.
    pub fn poll(&mut self, now: Instant, sink: &mut impl NotificationSink) -> Option<DayStep> {
        if !self.running || self.finished {
            return None;
        }
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_step = Some(now);
        self.step(sink)
    }

    /// Advance one day regardless of the cadence. A finished simulation
    /// stays where it ended and returns `None`.
    pub fn step(&mut self, sink: &mut impl NotificationSink) -> Option<DayStep> {
        if self.finished {
            return None;
        }
        let day = self.state.day;
        let next = advance_day(&self.state);
        let fresh = new_events(&self.state, &next).to_vec();
        self.state = next;

        if !fresh.is_empty() {
            sink.notify(&GameEvent::Warning);
        }

        let finished = self.state.is_terminal(self.config.horizon_days);
        if finished {
            self.finished = true;
            self.running = false;
            tracing::info!(
                day = self.state.day,
                balance = self.state.balance,
                events = self.state.events.len(),
                "addiction simulation finished"
            );
            sink.notify(&GameEvent::SimulationFinished {
                day: self.state.day,
                balance: self.state.balance,
            });
        }

        Some(DayStep {
            day,
            new_events: fresh,
            finished,
        })
    }
}

impl Default for AddictionRunner {
    fn default() -> Self {
        Self::new(AddictionConfig::default())
    }
}
