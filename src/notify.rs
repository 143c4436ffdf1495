//! Fire-and-forget notifications for game events.
//!
//! The engine never calls a sink itself. Callers (the slot session, the
//! addiction runner, the CLI) hand events to whatever sink they were given.

use std::io::Write;

/// Something worth signalling to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Reels started spinning.
    Spin,
    /// A spin paid out.
    Win { amount: u64 },
    /// A spin paid nothing.
    Loss { bet: u64 },
    /// A UI control was activated.
    Click,
    /// A tool finished successfully (quiz passed, calculator run).
    Success,
    /// Something alarming happened (budget exceeded, life event).
    Warning,
    /// The addiction simulation reached a terminal state.
    SimulationFinished { day: u32, balance: u64 },
}

/// Receives game events.
pub trait NotificationSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Win { amount } => tracing::info!(amount, "win"),
            GameEvent::Loss { bet } => tracing::debug!(bet, "loss"),
            GameEvent::Warning => tracing::warn!("warning"),
            GameEvent::SimulationFinished { day, balance } => {
                tracing::info!(day, balance, "simulation finished")
            }
            other => tracing::trace!(?other, "event"),
        }
    }
}

/// Rings the terminal bell on wins, warnings and simulation end.
pub struct BellSink<W: Write> {
    out: W,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl BellSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> NotificationSink for BellSink<W> {
    fn notify(&mut self, event: &GameEvent) {
        let rings = match event {
            GameEvent::Win { .. } => 1,
            GameEvent::Warning => 2,
            GameEvent::SimulationFinished { .. } => 3,
            _ => 0,
        };
        if rings > 0 {
            // Bell output is best effort.
            let _ = self.out.write_all(&vec![0x07; rings]);
            let _ = self.out.flush();
        }
    }
}

/// Keeps every event in order, for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event)
    }
}
