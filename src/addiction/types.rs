//! Addiction simulator state and life events.

use crate::core::constants::{
    DEFAULT_DAY_INTERVAL_MS, INITIAL_STRESS_LEVEL, SIM_HORIZON_DAYS, SIM_INITIAL_BALANCE,
    SIM_INITIAL_DAILY_LOSS, SIM_INITIAL_TIME_SPENT_HOURS, SIM_INITIAL_WELLBEING,
};
use serde::{Deserialize, Serialize};

/// Narrative milestones on the way down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeEvent {
    LyingToFamily,
    WorkDecline,
    BorrowingFromFriends,
    ArguingWithPartner,
    CreditCardGambling,
    LostJob,
    SavingsDepleted,
    FamilyWithdrawing,
}

impl LifeEvent {
    pub const ALL: [LifeEvent; 8] = [
        LifeEvent::LyingToFamily,
        LifeEvent::WorkDecline,
        LifeEvent::BorrowingFromFriends,
        LifeEvent::ArguingWithPartner,
        LifeEvent::CreditCardGambling,
        LifeEvent::LostJob,
        LifeEvent::SavingsDepleted,
        LifeEvent::FamilyWithdrawing,
    ];

    /// Events tied to a fixed day, with that day.
    pub const SCHEDULED: [(u32, LifeEvent); 6] = [
        (7, LifeEvent::LyingToFamily),
        (14, LifeEvent::WorkDecline),
        (21, LifeEvent::BorrowingFromFriends),
        (30, LifeEvent::ArguingWithPartner),
        (45, LifeEvent::CreditCardGambling),
        (60, LifeEvent::LostJob),
    ];

    pub fn message(self) -> &'static str {
        match self {
            LifeEvent::LyingToFamily => "Started lying to family about the missing money",
            LifeEvent::WorkDecline => {
                "Work performance slipping, often late after gambling all night"
            }
            LifeEvent::BorrowingFromFriends => "Started borrowing from friends to keep gambling",
            LifeEvent::ArguingWithPartner => "Fighting with partner over money problems",
            LifeEvent::CreditCardGambling => "Using credit cards to gamble online",
            LifeEvent::LostJob => "Lost the job because of poor performance",
            LifeEvent::SavingsDepleted => "Lost 90% of savings",
            LifeEvent::FamilyWithdrawing => "Family starting to pull away",
        }
    }
}

impl std::fmt::Display for LifeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Settings for a simulator run.
#[derive(Debug, Clone, PartialEq)]
pub struct AddictionConfig {
    pub initial_stress_level: f64,
    /// Wall-clock time between simulated days.
    pub day_interval_ms: u64,
    /// Last day that may be simulated.
    pub horizon_days: u32,
}

impl Default for AddictionConfig {
    fn default() -> Self {
        Self {
            initial_stress_level: INITIAL_STRESS_LEVEL,
            day_interval_ms: DEFAULT_DAY_INTERVAL_MS,
            horizon_days: SIM_HORIZON_DAYS,
        }
    }
}

/// One simulated day of a gambler's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDayState {
    /// Starts at 1, +1 per step.
    pub day: u32,
    pub balance: u64,
    pub initial_balance: u64,
    pub daily_loss: u64,
    /// Hours per day spent gambling.
    pub time_spent: f64,
    pub stress_level: f64,
    pub family_relation: f64,
    pub work_performance: f64,
    pub mental_health: f64,
    /// In the order they happened; never repeats.
    pub events: Vec<LifeEvent>,
}

impl SimulationDayState {
    /// The fixed starting state with the given stress baseline.
    pub fn with_initial_stress(stress_level: f64) -> Self {
        Self {
            day: 1,
            balance: SIM_INITIAL_BALANCE,
            initial_balance: SIM_INITIAL_BALANCE,
            daily_loss: SIM_INITIAL_DAILY_LOSS,
            time_spent: SIM_INITIAL_TIME_SPENT_HOURS,
            stress_level,
            family_relation: SIM_INITIAL_WELLBEING,
            work_performance: SIM_INITIAL_WELLBEING,
            mental_health: SIM_INITIAL_WELLBEING,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &AddictionConfig) -> Self {
        Self::with_initial_stress(config.initial_stress_level)
    }

    pub fn has_event(&self, event: LifeEvent) -> bool {
        self.events.contains(&event)
    }

    /// Amount lost so far.
    pub fn total_lost(&self) -> u64 {
        self.initial_balance.saturating_sub(self.balance)
    }

    /// Broke, or past the horizon.
    pub fn is_terminal(&self, horizon_days: u32) -> bool {
        self.balance == 0 || self.day > horizon_days
    }
}

impl Default for SimulationDayState {
    fn default() -> Self {
        Self::with_initial_stress(INITIAL_STRESS_LEVEL)
    }
}
