//! The day transition for the addiction simulator.

use super::types::{AddictionConfig, LifeEvent, SimulationDayState};
use crate::core::constants::{
    ADDICTION_FACTOR_BASE_BP, ADDICTION_FACTOR_CAP_BP, ADDICTION_FACTOR_PER_DAY_BP,
    FAMILY_DECAY_PER_DAY, FAMILY_WITHDRAWAL_THRESHOLD, MAX_TIME_SPENT_HOURS, MENTAL_DECAY_PER_DAY,
    METRIC_MAX, METRIC_MIN, SAVINGS_DEPLETED_PERCENT, STRESS_PER_DAY, TIME_SPENT_GROWTH,
    WORK_DECAY_PER_DAY,
};

/// Addiction factor for `day`, in basis points: `min(2.0, 1 + day * 0.02)`.
pub fn addiction_factor_bp(day: u32) -> u64 {
    (ADDICTION_FACTOR_BASE_BP + day as u64 * ADDICTION_FACTOR_PER_DAY_BP)
        .min(ADDICTION_FACTOR_CAP_BP)
}

/// Addiction factor for `day` as a float, for display.
pub fn addiction_factor(day: u32) -> f64 {
    addiction_factor_bp(day) as f64 / ADDICTION_FACTOR_BASE_BP as f64
}

fn clamp_metric(value: f64) -> f64 {
    value.clamp(METRIC_MIN, METRIC_MAX)
}

/// Simulates one day and returns the next state. `state` is untouched.
pub fn advance_day(state: &SimulationDayState) -> SimulationDayState {
    let factor_bp = addiction_factor_bp(state.day) as u128;
    let daily_loss = (state.daily_loss as u128 * factor_bp / ADDICTION_FACTOR_BASE_BP as u128)
        .min(u64::MAX as u128) as u64;
    let balance = state.balance.saturating_sub(daily_loss);

    let mut next = SimulationDayState {
        day: state.day + 1,
        balance,
        initial_balance: state.initial_balance,
        daily_loss,
        time_spent: (state.time_spent * TIME_SPENT_GROWTH).min(MAX_TIME_SPENT_HOURS),
        stress_level: clamp_metric(state.stress_level + STRESS_PER_DAY),
        family_relation: clamp_metric(state.family_relation - FAMILY_DECAY_PER_DAY),
        work_performance: clamp_metric(state.work_performance - WORK_DECAY_PER_DAY),
        mental_health: clamp_metric(state.mental_health - MENTAL_DECAY_PER_DAY),
        events: state.events.clone(),
    };

    for event in triggered_events(state.day, &next) {
        if !next.has_event(event) {
            next.events.push(event);
        }
    }

    next
}

/// Events whose trigger condition holds on `day`, given the post-step state.
/// The caller filters out ones already recorded.
fn triggered_events(day: u32, next: &SimulationDayState) -> Vec<LifeEvent> {
    let mut events = Vec::new();

    for (trigger_day, event) in LifeEvent::SCHEDULED {
        if day != trigger_day {
            continue;
        }
        // The first lie only happens if nothing else has gone wrong yet.
        if event == LifeEvent::LyingToFamily && !next.events.is_empty() {
            continue;
        }
        events.push(event);
    }

    if savings_depleted(next) {
        events.push(LifeEvent::SavingsDepleted);
    }

    if next.family_relation <= FAMILY_WITHDRAWAL_THRESHOLD {
        events.push(LifeEvent::FamilyWithdrawing);
    }

    events
}

/// Balance at or below 10% of where it started.
fn savings_depleted(state: &SimulationDayState) -> bool {
    state.balance as u128 * 100 <= state.initial_balance as u128 * SAVINGS_DEPLETED_PERCENT as u128
}

/// Events present in `next` but not in `prev`.
pub fn new_events<'a>(prev: &SimulationDayState, next: &'a SimulationDayState) -> &'a [LifeEvent] {
    next.events.get(prev.events.len()..).unwrap_or(&[])
}

/// A fresh state for `config`.
pub fn reset(config: &AddictionConfig) -> SimulationDayState {
    SimulationDayState::from_config(config)
}

/// Steps until the state is terminal. Returns the final state.
pub fn run_to_end(state: &SimulationDayState, horizon_days: u32) -> SimulationDayState {
    let mut current = state.clone();
    while !current.is_terminal(horizon_days) {
        current = advance_day(&current);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::SIM_HORIZON_DAYS;

    fn advance_n(state: &SimulationDayState, n: u32) -> SimulationDayState {
        let mut current = state.clone();
        for _ in 0..n {
            current = advance_day(&current);
        }
        current
    }

    #[test]
    fn test_addiction_factor_ramps_and_caps() {
        assert_eq!(addiction_factor_bp(1), 10_200);
        assert_eq!(addiction_factor_bp(25), 15_000);
        assert_eq!(addiction_factor_bp(50), 20_000);
        assert_eq!(addiction_factor_bp(300), 20_000);
        assert!((addiction_factor(10) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_first_day_values() {
        let next = advance_day(&SimulationDayState::default());
        assert_eq!(next.day, 2);
        assert_eq!(next.daily_loss, 102_000);
        assert_eq!(next.balance, 10_000_000 - 102_000);
        assert!((next.time_spent - 1.05).abs() < 1e-9);
        assert_eq!(next.stress_level, 2.0);
        assert_eq!(next.family_relation, 98.5);
        assert_eq!(next.work_performance, 99.0);
        assert!((next.mental_health - 98.8).abs() < 1e-9);
        assert!(next.events.is_empty());
    }

    #[test]
    fn test_advance_does_not_mutate_input() {
        let state = SimulationDayState::default();
        let before = state.clone();
        let _ = advance_day(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_lying_event_on_day_seven() {
        let state = advance_n(&SimulationDayState::default(), 7);
        assert_eq!(state.events, vec![LifeEvent::LyingToFamily]);
    }

    #[test]
    fn test_lying_event_skipped_when_log_not_empty() {
        let mut state = advance_n(&SimulationDayState::default(), 6);
        state.events.push(LifeEvent::SavingsDepleted);
        let next = advance_day(&state);
        assert!(!next.has_event(LifeEvent::LyingToFamily));
    }

    #[test]
    fn test_reentrant_day_does_not_duplicate() {
        let day14 = advance_n(&SimulationDayState::default(), 13);
        assert_eq!(day14.day, 14);
        let once = advance_day(&day14);

        // Replaying day 14 on top of its own result must not append again.
        let mut replay = once.clone();
        replay.day = 14;
        let twice = advance_day(&replay);

        let count = twice
            .events
            .iter()
            .filter(|e| **e == LifeEvent::WorkDecline)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_savings_depleted_fires_once() {
        let mut state = SimulationDayState::default();
        state.balance = 1_100_000;
        state.daily_loss = 200_000;
        state.day = 80;
        let next = advance_day(&state);
        assert!(next.has_event(LifeEvent::SavingsDepleted));
        let after = advance_day(&next);
        let count = after
            .events
            .iter()
            .filter(|e| **e == LifeEvent::SavingsDepleted)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_family_withdrawal_threshold() {
        let mut state = SimulationDayState::default();
        state.family_relation = 21.0;
        state.day = 100;
        let next = advance_day(&state);
        assert_eq!(next.family_relation, 19.5);
        assert!(next.has_event(LifeEvent::FamilyWithdrawing));
    }

    #[test]
    fn test_metrics_clamped_from_out_of_range_input() {
        let mut state = SimulationDayState::default();
        state.stress_level = 150.0;
        state.family_relation = -5.0;
        state.work_performance = 0.5;
        state.mental_health = 0.0;
        state.time_spent = 40.0;
        let next = advance_day(&state);
        assert_eq!(next.stress_level, 100.0);
        assert_eq!(next.family_relation, 0.0);
        assert_eq!(next.work_performance, 0.0);
        assert_eq!(next.mental_health, 0.0);
        assert_eq!(next.time_spent, 16.0);
    }

    #[test]
    fn test_new_events_slice() {
        let day7 = advance_n(&SimulationDayState::default(), 7);
        let prev = advance_n(&SimulationDayState::default(), 6);
        assert_eq!(new_events(&prev, &day7), &[LifeEvent::LyingToFamily]);
        assert!(new_events(&day7, &day7).is_empty());
    }

    #[test]
    fn test_run_to_end_goes_broke_before_horizon() {
        let end = run_to_end(&SimulationDayState::default(), SIM_HORIZON_DAYS);
        assert_eq!(end.balance, 0);
        assert!(end.day <= SIM_HORIZON_DAYS + 1);
        assert!(end.has_event(LifeEvent::SavingsDepleted));
    }
}
