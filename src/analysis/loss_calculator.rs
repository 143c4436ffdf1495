//! Projected gambling losses and what the money could have become instead.

use crate::core::constants::{
    BETS_PER_HOUR, BUDGET_WARNING_FRACTION, DAYS_PER_MONTH, DAYS_PER_YEAR, DEPOSIT_ANNUAL_RETURN,
    OPPORTUNITY_YEARS, STOCK_ANNUAL_RETURN,
};
use serde::Serialize;

/// Calculator inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct LossInputs {
    pub average_bet: f64,
    pub hours_per_day: f64,
    pub house_edge_percent: f64,
    pub monthly_budget: f64,
}

impl Default for LossInputs {
    fn default() -> Self {
        Self {
            average_bet: 50_000.0,
            hours_per_day: 2.0,
            house_edge_percent: 5.0,
            monthly_budget: 5_000_000.0,
        }
    }
}

/// Amount wagered and expected loss over one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodLoss {
    pub wagered: f64,
    pub loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossProjection {
    pub daily: PeriodLoss,
    pub monthly: PeriodLoss,
    pub yearly: PeriodLoss,
    /// A year of monthly losses compounded at stock-market returns.
    pub stock_opportunity: f64,
    /// The same, at deposit rates.
    pub deposit_opportunity: f64,
    /// Monthly loss exceeds the warning share of the budget.
    pub over_budget: bool,
}

/// Project losses for `inputs`. Negative inputs are treated as zero.
pub fn project_losses(inputs: &LossInputs) -> LossProjection {
    let bet = inputs.average_bet.max(0.0);
    let hours = inputs.hours_per_day.max(0.0);
    let edge = inputs.house_edge_percent.max(0.0) / 100.0;

    let daily_bets = BETS_PER_HOUR * hours;
    let period = |days: f64| {
        let wagered = daily_bets * days * bet;
        PeriodLoss {
            wagered,
            loss: wagered * edge,
        }
    };

    let daily = period(1.0);
    let monthly = period(DAYS_PER_MONTH);
    let yearly = period(DAYS_PER_YEAR);

    let annual = monthly.loss * 12.0;
    LossProjection {
        daily,
        monthly,
        yearly,
        stock_opportunity: annual * (1.0 + STOCK_ANNUAL_RETURN).powi(OPPORTUNITY_YEARS),
        deposit_opportunity: annual * (1.0 + DEPOSIT_ANNUAL_RETURN).powi(OPPORTUNITY_YEARS),
        over_budget: monthly.loss > inputs.monthly_budget * BUDGET_WARNING_FRACTION,
    }
}
