//! Simulation report generation.

use super::config::SimConfig;
use super::session_sim::RunStats;
use serde::Serialize;

/// Aggregated results from many simulated sessions.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_busted: u32,
    pub runs_in_profit: u32,
    pub paytable: &'static str,
    pub rescue_wins: bool,
    pub starting_balance: u64,
    pub bet: u64,

    // Aggregated stats
    pub avg_spins: f64,
    pub avg_spins_to_bust: f64,
    pub avg_final_balance: f64,
    pub avg_peak_balance: f64,
    pub avg_longest_loss_streak: f64,
    pub return_to_player: f64,
    pub house_edge_percent: f64,
    pub win_rate: f64,

    // Counts across all runs
    pub total_spins: u64,
    pub total_jackpots: u64,
    pub total_rescue_armed_spins: u64,
    pub total_rescue_triples: u64,
    pub biggest_win: u64,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let slot_config = config.slot_config();
        let starting_balance = slot_config.starting_balance;
        let bet = slot_config
            .starting_bet
            .clamp(slot_config.min_bet, slot_config.max_bet);

        let runs_busted = runs.iter().filter(|r| r.busted).count() as u32;
        let runs_in_profit = runs
            .iter()
            .filter(|r| r.final_balance > starting_balance)
            .count() as u32;

        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;
        let avg_spins = avg(&|r: &RunStats| r.spins as f64);
        let avg_final_balance = avg(&|r: &RunStats| r.final_balance as f64);
        let avg_peak_balance = avg(&|r: &RunStats| r.peak_balance as f64);
        let avg_longest_loss_streak = avg(&|r: &RunStats| r.longest_loss_streak as f64);
        let avg_spins_to_bust = runs
            .iter()
            .filter(|r| r.busted)
            .map(|r| r.spins as f64)
            .sum::<f64>()
            / runs_busted.max(1) as f64;

        let total_wagered: u64 = runs.iter().map(|r| r.total_wagered).sum();
        let total_won: u64 = runs.iter().map(|r| r.total_won).sum();
        let total_spins: u64 = runs.iter().map(|r| r.spins as u64).sum();
        let total_wins: u64 = runs.iter().map(|r| r.wins as u64).sum();

        let return_to_player = if total_wagered > 0 {
            total_won as f64 / total_wagered as f64
        } else {
            0.0
        };
        let win_rate = if total_spins > 0 {
            total_wins as f64 / total_spins as f64
        } else {
            0.0
        };

        Self {
            num_runs,
            runs_busted,
            runs_in_profit,
            paytable: config.paytable.name(),
            rescue_wins: config.rescue_wins,
            starting_balance,
            bet,
            avg_spins,
            avg_spins_to_bust,
            avg_final_balance,
            avg_peak_balance,
            avg_longest_loss_streak,
            return_to_player,
            house_edge_percent: if total_wagered > 0 {
                (1.0 - return_to_player) * 100.0
            } else {
                0.0
            },
            win_rate,
            total_spins,
            total_jackpots: runs.iter().map(|r| r.jackpots as u64).sum(),
            total_rescue_armed_spins: runs.iter().map(|r| r.rescue_armed_spins as u64).sum(),
            total_rescue_triples: runs.iter().map(|r| r.rescue_triples as u64).sum(),
            biggest_win: runs.iter().map(|r| r.biggest_win).max().unwrap_or(0),
            run_stats: runs,
        }
    }

    pub fn bust_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        self.runs_busted as f64 / self.num_runs as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("               (Using Real Slot Mechanics)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} busted, {} ended in profit\n",
            self.num_runs, self.runs_busted, self.runs_in_profit
        ));
        report.push_str(&format!(
            "Paytable: {}   Rescue wins: {}   Bankroll: {}   Bet: {}\n\n",
            self.paytable,
            if self.rescue_wins { "on" } else { "off" },
            self.starting_balance,
            self.bet
        ));

        report.push_str("── SESSIONS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Spins:             {:.1}\n", self.avg_spins));
        report.push_str(&format!(
            "  Avg Spins to Bust:     {:.1}\n",
            self.avg_spins_to_bust
        ));
        report.push_str(&format!(
            "  Avg Final Balance:     {:.0}\n",
            self.avg_final_balance
        ));
        report.push_str(&format!(
            "  Avg Peak Balance:      {:.0}\n",
            self.avg_peak_balance
        ));
        report.push_str(&format!(
            "  Avg Longest Loss Run:  {:.1}\n\n",
            self.avg_longest_loss_streak
        ));

        report.push_str("── EDGE ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Return to Player:      {:.2}%\n",
            self.return_to_player * 100.0
        ));
        report.push_str(&format!(
            "  House Edge:            {:.2}%\n",
            self.house_edge_percent
        ));
        report.push_str(&format!(
            "  Win Rate (any payout): {:.2}%\n",
            self.win_rate * 100.0
        ));
        report.push_str(&format!("  Jackpots:              {}\n", self.total_jackpots));
        report.push_str(&format!("  Biggest Win:           {}\n\n", self.biggest_win));

        if self.rescue_wins {
            report.push_str("── MANIPULATION ─────────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Armed Spins:           {}\n",
                self.total_rescue_armed_spins
            ));
            report.push_str(&format!(
                "  Forced/Lucky Triples:  {}\n\n",
                self.total_rescue_triples
            ));
        }

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Bust Rate: {:.1}%\n",
            self.bust_rate() * 100.0
        ));
        if self.house_edge_percent > 0.0 {
            report.push_str("  ⚠️  The house wins in the long run.\n");
        }
        if self.runs_in_profit > 0 {
            report.push_str(&format!(
                "  {} lucky sessions walked away ahead. Most players never stop there.\n",
                self.runs_in_profit
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spins: u32, wagered: u64, won: u64, busted: bool) -> RunStats {
        RunStats {
            spins,
            total_wagered: wagered,
            total_won: won,
            final_balance: 100_000 + won - wagered.min(100_000 + won),
            busted,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_aggregates() {
        let config = SimConfig::default();
        let report = SimReport::from_runs(
            vec![
                run(10, 100_000, 0, true),
                run(30, 300_000, 250_000, false),
            ],
            &config,
        );
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_busted, 1);
        assert_eq!(report.avg_spins, 20.0);
        assert_eq!(report.avg_spins_to_bust, 10.0);
        assert!((report.return_to_player - 0.625).abs() < 1e-9);
        assert!((report.house_edge_percent - 37.5).abs() < 1e-9);
        assert_eq!(report.bust_rate(), 0.5);
    }

    #[test]
    fn test_empty_report_does_not_divide_by_zero() {
        let report = SimReport::from_runs(Vec::new(), &SimConfig::default());
        assert_eq!(report.avg_spins, 0.0);
        assert_eq!(report.house_edge_percent, 0.0);
        assert_eq!(report.bust_rate(), 0.0);
    }

    #[test]
    fn test_text_and_json_render() {
        let report = SimReport::from_runs(vec![run(5, 50_000, 0, false)], &SimConfig::default());
        assert!(report.to_text().contains("House Edge"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert!(json.get("run_stats").is_none());
    }
}
