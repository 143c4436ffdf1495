//! Integration test: Slot sessions and Monte Carlo simulation
//!
//! Plays whole sessions through SlotSession and checks the bookkeeping,
//! the rescue manipulation, and the aggregate simulator report.

use houseedge::notify::{GameEvent, RecordingSink};
use houseedge::simulator::{run_simulation, SimConfig};
use houseedge::slots::{SessionError, SlotConfig, SlotSession};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

#[test]
fn test_session_plays_until_broke() {
    let mut session = SlotSession::new(SlotConfig::default());
    let mut rng = create_test_rng();
    let mut sink = RecordingSink::default();

    let mut spins = 0;
    loop {
        match session.spin(&mut rng, &mut sink) {
            Ok(_) => spins += 1,
            Err(SessionError::InsufficientBalance { balance, bet }) => {
                assert!(balance < bet);
                break;
            }
            Err(other) => panic!("unexpected error {:?}", other),
        }
        assert!(spins < 1_000_000, "session never ended");
    }

    assert_eq!(session.spin_count(), spins);
    assert_eq!(session.history().len(), spins);
    assert_eq!(
        session.balance() as i64,
        100_000 + session.net_result()
    );
    assert_eq!(sink.count(|e| *e == GameEvent::Spin), spins);
    assert_eq!(
        sink.count(|e| matches!(e, GameEvent::Win { .. })),
        session.wins()
    );
    assert!(session.total_won() < session.total_wagered());
}

#[test]
fn test_rigged_machine_rescues_long_losing_streaks() {
    let config = SlotConfig {
        starting_balance: 100_000_000,
        ..SlotConfig::rigged()
    };
    let mut session = SlotSession::new(config);
    let mut rng = create_test_rng();
    let mut sink = RecordingSink::default();

    let mut armed = 0;
    let mut rescued = 0;
    for _ in 0..5_000 {
        let outcome = session.spin(&mut rng, &mut sink).unwrap();
        if outcome.rescue_armed {
            armed += 1;
            if outcome.result.triple_symbol().is_some() {
                rescued += 1;
            }
        }
    }

    assert!(armed > 0, "a 10-loss streak should occur in 5000 spins");
    assert!(rescued * 2 > armed, "{} rescues out of {}", rescued, armed);
    assert!(session.longest_loss_streak() >= 10);
}

#[test]
fn test_simulation_report_shows_house_edge() {
    let config = SimConfig {
        num_runs: 200,
        seed: Some(2024),
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config);

    assert_eq!(report.num_runs, 200);
    assert_eq!(report.run_stats.len(), 200);
    assert!(report.house_edge_percent > 0.0);
    assert!(report.bust_rate() > 0.9);
    assert_eq!(report.total_rescue_armed_spins, 0);

    let text = report.to_text();
    assert!(text.contains("SIMULATION REPORT"));
    assert!(!text.contains("MANIPULATION"));
}

#[test]
fn test_rigged_simulation_reports_manipulation() {
    let report = run_simulation(&SimConfig {
        seed: Some(99),
        verbosity: 0,
        ..SimConfig::quick(true)
    });
    assert!(report.rescue_wins);
    assert!(report.to_text().contains("MANIPULATION"));
}
