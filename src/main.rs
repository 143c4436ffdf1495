use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use houseedge::addiction::{AddictionConfig, AddictionRunner, SimulationDayState};
use houseedge::analysis::house_edge::{exact_house_edge_percent, jackpot_probability};
use houseedge::analysis::{estimate_house_edge, project_losses, LossInputs};
use houseedge::core::constants::*;
use houseedge::notify::{BellSink, GameEvent, NotificationSink, TracingSink};
use houseedge::progress::{ProgressUpdate, UserProgress};
use houseedge::recovery::{quote_for, DailyCheckin, RecoveryData, RecoveryUpdate};
use houseedge::slots::{PaytableVariant, SlotConfig, SlotSession};
use houseedge::utils::build_info::VERSION_LINE;
use houseedge::utils::{load_or_default, ChecksummedFileStore, JsonFileStore, StateStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Stderr;
use std::thread;
use std::time::{Duration, Instant};
use tracing::Level;

/// How often the addiction loop checks its clock.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Parser, Debug)]
#[command(name = "houseedge")]
#[command(version = VERSION_LINE)]
#[command(about = "Why the house always wins: a slot machine and addiction simulator")]
struct Cli {
    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Do not ring the terminal bell
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the slot machine
    Spin {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 10)]
        count: u32,

        /// Bet per spin (clamped to the table limits)
        #[arg(short, long, default_value_t = DEFAULT_BET)]
        bet: u64,

        /// Paytable variant (classic or near-miss)
        #[arg(short, long, default_value = "classic")]
        paytable: PaytableVariant,

        /// Turn on rescue wins after losing streaks
        #[arg(long)]
        rigged: bool,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Watch a gambling addiction unfold day by day
    Addiction {
        /// Continue from the saved snapshot
        #[arg(long, conflicts_with = "reset")]
        resume: bool,

        /// Discard the saved snapshot first
        #[arg(long)]
        reset: bool,

        /// Speed preset: 0 = slow, 1 = normal, 2 = fast, 3 = very fast
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..4))]
        speed: Option<u8>,

        /// Run to the end without pausing between days
        #[arg(long, conflicts_with = "speed")]
        instant: bool,

        /// Start from a stressed baseline
        #[arg(long)]
        stressed: bool,

        /// Stop after this many days (the snapshot keeps the rest)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Measure the house edge of a paytable
    HouseEdge {
        /// Paytable variant; both when omitted
        #[arg(short, long)]
        paytable: Option<PaytableVariant>,

        /// Number of sampled spins
        #[arg(short = 'n', long, default_value_t = HOUSE_EDGE_SAMPLE_SPINS)]
        spins: u32,

        #[arg(short, long, default_value_t = HOUSE_EDGE_SAMPLE_BET)]
        bet: u64,

        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Project how much gambling costs over time
    Loss {
        /// Average bet
        #[arg(long, default_value_t = LossInputs::default().average_bet)]
        bet: f64,

        /// Hours played per day
        #[arg(long, default_value_t = LossInputs::default().hours_per_day)]
        hours: f64,

        /// House edge in percent
        #[arg(long, default_value_t = LossInputs::default().house_edge_percent)]
        edge: f64,

        /// Monthly income or budget
        #[arg(long, default_value_t = LossInputs::default().monthly_budget)]
        budget: f64,
    },

    /// Show or update learning progress
    Progress {
        #[command(subcommand)]
        action: Option<ProgressAction>,
    },

    /// Track a gambling-free streak, savings and daily check-ins
    Recovery {
        #[command(subcommand)]
        action: Option<RecoveryAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ProgressAction {
    /// Show points, level and goals
    Show,
    /// Mark an article as read
    Article { id: String },
    /// Record a finished quiz
    Quiz,
    /// Forget all progress
    Reset,
}

#[derive(Subcommand, Debug)]
enum RecoveryAction {
    /// Show the streak, milestones, goals and latest check-in
    Show,
    /// Start (or restart) the clean streak today
    Start,
    /// Add a savings goal
    Goal {
        title: String,
        target: u64,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Put money toward a goal (or take it back)
    Progress {
        id: u32,
        amount: u64,
        #[arg(long)]
        subtract: bool,
    },
    /// Record money not gambled
    Saved { amount: u64 },
    /// Log today's mood and urge level
    Checkin {
        /// 1 (awful) to 10 (great)
        #[arg(long, default_value_t = DEFAULT_CHECKIN_MOOD)]
        mood: u8,
        /// 1 (none) to 10 (overwhelming)
        #[arg(long, default_value_t = DEFAULT_CHECKIN_URGE)]
        urge: u8,
        /// Something that helped today (repeatable)
        #[arg(short, long = "activity")]
        activities: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Forget all recovery data
    Reset,
}

/// Terminal bell unless `--quiet`, logging either way.
enum CliSink {
    Bell(BellSink<Stderr>, TracingSink),
    Quiet(TracingSink),
}

impl CliSink {
    fn new(quiet: bool) -> Self {
        if quiet {
            CliSink::Quiet(TracingSink)
        } else {
            CliSink::Bell(BellSink::stderr(), TracingSink)
        }
    }
}

impl NotificationSink for CliSink {
    fn notify(&mut self, event: &GameEvent) {
        match self {
            CliSink::Bell(bell, log) => {
                bell.notify(event);
                log.notify(event);
            }
            CliSink::Quiet(log) => log.notify(event),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut sink = CliSink::new(cli.quiet);

    match cli.command {
        Command::Spin {
            count,
            bet,
            paytable,
            rigged,
            seed,
        } => run_spins(count, bet, paytable, rigged, seed, &mut sink),
        Command::Addiction {
            resume,
            reset,
            speed,
            instant,
            stressed,
            days,
        } => {
            let day_interval_ms = if instant {
                0
            } else {
                speed
                    .map(|preset| DAY_INTERVAL_PRESETS_MS[preset as usize])
                    .unwrap_or(DEFAULT_DAY_INTERVAL_MS)
            };
            let config = AddictionConfig {
                initial_stress_level: if stressed {
                    ALT_INITIAL_STRESS_LEVEL
                } else {
                    INITIAL_STRESS_LEVEL
                },
                day_interval_ms,
                ..Default::default()
            };
            run_addiction(config, resume, reset, days, &mut sink)
        }
        Command::HouseEdge {
            paytable,
            spins,
            bet,
            seed,
        } => {
            run_house_edge(paytable, spins, bet, seed);
            Ok(())
        }
        Command::Loss {
            bet,
            hours,
            edge,
            budget,
        } => run_loss(
            LossInputs {
                average_bet: bet,
                hours_per_day: hours,
                house_edge_percent: edge,
                monthly_budget: budget,
            },
            &mut sink,
        ),
        Command::Progress { action } => run_progress(action.unwrap_or(ProgressAction::Show)),
        Command::Recovery { action } => {
            run_recovery(action.unwrap_or(RecoveryAction::Show), &mut sink)
        }
    }
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn run_spins(
    count: u32,
    bet: u64,
    paytable: PaytableVariant,
    rigged: bool,
    seed: Option<u64>,
    sink: &mut CliSink,
) -> Result<()> {
    let mut session = SlotSession::new(SlotConfig {
        paytable,
        starting_bet: bet,
        rescue_wins: rigged,
        ..Default::default()
    });
    let mut rng = make_rng(seed);

    println!(
        "Balance {}  bet {}  paytable {}",
        format_amount(session.balance()),
        format_amount(session.bet()),
        paytable.name()
    );
    println!();

    for _ in 0..count {
        match session.spin(&mut rng, sink) {
            Ok(outcome) => {
                let verdict = if outcome.win > 0 {
                    format!("WIN {}", format_amount(outcome.win))
                } else {
                    "no win".to_string()
                };
                println!(
                    "  [ {} ]  {:<16} balance {}",
                    outcome.result.display(),
                    verdict,
                    format_amount(outcome.balance_after)
                );
            }
            Err(err) => {
                println!("  {}", err);
                break;
            }
        }
    }

    println!();
    println!(
        "Spins {}  wagered {}  won {}  net {}",
        session.spin_count(),
        format_amount(session.total_wagered()),
        format_amount(session.total_won()),
        session.net_result()
    );
    println!(
        "Current losing streak {}  longest {}",
        session.loss_streak().count(),
        session.longest_loss_streak()
    );
    Ok(())
}

fn run_addiction(
    config: AddictionConfig,
    resume: bool,
    reset: bool,
    max_days: Option<u32>,
    sink: &mut CliSink,
) -> Result<()> {
    let store: ChecksummedFileStore<SimulationDayState> =
        ChecksummedFileStore::in_save_dir(SIMULATION_SNAPSHOT_FILE)?;

    if reset {
        store.clear().context("failed to discard simulation snapshot")?;
    }

    let mut runner = match resume.then(|| load_snapshot(&store)).flatten() {
        Some(state) => {
            println!("Resuming from day {}.", state.day);
            AddictionRunner::resume(config, state)
        }
        None => AddictionRunner::new(config),
    };

    if !runner.start() {
        println!("This simulation has already ended. Use --reset to start over.");
        print_day_summary(runner.state());
        return Ok(());
    }

    print_day_summary(runner.state());
    let mut days_run = 0;

    while runner.is_running() {
        let Some(step) = runner.poll(Instant::now(), sink) else {
            thread::sleep(POLL_INTERVAL);
            continue;
        };
        days_run += 1;

        print_day_summary(runner.state());
        for event in &step.new_events {
            println!("    ⚠ {}", event);
        }
        store.save(runner.state())?;

        if max_days.is_some_and(|max| days_run >= max) && !step.finished {
            runner.stop();
            println!("Paused. Run again with --resume to continue.");
        }
    }

    if runner.is_finished() {
        let state = runner.state();
        println!();
        println!(
            "The simulation ended on day {}. {} of {} lost.",
            state.day,
            format_amount(state.total_lost()),
            format_amount(state.initial_balance)
        );
        store.clear()?;
        update_progress(ProgressUpdate::SimulatorCompleted)?;
    }
    Ok(())
}

fn load_snapshot(
    store: &ChecksummedFileStore<SimulationDayState>,
) -> Option<SimulationDayState> {
    match store.load() {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(%err, "ignoring unreadable simulation snapshot");
            None
        }
    }
}

fn print_day_summary(state: &SimulationDayState) {
    println!(
        "Day {:>3}  balance {:>12}  losing {:>10}/day  {:>4.1}h  stress {:>5.1}  family {:>5.1}  work {:>5.1}  mind {:>5.1}",
        state.day,
        format_amount(state.balance),
        format_amount(state.daily_loss),
        state.time_spent,
        state.stress_level,
        state.family_relation,
        state.work_performance,
        state.mental_health
    );
}

fn run_house_edge(paytable: Option<PaytableVariant>, spins: u32, bet: u64, seed: Option<u64>) {
    let variants = match paytable {
        Some(variant) => vec![variant],
        None => PaytableVariant::ALL.to_vec(),
    };
    let mut rng = make_rng(seed);

    for variant in variants {
        let table = variant.paytable();
        let estimate = estimate_house_edge(&table, spins, bet, &mut rng);
        println!("── {} ──", variant.name());
        println!(
            "  Sampled {} spins: wagered {}, paid {}",
            estimate.spins,
            format_amount(estimate.total_bet),
            format_amount(estimate.total_win)
        );
        println!(
            "  Triples {}  pairs {}  jackpots {}",
            estimate.triples, estimate.pairs, estimate.jackpots
        );
        println!(
            "  House edge: {:.2}% sampled, {:.2}% exact",
            estimate.house_edge_percent(),
            exact_house_edge_percent(&table, bet)
        );
        println!();
    }
    println!(
        "Chance of a jackpot on any spin: 1 in {:.0}",
        1.0 / jackpot_probability()
    );
}

fn run_loss(inputs: LossInputs, sink: &mut CliSink) -> Result<()> {
    let projection = project_losses(&inputs);

    println!("Wagered and expected loss:");
    for (label, period) in [
        ("Day", projection.daily),
        ("Month", projection.monthly),
        ("Year", projection.yearly),
    ] {
        println!(
            "  {:<6} wagered {:>16}  lost {:>14}",
            label,
            format_amount(period.wagered.round() as u64),
            format_amount(period.loss.round() as u64)
        );
    }
    println!();
    println!(
        "A year of those losses invested for {} years instead:",
        OPPORTUNITY_YEARS
    );
    println!(
        "  Stocks   {:>16}",
        format_amount(projection.stock_opportunity.round() as u64)
    );
    println!(
        "  Deposits {:>16}",
        format_amount(projection.deposit_opportunity.round() as u64)
    );

    if projection.over_budget {
        sink.notify(&GameEvent::Warning);
        println!();
        println!(
            "⚠ Monthly losses exceed {:.0}% of your budget.",
            BUDGET_WARNING_FRACTION * 100.0
        );
    } else {
        sink.notify(&GameEvent::Success);
    }

    update_progress(ProgressUpdate::CalculatorUsed)?;
    Ok(())
}

fn progress_store() -> Result<JsonFileStore<UserProgress>> {
    Ok(JsonFileStore::in_save_dir(PROGRESS_FILE)?)
}

/// Apply one update to the saved progress.
fn update_progress(update: ProgressUpdate) -> Result<UserProgress> {
    let store = progress_store()?;
    let mut progress = load_or_default(&store).normalized();
    if progress.apply(update) {
        store
            .save(&progress)
            .with_context(|| format!("failed to save progress to {}", store.path().display()))?;
    }
    Ok(progress)
}

fn run_progress(action: ProgressAction) -> Result<()> {
    let progress = match action {
        ProgressAction::Show => load_or_default(&progress_store()?).normalized(),
        ProgressAction::Article { id } => update_progress(ProgressUpdate::ArticleRead { id })?,
        ProgressAction::Quiz => update_progress(ProgressUpdate::QuizTaken)?,
        ProgressAction::Reset => update_progress(ProgressUpdate::Reset)?,
    };

    let level = progress.level();
    println!(
        "Level {} {}  ({} / {} points)",
        level.number(),
        level.title(),
        progress.points(),
        MAX_POINTS
    );
    for goal in progress.goals() {
        let mark = if goal.is_complete() { "✓" } else { " " };
        println!(
            "  [{}] {:<20} {}/{} ({}%)",
            mark,
            goal.title,
            goal.current.min(goal.target),
            goal.target,
            goal.percent()
        );
    }
    Ok(())
}

fn recovery_update(action: RecoveryAction, today: NaiveDate) -> Option<RecoveryUpdate> {
    let update = match action {
        RecoveryAction::Show => return None,
        RecoveryAction::Start => RecoveryUpdate::Start { today },
        RecoveryAction::Goal {
            title,
            target,
            description,
            deadline,
        } => RecoveryUpdate::AddGoal {
            title,
            description,
            target_amount: target,
            deadline,
        },
        RecoveryAction::Progress {
            id,
            amount,
            subtract,
        } => {
            if subtract {
                RecoveryUpdate::SubtractGoalProgress { id, amount }
            } else {
                RecoveryUpdate::AddGoalProgress { id, amount }
            }
        }
        RecoveryAction::Saved { amount } => RecoveryUpdate::AddMoneySaved(amount),
        RecoveryAction::Checkin {
            mood,
            urge,
            activities,
            notes,
        } => RecoveryUpdate::CheckIn(DailyCheckin {
            mood,
            urge_level: urge,
            activities,
            notes,
            ..DailyCheckin::new(today)
        }),
        RecoveryAction::Reset => RecoveryUpdate::Reset,
    };
    Some(update)
}

fn run_recovery(action: RecoveryAction, sink: &mut CliSink) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let store: JsonFileStore<RecoveryData> = JsonFileStore::in_save_dir(RECOVERY_FILE)?;
    let mut data = load_or_default(&store);

    let mut changed = data.apply(RecoveryUpdate::Refresh { today });
    if let Some(update) = recovery_update(action, today) {
        let feedback = update.feedback();
        if data.apply(update) {
            changed = true;
            sink.notify(&feedback);
        } else {
            tracing::info!("recovery action made no change");
        }
    }
    if changed {
        store
            .save(&data)
            .with_context(|| format!("failed to save recovery data to {}", store.path().display()))?;
    }

    match data.start_date {
        Some(start) => println!("{} clean days since {}", data.clean_days, start),
        None => println!("No streak yet. Run `houseedge recovery start` to begin."),
    }
    println!("Money saved: {}", format_amount(data.money_saved));
    println!(
        "Milestones: {}/{}",
        data.achieved_milestones(),
        data.milestones.len()
    );
    for milestone in &data.milestones {
        let mark = if milestone.achieved { "★" } else { " " };
        let when = milestone
            .achieved_date
            .map(|d| format!("  reached {}", d))
            .unwrap_or_default();
        println!(
            "  [{}] {:<13} {}{}",
            mark,
            milestone.title(),
            milestone.description(),
            when
        );
    }
    if !data.goals.is_empty() {
        println!("Savings goals:");
        for goal in &data.goals {
            let mark = if goal.completed { "✓" } else { " " };
            println!(
                "  [{}] #{} {:<20} {}/{} ({}%)",
                mark,
                goal.id,
                goal.title,
                format_amount(goal.current_amount),
                format_amount(goal.target_amount),
                goal.percent()
            );
        }
    }
    if let Some(checkin) = data.latest_checkin() {
        println!(
            "Last check-in {}: mood {}/10, urge {}/10",
            checkin.date, checkin.mood, checkin.urge_level
        );
    }
    println!();
    println!("\"{}\"", quote_for(today));
    Ok(())
}

/// 1234567 -> "1,234,567"
fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
