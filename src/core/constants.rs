// Reels
pub const REEL_COUNT: usize = 3;
pub const SYMBOL_COUNT: usize = 8;

// Symbol weights, indexed by symbol (Cherry, Lemon, Orange, Grape, Bell, Diamond, Seven, Star).
// Skewed toward low-value fruit; the Seven sits at 2% per reel.
pub const SYMBOL_WEIGHTS: [u32; SYMBOL_COUNT] = [20, 18, 16, 14, 12, 8, 2, 10];

// Jackpot suppression: chance the third reel is rewritten when the first two show Seven
pub const JACKPOT_SUPPRESSION_CHANCE: f64 = 0.95;

// Rescue wins after a losing streak
pub const RESCUE_STREAK_THRESHOLD: u32 = 10;
pub const RESCUE_WIN_CHANCE: f64 = 0.8;
// (symbol index, weight out of 100) for the forced triple
pub const RESCUE_TRIPLE_WEIGHTS: [(usize, u32); 4] = [(6, 10), (5, 20), (4, 30), (0, 40)];

// Pair payouts, in per-mille of the bet
pub const PAIR_PAYOUT_PERMILLE: u64 = 500;
pub const NEAR_MISS_LOW_PAIR_PERMILLE: u64 = 100;

// Slot session
pub const STARTING_BALANCE: u64 = 100_000;
pub const DEFAULT_BET: u64 = 10_000;
pub const MIN_BET: u64 = 1_000;
pub const MAX_BET: u64 = 100_000;
pub const BET_STEP: u64 = 5_000;
pub const MAX_TOPUP: u64 = 1_000_000;

// House-edge estimation
pub const HOUSE_EDGE_SAMPLE_SPINS: u32 = 100_000;
pub const HOUSE_EDGE_SAMPLE_BET: u64 = 10_000;

// Addiction simulator: initial state
pub const SIM_INITIAL_BALANCE: u64 = 10_000_000;
pub const SIM_INITIAL_DAILY_LOSS: u64 = 100_000;
pub const SIM_INITIAL_TIME_SPENT_HOURS: f64 = 1.0;
pub const INITIAL_STRESS_LEVEL: f64 = 0.0;
pub const ALT_INITIAL_STRESS_LEVEL: f64 = 20.0;
pub const SIM_INITIAL_WELLBEING: f64 = 100.0;

// Addiction simulator: per-day dynamics
// addiction factor = min(2.0, 1 + day * 0.02), in basis points
pub const ADDICTION_FACTOR_BASE_BP: u64 = 10_000;
pub const ADDICTION_FACTOR_PER_DAY_BP: u64 = 200;
pub const ADDICTION_FACTOR_CAP_BP: u64 = 20_000;
pub const TIME_SPENT_GROWTH: f64 = 1.05;
pub const MAX_TIME_SPENT_HOURS: f64 = 16.0;
pub const STRESS_PER_DAY: f64 = 2.0;
pub const FAMILY_DECAY_PER_DAY: f64 = 1.5;
pub const WORK_DECAY_PER_DAY: f64 = 1.0;
pub const MENTAL_DECAY_PER_DAY: f64 = 1.2;
pub const METRIC_MIN: f64 = 0.0;
pub const METRIC_MAX: f64 = 100.0;

// Addiction simulator: event thresholds
pub const SAVINGS_DEPLETED_PERCENT: u64 = 10;
pub const FAMILY_WITHDRAWAL_THRESHOLD: f64 = 20.0;
pub const SIM_HORIZON_DAYS: u32 = 365;

// Addiction simulator: cadence
pub const DEFAULT_DAY_INTERVAL_MS: u64 = 1000;
pub const DAY_INTERVAL_PRESETS_MS: [u64; 4] = [2000, 1000, 500, 100];

// Learning progress bounds
pub const MAX_ARTICLES_READ: u32 = 100;
pub const MAX_QUIZZES_TAKEN: u32 = 50;

// Gamification points
pub const POINTS_PER_ARTICLE: u32 = 10;
pub const MAX_ARTICLE_POINTS: u32 = 50;
pub const POINTS_PER_QUIZ: u32 = 15;
pub const MAX_QUIZ_POINTS: u32 = 45;
pub const CALCULATOR_POINTS: u32 = 20;
pub const SIMULATOR_POINTS: u32 = 25;
pub const MAX_POINTS: u32 = 100;

// Loss calculator
pub const BETS_PER_HOUR: f64 = 60.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const STOCK_ANNUAL_RETURN: f64 = 0.12;
pub const DEPOSIT_ANNUAL_RETURN: f64 = 0.06;
pub const OPPORTUNITY_YEARS: i32 = 10;
pub const BUDGET_WARNING_FRACTION: f64 = 0.1;

// Recovery tools
pub const RECOVERY_MILESTONE_DAYS: [u32; 6] = [1, 7, 30, 90, 180, 365];
pub const CHECKIN_SCALE_MIN: u8 = 1;
pub const CHECKIN_SCALE_MAX: u8 = 10;
pub const DEFAULT_CHECKIN_MOOD: u8 = 5;
pub const DEFAULT_CHECKIN_URGE: u8 = 1;

// Persistence
pub const SAVE_DIR_NAME: &str = ".houseedge";
pub const PROGRESS_FILE: &str = "progress.json";
pub const RECOVERY_FILE: &str = "recovery.json";
pub const SIMULATION_SNAPSHOT_FILE: &str = "simulation.dat";
pub const SNAPSHOT_VERSION_MAGIC: u64 = 0x4845_4447_0000_0001;
