//! Recovery tracker types.

use crate::core::constants::{
    CHECKIN_SCALE_MAX, CHECKIN_SCALE_MIN, DEFAULT_CHECKIN_MOOD, DEFAULT_CHECKIN_URGE,
    RECOVERY_MILESTONE_DAYS,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MILESTONE_TITLES: [(&str, &str); 6] = [
    ("First Day", "1 day gambling-free"),
    ("One Week", "1 week gambling-free"),
    ("One Month", "1 month gambling-free"),
    ("Three Months", "3 months gambling-free"),
    ("Six Months", "6 months gambling-free"),
    ("One Year", "1 year gambling-free"),
];

const QUOTES: [&str; 5] = [
    "Every day clean is a win the house can't take back.",
    "You don't have to see the whole staircase, just take the first step.",
    "Recovery is not a race. You don't have to feel guilty if it takes longer than you thought.",
    "The money you don't bet is the only sure return.",
    "Small steps every day add up to big changes.",
];

/// Quote shown for a given date, rotating by weekday.
pub fn quote_for(date: NaiveDate) -> &'static str {
    QUOTES[date.weekday().num_days_from_sunday() as usize % QUOTES.len()]
}

/// A clean-streak milestone. Once achieved it stays achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: u32,
    pub days_required: u32,
    pub achieved: bool,
    pub achieved_date: Option<NaiveDate>,
}

impl Milestone {
    /// The fixed ladder of milestones, shortest streak first.
    pub fn defaults() -> Vec<Milestone> {
        RECOVERY_MILESTONE_DAYS
            .iter()
            .zip(1..)
            .map(|(&days_required, id)| Milestone {
                id,
                days_required,
                achieved: false,
                achieved_date: None,
            })
            .collect()
    }

    fn labels(&self) -> (&'static str, &'static str) {
        RECOVERY_MILESTONE_DAYS
            .iter()
            .position(|&days| days == self.days_required)
            .map(|i| MILESTONE_TITLES[i])
            .unwrap_or(("Milestone", "gambling-free streak"))
    }

    pub fn title(&self) -> &'static str {
        self.labels().0
    }

    pub fn description(&self) -> &'static str {
        self.labels().1
    }
}

/// Something the player is saving toward instead of gambling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: u64,
    pub current_amount: u64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
}

impl SavingsGoal {
    /// Progress, 0-100.
    pub fn percent(&self) -> u64 {
        if self.target_amount == 0 {
            return 100;
        }
        let current = self.current_amount.min(self.target_amount) as u128;
        (current * 100 / self.target_amount as u128) as u64
    }
}

/// One day's self-report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckin {
    pub date: NaiveDate,
    /// 1 (awful) to 10 (great).
    pub mood: u8,
    /// 1 (none) to 10 (overwhelming).
    pub urge_level: u8,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl DailyCheckin {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            mood: DEFAULT_CHECKIN_MOOD,
            urge_level: DEFAULT_CHECKIN_URGE,
            activities: Vec::new(),
            notes: String::new(),
        }
    }

    /// Clamp both scales into 1-10 and drop blank activities.
    pub fn normalized(mut self) -> Self {
        self.mood = self.mood.clamp(CHECKIN_SCALE_MIN, CHECKIN_SCALE_MAX);
        self.urge_level = self.urge_level.clamp(CHECKIN_SCALE_MIN, CHECKIN_SCALE_MAX);
        self.activities.retain(|a| !a.trim().is_empty());
        self
    }
}

/// Everything the recovery tracker remembers (saved to disk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecoveryData {
    pub start_date: Option<NaiveDate>,
    pub clean_days: u32,
    pub money_saved: u64,
    pub goals: Vec<SavingsGoal>,
    pub milestones: Vec<Milestone>,
    /// Newest first, at most one per date.
    pub daily_checkins: Vec<DailyCheckin>,
    pub next_goal_id: u32,
}

impl Default for RecoveryData {
    fn default() -> Self {
        Self {
            start_date: None,
            clean_days: 0,
            money_saved: 0,
            goals: Vec::new(),
            milestones: Milestone::defaults(),
            daily_checkins: Vec::new(),
            next_goal_id: 1,
        }
    }
}

/// A single change to [`RecoveryData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryUpdate {
    /// Begin (or restart) the clean streak on `today`.
    Start { today: NaiveDate },
    /// Recount clean days and unlock any milestones reached by `today`.
    Refresh { today: NaiveDate },
    /// Add a savings goal. Ignored when the title is blank or the target is zero.
    AddGoal {
        title: String,
        description: String,
        target_amount: u64,
        deadline: Option<NaiveDate>,
    },
    AddGoalProgress { id: u32, amount: u64 },
    SubtractGoalProgress { id: u32, amount: u64 },
    /// Money not gambled. Zero is ignored.
    AddMoneySaved(u64),
    /// Record a check-in, replacing any earlier one for the same date.
    CheckIn(DailyCheckin),
    /// Forget everything.
    Reset,
}
