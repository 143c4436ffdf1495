//! Learning progress types.

use serde::{Deserialize, Serialize};

/// Everything the player has done with the learning tools (saved to disk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProgress {
    pub articles_read: u32,
    pub quizzes_taken: u32,
    pub calculator_used: bool,
    pub simulator_completed: bool,
    /// Article ids in the order they were first read.
    pub read_articles: Vec<String>,
}

/// A single change to [`UserProgress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// An article was opened. Re-reading does not count twice.
    ArticleRead { id: String },
    /// Overwrite the article counter.
    SetArticlesRead(u32),
    /// A quiz was completed.
    QuizTaken,
    /// Overwrite the quiz counter.
    SetQuizzesTaken(u32),
    CalculatorUsed,
    SetCalculatorUsed(bool),
    SimulatorCompleted,
    SetSimulatorCompleted(bool),
    /// Forget everything.
    Reset,
}

/// Gamification tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgressLevel {
    Newbie = 1,
    Beginner = 2,
    Intermediate = 3,
    Expert = 4,
    Master = 5,
}

impl ProgressLevel {
    pub const ALL: [ProgressLevel; 5] = [
        ProgressLevel::Newbie,
        ProgressLevel::Beginner,
        ProgressLevel::Intermediate,
        ProgressLevel::Expert,
        ProgressLevel::Master,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            ProgressLevel::Newbie => "Newbie",
            ProgressLevel::Beginner => "Beginner",
            ProgressLevel::Intermediate => "Intermediate",
            ProgressLevel::Expert => "Expert",
            ProgressLevel::Master => "Master",
        }
    }

    /// Points needed to reach this tier.
    pub fn min_points(self) -> u32 {
        match self {
            ProgressLevel::Newbie => 0,
            ProgressLevel::Beginner => 30,
            ProgressLevel::Intermediate => 50,
            ProgressLevel::Expert => 70,
            ProgressLevel::Master => 90,
        }
    }
}

/// One entry on the goals board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub title: &'static str,
    pub current: u32,
    pub target: u32,
}

impl Goal {
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// Completion in percent, capped at 100.
    pub fn percent(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        (self.current * 100 / self.target).min(100)
    }
}
