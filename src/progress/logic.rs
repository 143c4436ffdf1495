//! The single reducer for learning progress, plus derived scoring.

use super::types::{Goal, ProgressLevel, ProgressUpdate, UserProgress};
use crate::core::constants::{
    CALCULATOR_POINTS, MAX_ARTICLES_READ, MAX_ARTICLE_POINTS, MAX_POINTS, MAX_QUIZZES_TAKEN,
    MAX_QUIZ_POINTS, POINTS_PER_ARTICLE, POINTS_PER_QUIZ, SIMULATOR_POINTS,
};

impl UserProgress {
    /// Apply an update. All counter bounds are enforced here and nowhere else.
    /// Returns true if anything changed.
    pub fn apply(&mut self, update: ProgressUpdate) -> bool {
        let before = self.clone();

        match update {
            ProgressUpdate::ArticleRead { id } => {
                if !self.read_articles.contains(&id) {
                    self.read_articles.push(id);
                    self.articles_read =
                        self.articles_read.saturating_add(1).min(MAX_ARTICLES_READ);
                }
            }
            ProgressUpdate::SetArticlesRead(value) => {
                self.articles_read = value.min(MAX_ARTICLES_READ);
            }
            ProgressUpdate::QuizTaken => {
                self.quizzes_taken = self.quizzes_taken.saturating_add(1).min(MAX_QUIZZES_TAKEN);
            }
            ProgressUpdate::SetQuizzesTaken(value) => {
                self.quizzes_taken = value.min(MAX_QUIZZES_TAKEN);
            }
            ProgressUpdate::CalculatorUsed => self.calculator_used = true,
            ProgressUpdate::SetCalculatorUsed(value) => self.calculator_used = value,
            ProgressUpdate::SimulatorCompleted => self.simulator_completed = true,
            ProgressUpdate::SetSimulatorCompleted(value) => self.simulator_completed = value,
            ProgressUpdate::Reset => *self = UserProgress::default(),
        }

        *self != before
    }

    /// Re-apply bounds to a value loaded from outside (hand-edited save files).
    pub fn normalized(mut self) -> Self {
        self.articles_read = self.articles_read.min(MAX_ARTICLES_READ);
        self.quizzes_taken = self.quizzes_taken.min(MAX_QUIZZES_TAKEN);
        self
    }

    /// Gamification points, 0-100.
    pub fn points(&self) -> u32 {
        let articles = self.articles_read.min(MAX_ARTICLES_READ);
        let quizzes = self.quizzes_taken.min(MAX_QUIZZES_TAKEN);

        let mut points = 0;
        points += (articles * POINTS_PER_ARTICLE).min(MAX_ARTICLE_POINTS);
        points += (quizzes * POINTS_PER_QUIZ).min(MAX_QUIZ_POINTS);
        if self.calculator_used {
            points += CALCULATOR_POINTS;
        }
        if self.simulator_completed {
            points += SIMULATOR_POINTS;
        }
        points.min(MAX_POINTS)
    }

    pub fn level(&self) -> ProgressLevel {
        let points = self.points();
        ProgressLevel::ALL
            .iter()
            .rev()
            .copied()
            .find(|level| points >= level.min_points())
            .unwrap_or(ProgressLevel::Newbie)
    }

    /// The goals board.
    pub fn goals(&self) -> Vec<Goal> {
        let tools_used = self.calculator_used as u32 + self.simulator_completed as u32;
        vec![
            Goal {
                title: "Articles read",
                current: self.articles_read.min(MAX_ARTICLES_READ),
                target: 5,
            },
            Goal {
                title: "Quizzes taken",
                current: self.quizzes_taken.min(MAX_QUIZZES_TAKEN),
                target: 3,
            },
            Goal {
                title: "Tools used",
                current: tools_used,
                target: 2,
            },
            Goal {
                title: "Simulator completed",
                current: self.simulator_completed as u32,
                target: 1,
            },
        ]
    }
}
