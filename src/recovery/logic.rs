//! The single reducer for the recovery tracker.

use super::types::{DailyCheckin, Milestone, RecoveryData, RecoveryUpdate, SavingsGoal};
use crate::notify::GameEvent;
use chrono::NaiveDate;

impl RecoveryData {
    /// Apply an update. Returns true if anything changed.
    pub fn apply(&mut self, update: RecoveryUpdate) -> bool {
        let before = self.clone();

        match update {
            RecoveryUpdate::Start { today } => {
                self.start_date = Some(today);
                self.refresh(today);
            }
            RecoveryUpdate::Refresh { today } => self.refresh(today),
            RecoveryUpdate::AddGoal {
                title,
                description,
                target_amount,
                deadline,
            } => {
                let title = title.trim();
                if !title.is_empty() && target_amount > 0 {
                    self.goals.push(SavingsGoal {
                        id: self.next_goal_id,
                        title: title.to_string(),
                        description,
                        target_amount,
                        current_amount: 0,
                        deadline,
                        completed: false,
                    });
                    self.next_goal_id = self.next_goal_id.saturating_add(1);
                }
            }
            RecoveryUpdate::AddGoalProgress { id, amount } => {
                if let Some(goal) = self.goal_mut(id) {
                    let current = goal.current_amount.saturating_add(amount);
                    goal.set_current(current);
                }
            }
            RecoveryUpdate::SubtractGoalProgress { id, amount } => {
                if let Some(goal) = self.goal_mut(id) {
                    let current = goal.current_amount.saturating_sub(amount);
                    goal.set_current(current);
                }
            }
            RecoveryUpdate::AddMoneySaved(amount) => {
                self.money_saved = self.money_saved.saturating_add(amount);
            }
            RecoveryUpdate::CheckIn(checkin) => {
                let checkin = checkin.normalized();
                self.daily_checkins.retain(|c| c.date != checkin.date);
                let at = self
                    .daily_checkins
                    .iter()
                    .position(|c| c.date < checkin.date)
                    .unwrap_or(self.daily_checkins.len());
                self.daily_checkins.insert(at, checkin);
            }
            RecoveryUpdate::Reset => *self = RecoveryData::default(),
        }

        *self != before
    }

    /// Days on the current streak as of `today`. The start day counts as
    /// day one; before the start date the count is zero.
    pub fn clean_days_on(&self, today: NaiveDate) -> u32 {
        match self.start_date {
            Some(start) if today >= start => {
                u32::try_from((today - start).num_days() + 1).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }

    fn refresh(&mut self, today: NaiveDate) {
        self.clean_days = self.clean_days_on(today);
        for milestone in &mut self.milestones {
            if !milestone.achieved && self.clean_days >= milestone.days_required {
                milestone.achieved = true;
                milestone.achieved_date = Some(today);
            }
        }
    }

    fn goal_mut(&mut self, id: u32) -> Option<&mut SavingsGoal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn achieved_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.achieved).count()
    }

    /// The closest milestone not yet reached.
    pub fn next_milestone(&self) -> Option<&Milestone> {
        self.milestones
            .iter()
            .filter(|m| !m.achieved)
            .min_by_key(|m| m.days_required)
    }

    pub fn latest_checkin(&self) -> Option<&DailyCheckin> {
        self.daily_checkins.first()
    }

    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }
}

impl SavingsGoal {
    fn set_current(&mut self, current: u64) {
        self.current_amount = current.min(self.target_amount);
        self.completed = self.current_amount >= self.target_amount;
    }
}

impl RecoveryUpdate {
    /// Feedback cue for the action that produced this update.
    pub fn feedback(&self) -> GameEvent {
        match self {
            RecoveryUpdate::Start { .. } | RecoveryUpdate::CheckIn(_) => GameEvent::Success,
            _ => GameEvent::Click,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::RECOVERY_MILESTONE_DAYS;
    use crate::utils::persistence::{load_or_default, JsonFileStore, MemoryStore, StateStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_goal(target: u64) -> RecoveryData {
        let mut data = RecoveryData::default();
        data.apply(RecoveryUpdate::AddGoal {
            title: "Emergency fund".to_string(),
            description: String::new(),
            target_amount: target,
            deadline: None,
        });
        data
    }

    #[test]
    fn test_default_has_six_milestones() {
        let data = RecoveryData::default();
        assert_eq!(data.milestones.len(), 6);
        let days: Vec<u32> = data.milestones.iter().map(|m| m.days_required).collect();
        assert_eq!(days, RECOVERY_MILESTONE_DAYS.to_vec());
        assert_eq!(data.milestones[5].title(), "One Year");
        assert_eq!(data.achieved_milestones(), 0);
        assert_eq!(data.clean_days, 0);
    }

    #[test]
    fn test_start_counts_the_first_day() {
        let mut data = RecoveryData::default();
        assert!(data.apply(RecoveryUpdate::Start {
            today: date(2024, 3, 1)
        }));
        assert_eq!(data.clean_days, 1);
        assert_eq!(data.achieved_milestones(), 1);
        assert_eq!(data.milestones[0].achieved_date, Some(date(2024, 3, 1)));
        assert_eq!(data.next_milestone().map(|m| m.days_required), Some(7));
    }

    #[test]
    fn test_clean_days_before_start_is_zero() {
        let mut data = RecoveryData::default();
        assert_eq!(data.clean_days_on(date(2024, 3, 1)), 0);
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 3, 10),
        });
        assert_eq!(data.clean_days_on(date(2024, 3, 9)), 0);
        assert_eq!(data.clean_days_on(date(2024, 3, 16)), 7);
    }

    #[test]
    fn test_milestones_unlock_once() {
        let mut data = RecoveryData::default();
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 1, 1),
        });
        data.apply(RecoveryUpdate::Refresh {
            today: date(2024, 1, 30),
        });
        assert_eq!(data.clean_days, 30);
        assert_eq!(data.achieved_milestones(), 3);
        assert_eq!(data.milestones[2].achieved_date, Some(date(2024, 1, 30)));

        data.apply(RecoveryUpdate::Refresh {
            today: date(2024, 2, 5),
        });
        assert_eq!(data.achieved_milestones(), 3);
        assert_eq!(data.milestones[2].achieved_date, Some(date(2024, 1, 30)));
    }

    #[test]
    fn test_restart_keeps_earned_milestones() {
        let mut data = RecoveryData::default();
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 1, 1),
        });
        data.apply(RecoveryUpdate::Refresh {
            today: date(2024, 1, 10),
        });
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 2, 1),
        });
        assert_eq!(data.clean_days, 1);
        assert_eq!(data.achieved_milestones(), 2);
        assert_eq!(data.milestones[1].achieved_date, Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_add_goal_rejects_blank_title_and_zero_target() {
        let mut data = RecoveryData::default();
        assert!(!data.apply(RecoveryUpdate::AddGoal {
            title: "   ".to_string(),
            description: String::new(),
            target_amount: 100,
            deadline: None,
        }));
        assert!(!data.apply(RecoveryUpdate::AddGoal {
            title: "Vacation".to_string(),
            description: String::new(),
            target_amount: 0,
            deadline: None,
        }));
        assert!(data.goals.is_empty());

        let data = with_goal(500);
        assert_eq!(data.goals[0].id, 1);
        assert_eq!(data.goals[0].current_amount, 0);
        assert!(!data.goals[0].completed);
        assert_eq!(data.next_goal_id, 2);
    }

    #[test]
    fn test_goal_progress_clamps_and_completes() {
        let mut data = with_goal(500);
        data.apply(RecoveryUpdate::AddGoalProgress { id: 1, amount: 200 });
        assert_eq!(data.goals[0].percent(), 40);

        data.apply(RecoveryUpdate::AddGoalProgress { id: 1, amount: 900 });
        assert_eq!(data.goals[0].current_amount, 500);
        assert!(data.goals[0].completed);
        assert_eq!(data.completed_goals(), 1);

        data.apply(RecoveryUpdate::SubtractGoalProgress { id: 1, amount: 100 });
        assert_eq!(data.goals[0].current_amount, 400);
        assert!(!data.goals[0].completed);

        data.apply(RecoveryUpdate::SubtractGoalProgress { id: 1, amount: 9_999 });
        assert_eq!(data.goals[0].current_amount, 0);
    }

    #[test]
    fn test_progress_on_unknown_goal_is_ignored() {
        let mut data = with_goal(500);
        assert!(!data.apply(RecoveryUpdate::AddGoalProgress { id: 7, amount: 50 }));
    }

    #[test]
    fn test_money_saved_accumulates() {
        let mut data = RecoveryData::default();
        data.apply(RecoveryUpdate::AddMoneySaved(250_000));
        data.apply(RecoveryUpdate::AddMoneySaved(50_000));
        assert!(!data.apply(RecoveryUpdate::AddMoneySaved(0)));
        assert_eq!(data.money_saved, 300_000);

        data.money_saved = u64::MAX - 1;
        data.apply(RecoveryUpdate::AddMoneySaved(10));
        assert_eq!(data.money_saved, u64::MAX);
    }

    #[test]
    fn test_checkins_newest_first_and_replace_same_day() {
        let mut data = RecoveryData::default();
        let mut first = DailyCheckin::new(date(2024, 5, 1));
        first.mood = 3;
        data.apply(RecoveryUpdate::CheckIn(first));
        data.apply(RecoveryUpdate::CheckIn(DailyCheckin::new(date(2024, 5, 3))));
        data.apply(RecoveryUpdate::CheckIn(DailyCheckin::new(date(2024, 5, 2))));

        let dates: Vec<NaiveDate> = data.daily_checkins.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(2024, 5, 3), date(2024, 5, 2), date(2024, 5, 1)]);

        let mut again = DailyCheckin::new(date(2024, 5, 1));
        again.mood = 8;
        again.urge_level = 42;
        again.activities = vec!["walk".to_string(), " ".to_string()];
        data.apply(RecoveryUpdate::CheckIn(again));

        assert_eq!(data.daily_checkins.len(), 3);
        let replaced = &data.daily_checkins[2];
        assert_eq!(replaced.mood, 8);
        assert_eq!(replaced.urge_level, 10);
        assert_eq!(replaced.activities, vec!["walk".to_string()]);
        assert_eq!(data.latest_checkin().map(|c| c.date), Some(date(2024, 5, 3)));
    }

    #[test]
    fn test_checkin_defaults() {
        let checkin = DailyCheckin::new(date(2024, 5, 1));
        assert_eq!(checkin.mood, 5);
        assert_eq!(checkin.urge_level, 1);

        let mut zero = checkin;
        zero.mood = 0;
        zero.urge_level = 0;
        let zero = zero.normalized();
        assert_eq!((zero.mood, zero.urge_level), (1, 1));
    }

    #[test]
    fn test_feedback_cues() {
        let today = date(2024, 5, 1);
        assert_eq!(RecoveryUpdate::Start { today }.feedback(), GameEvent::Success);
        assert_eq!(
            RecoveryUpdate::CheckIn(DailyCheckin::new(today)).feedback(),
            GameEvent::Success
        );
        assert_eq!(
            RecoveryUpdate::AddGoalProgress { id: 1, amount: 1 }.feedback(),
            GameEvent::Click
        );
        assert_eq!(
            RecoveryUpdate::SubtractGoalProgress { id: 1, amount: 1 }.feedback(),
            GameEvent::Click
        );
        assert_eq!(RecoveryUpdate::AddMoneySaved(5).feedback(), GameEvent::Click);
    }

    #[test]
    fn test_reset() {
        let mut data = with_goal(100);
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 1, 1),
        });
        assert!(data.apply(RecoveryUpdate::Reset));
        assert_eq!(data, RecoveryData::default());
    }

    #[test]
    fn test_json_store_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("houseedge-recovery-{}", std::process::id()))
            .join("recovery.json");
        let store = JsonFileStore::new(&path);

        let mut data = with_goal(1_000);
        data.apply(RecoveryUpdate::Start {
            today: date(2024, 6, 1),
        });
        data.apply(RecoveryUpdate::AddGoalProgress { id: 1, amount: 250 });
        data.apply(RecoveryUpdate::CheckIn(DailyCheckin::new(date(2024, 6, 1))));
        store.save(&data).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"startDate\": \"2024-06-01\""));
        assert!(json.contains("\"dailyCheckins\""));

        let loaded: RecoveryData = load_or_default(&store);
        assert_eq!(loaded, data);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_save_fills_defaults() {
        let data: RecoveryData = serde_json::from_str(r#"{"moneySaved": 75}"#).unwrap();
        assert_eq!(data.money_saved, 75);
        assert_eq!(data.milestones.len(), 6);
        assert_eq!(data.next_goal_id, 1);
    }

    #[test]
    fn test_memory_store_keeps_updates() {
        let store = MemoryStore::new();
        let mut data: RecoveryData = load_or_default(&store);
        data.apply(RecoveryUpdate::AddMoneySaved(10));
        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap().map(|d| d.money_saved), Some(10));
    }
}
