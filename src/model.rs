use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub type ItemId = String;

pub const DEFAULT_GOAL_DAYS: u32 = 30;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiaryItem {
    pub id: ItemId,
    pub content: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub kind: ItemKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Task,
    Habit {
        frequency: HabitFrequency,
        /// Weekday of the anchor date when the habit was created.
        weekday_created: Weekday,
    },
    Goal(GoalProgress),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GoalProgress {
    pub duration_days: u32,
    pub days_completed: u32,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub reward: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Task,
    Goal,
    Habit,
}

/// Input for a new diary item. Fields that do not apply to `item_type` are
/// ignored.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_type: ItemType,
    pub content: String,
    pub date: NaiveDate,
    pub weekly: bool,
    pub duration_days: Option<u32>,
    pub target_date: Option<NaiveDate>,
    pub reward: Option<String>,
}

/// Partial update merged into an existing item.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub days_completed: Option<u32>,
    pub target_date: Option<NaiveDate>,
    pub reward: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("content cannot be empty")]
    EmptyContent,
    #[error("reward cannot be empty")]
    EmptyReward,
    #[error("goal duration must be at least one day")]
    ZeroDuration,
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("item {0} is not a goal")]
    NotAGoal(ItemId),
    #[error("goal {0} is already completed")]
    GoalAlreadyCompleted(ItemId),
    #[error("goal {0} completes through progress, not by toggling")]
    GoalCompletesThroughProgress(ItemId),
}

impl DiaryItem {
    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Task => ItemType::Task,
            ItemKind::Habit { .. } => ItemType::Habit,
            ItemKind::Goal(_) => ItemType::Goal,
        }
    }

    pub fn goal(&self) -> Option<&GoalProgress> {
        match &self.kind {
            ItemKind::Goal(goal) => Some(goal),
            _ => None,
        }
    }

    pub fn goal_mut(&mut self) -> Option<&mut GoalProgress> {
        match &mut self.kind {
            ItemKind::Goal(goal) => Some(goal),
            _ => None,
        }
    }

    /// Whether the item shows up on the day view for `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.kind {
            ItemKind::Task | ItemKind::Goal(_) => self.date == date,
            ItemKind::Habit {
                frequency,
                weekday_created,
            } => match frequency {
                HabitFrequency::Daily => true,
                HabitFrequency::Weekly => date.weekday() == *weekday_created,
            },
        }
    }
}

impl GoalProgress {
    pub fn new(duration_days: u32, target_date: NaiveDate) -> Self {
        GoalProgress {
            duration_days,
            days_completed: 0,
            target_date,
            reward: String::new(),
        }
    }

    /// Percentage in 0..=100, derived from completed days.
    pub fn percent(&self) -> f64 {
        if self.is_complete() {
            return 100.0;
        }
        (self.days_completed as f64 * self.percent_per_day()).min(100.0)
    }

    pub fn percent_per_day(&self) -> f64 {
        100.0 / self.duration_days.max(1) as f64
    }

    pub fn rounded_percent(&self) -> u32 {
        self.percent().round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.days_completed >= self.duration_days
    }

    pub fn has_reward(&self) -> bool {
        !self.reward.trim().is_empty()
    }
}

impl ItemType {
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Task => "Task",
            ItemType::Goal => "Goal",
            ItemType::Habit => "Habit",
        }
    }
}

impl HabitFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekly => "weekly",
        }
    }
}

impl NewItem {
    pub fn new(item_type: ItemType, content: impl Into<String>, date: NaiveDate) -> Self {
        NewItem {
            item_type,
            content: content.into(),
            date,
            weekly: false,
            duration_days: None,
            target_date: None,
            reward: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn goal_percent_is_clamped_and_complete_at_duration() {
        let mut goal = GoalProgress::new(3, date(2025, 1, 4));
        assert_eq!(goal.percent(), 0.0);
        goal.days_completed = 1;
        assert_eq!(goal.rounded_percent(), 33);
        goal.days_completed = 3;
        assert!(goal.is_complete());
        assert_eq!(goal.percent(), 100.0);
        goal.days_completed = 7;
        assert_eq!(goal.percent(), 100.0);
    }

    #[test]
    fn weekly_habit_matches_only_its_weekday() {
        let item = DiaryItem {
            id: "h".into(),
            content: "Swim".into(),
            date: date(2025, 1, 1),
            completed: false,
            kind: ItemKind::Habit {
                frequency: HabitFrequency::Weekly,
                weekday_created: Weekday::Wed,
            },
        };
        assert!(item.occurs_on(date(2025, 1, 8)));
        assert!(!item.occurs_on(date(2025, 1, 9)));
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let item = DiaryItem {
            id: "g1".into(),
            content: "Read".into(),
            date: date(2025, 3, 1),
            completed: false,
            kind: ItemKind::Goal(GoalProgress::new(30, date(2025, 3, 31))),
        };
        let yaml = serde_yaml::to_string(&item).unwrap();
        assert!(yaml.contains("type: goal"));
        let back: DiaryItem = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, item);
    }
}
