use crate::model::{
    DiaryItem, GoalProgress, HabitFrequency, ItemId, ItemKind, ItemType, ItemUpdate, NewItem,
    StoreError, DEFAULT_GOAL_DAYS,
};
use chrono::{Datelike, Duration, NaiveDate};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

const ID_LEN: usize = 8;

/// Every diary item of a session. All mutation goes through `add_item`,
/// `update_item` and the goal/toggle helpers built on the same lookup.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DiaryStore {
    items: Vec<DiaryItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RewardState {
    InProgress { remaining_percent: u32 },
    Complete,
}

/// A goal with a reward, as summarised on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardStatus {
    pub id: ItemId,
    pub content: String,
    pub state: RewardState,
    pub message: String,
}

impl DiaryStore {
    pub fn items(&self) -> &[DiaryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DiaryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn add_item(&mut self, input: NewItem) -> Result<&DiaryItem, StoreError> {
        let content = input.content.trim();
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let kind = match input.item_type {
            ItemType::Task => ItemKind::Task,
            ItemType::Habit => ItemKind::Habit {
                frequency: if input.weekly {
                    HabitFrequency::Weekly
                } else {
                    HabitFrequency::Daily
                },
                weekday_created: input.date.weekday(),
            },
            ItemType::Goal => {
                let duration = input.duration_days.unwrap_or(DEFAULT_GOAL_DAYS);
                if duration == 0 {
                    return Err(StoreError::ZeroDuration);
                }
                let target = input.target_date.unwrap_or_else(|| {
                    input
                        .date
                        .checked_add_signed(Duration::days(duration as i64))
                        .unwrap_or(input.date)
                });
                let mut goal = GoalProgress::new(duration, target);
                if let Some(reward) = input.reward.as_deref() {
                    goal.reward = reward.trim().to_string();
                }
                ItemKind::Goal(goal)
            }
        };
        let item = DiaryItem {
            id: self.generate_id(),
            content: content.to_string(),
            date: input.date,
            completed: false,
            kind,
        };
        log::debug!("adding {} {}", item.item_type().label(), item.id);
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Merges `update` into the item. Goal completion always follows the
    /// merged progress, so `completed` on a goal is recomputed.
    pub fn update_item(&mut self, id: &str, update: ItemUpdate) -> Result<&DiaryItem, StoreError> {
        let idx = self.position(id)?;
        let item = &mut self.items[idx];
        let content = match update.content.as_deref() {
            Some(c) if c.trim().is_empty() => return Err(StoreError::EmptyContent),
            Some(c) => Some(c.trim().to_string()),
            None => None,
        };
        let touches_goal = update.days_completed.is_some()
            || update.target_date.is_some()
            || update.reward.is_some();
        if touches_goal && item.goal().is_none() {
            return Err(StoreError::NotAGoal(id.to_string()));
        }

        if let Some(content) = content {
            item.content = content;
        }
        if let Some(date) = update.date {
            item.date = date;
        }
        if let Some(completed) = update.completed {
            item.completed = completed;
        }
        if let Some(goal) = item.goal_mut() {
            if let Some(days) = update.days_completed {
                goal.days_completed = days;
            }
            if let Some(target) = update.target_date {
                goal.target_date = target;
            }
            if let Some(reward) = update.reward {
                goal.reward = reward;
            }
            let complete = goal.is_complete();
            item.completed = complete;
        }
        log::debug!("updated item {}", id);
        Ok(&self.items[idx])
    }

    /// Marks one more day done on a goal.
    pub fn increment_goal_progress(&mut self, id: &str) -> Result<&DiaryItem, StoreError> {
        let idx = self.position(id)?;
        let goal = self.items[idx]
            .goal()
            .ok_or_else(|| StoreError::NotAGoal(id.to_string()))?;
        if goal.is_complete() {
            return Err(StoreError::GoalAlreadyCompleted(id.to_string()));
        }
        let days = goal.days_completed + 1;
        self.update_item(
            id,
            ItemUpdate {
                days_completed: Some(days),
                ..ItemUpdate::default()
            },
        )
    }

    /// Flips completion of a task or habit.
    pub fn toggle_completed(&mut self, id: &str) -> Result<&DiaryItem, StoreError> {
        let idx = self.position(id)?;
        let item = &self.items[idx];
        if let Some(goal) = item.goal() {
            if goal.is_complete() {
                return Err(StoreError::GoalAlreadyCompleted(id.to_string()));
            }
            return Err(StoreError::GoalCompletesThroughProgress(id.to_string()));
        }
        let completed = !item.completed;
        self.update_item(
            id,
            ItemUpdate {
                completed: Some(completed),
                ..ItemUpdate::default()
            },
        )
    }

    pub fn set_reward(&mut self, id: &str, reward: &str) -> Result<&DiaryItem, StoreError> {
        let reward = reward.trim();
        if reward.is_empty() {
            return Err(StoreError::EmptyReward);
        }
        self.update_item(
            id,
            ItemUpdate {
                reward: Some(reward.to_string()),
                ..ItemUpdate::default()
            },
        )
    }

    /// Tasks and goals anchored on `date`, plus habits recurring on it.
    pub fn items_for_date(&self, date: NaiveDate) -> Vec<&DiaryItem> {
        self.items.iter().filter(|i| i.occurs_on(date)).collect()
    }

    pub fn goals(&self) -> impl Iterator<Item = (&DiaryItem, &GoalProgress)> {
        self.items.iter().filter_map(|i| i.goal().map(|g| (i, g)))
    }

    pub fn active_goals(&self) -> Vec<&DiaryItem> {
        self.goals()
            .filter(|(_, g)| !g.is_complete())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn completed_goals(&self) -> Vec<&DiaryItem> {
        self.goals()
            .filter(|(_, g)| g.is_complete())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn reward_summaries(&self) -> Vec<RewardStatus> {
        self.goals()
            .filter(|(_, g)| g.has_reward())
            .map(|(item, goal)| {
                let (state, message) = if goal.is_complete() {
                    (
                        RewardState::Complete,
                        format!("Congratulations! You can now enjoy: {}!", goal.reward),
                    )
                } else {
                    // an unfinished goal never reads as 0% left
                    let remaining = 100u32.saturating_sub(goal.rounded_percent()).max(1);
                    (
                        RewardState::InProgress {
                            remaining_percent: remaining,
                        },
                        format!("{}% left to earn: {}", remaining, goal.reward),
                    )
                };
                RewardStatus {
                    id: item.id.clone(),
                    content: item.content.clone(),
                    state,
                    message,
                }
            })
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))
    }

    fn generate_id(&self) -> ItemId {
        loop {
            let id: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(ID_LEN)
                .map(char::from)
                .collect();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
