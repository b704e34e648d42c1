use crate::agenda::AppointmentKind;
use crate::calendar::{
    generate_calendar, month_grid, weeks_for_month, CalendarMonth, WEEKDAY_LABELS,
};
use crate::cli::Kind;
use crate::config::Config;
use crate::holidays::{load_holidays, HttpHolidaySource};
use crate::model::{DiaryItem, ItemKind, ItemType, NewItem};
use crate::storage::{
    init_project_diary, load_diary, locate_diary, save_diary, Diary, DiaryLocation, DiaryScope,
};
use crate::store::RewardState;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::env;

pub fn init() -> Result<()> {
    let location = init_project_diary()?;
    println!("Initialized diary at {}", location.path.display());
    Ok(())
}

pub fn calendar(year: Option<i32>, month: Option<u32>) -> Result<()> {
    let (diary, _) = load_current_diary()?;
    let has_items = |d: NaiveDate| !diary.items.items_for_date(d).is_empty();
    if let (Some(year), None) = (year, month) {
        let months = generate_calendar(year);
        if months.is_empty() {
            bail!("year out of range: {}", year);
        }
        for grid in months {
            for line in render_month(&grid, has_items) {
                println!("{}", line);
            }
            println!();
        }
        return Ok(());
    }
    let grid = resolve_month(year, month)?;
    for line in render_month(&grid, has_items) {
        println!("{}", line);
    }
    Ok(())
}

pub fn day(date: Option<String>) -> Result<()> {
    let (diary, _) = load_current_diary()?;
    let date = parse_date(date.as_deref())?.unwrap_or_else(today);
    println!("{}", date.format("%A, %d %B %Y"));
    let items = diary.items.items_for_date(date);
    if items.is_empty() {
        println!("  No items for this day.");
    }
    for item in items {
        print_item(item);
    }
    Ok(())
}

pub fn add(
    kind: Kind,
    content: String,
    date: Option<String>,
    weekly: bool,
    days: Option<u32>,
    target: Option<String>,
    reward: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let (mut diary, location) = load_current_diary()?;
    let item_type = match kind {
        Kind::Task => ItemType::Task,
        Kind::Goal => ItemType::Goal,
        Kind::Habit => ItemType::Habit,
    };
    let mut input = NewItem::new(
        item_type,
        content,
        parse_date(date.as_deref())?.unwrap_or_else(today),
    );
    input.weekly = weekly;
    input.duration_days = Some(days.unwrap_or(config.default_goal_days));
    input.target_date = parse_date(target.as_deref())?;
    input.reward = reward;
    let item = diary
        .items
        .add_item(input)
        .with_context(|| format!("adding {}", item_type.label().to_lowercase()))?;
    println!("Added {} {} on {}", item_type.label().to_lowercase(), item.id, item.date);
    save_diary(&location, &diary)?;
    Ok(())
}

pub fn toggle(id: String) -> Result<()> {
    let (mut diary, location) = load_current_diary()?;
    let item = diary
        .items
        .toggle_completed(&id)
        .with_context(|| format!("toggling {}", id))?;
    println!(
        "{} {} marked {}",
        item.item_type().label(),
        item.id,
        if item.completed { "done" } else { "not done" }
    );
    save_diary(&location, &diary)?;
    Ok(())
}

pub fn progress(id: String) -> Result<()> {
    let (mut diary, location) = load_current_diary()?;
    let item = diary
        .items
        .increment_goal_progress(&id)
        .with_context(|| format!("recording progress on {}", id))?;
    if let Some(goal) = item.goal() {
        if item.completed {
            println!("Congratulations! Goal \"{}\" completed!", item.content);
        } else {
            println!(
                "{}: {}/{} days ({}%)",
                item.content,
                goal.days_completed,
                goal.duration_days,
                goal.rounded_percent()
            );
        }
    }
    save_diary(&location, &diary)?;
    Ok(())
}

pub fn reward(id: String, reward: String) -> Result<()> {
    let (mut diary, location) = load_current_diary()?;
    let item = diary
        .items
        .set_reward(&id, &reward)
        .with_context(|| format!("setting reward on {}", id))?;
    println!("Reward for \"{}\" saved", item.content);
    save_diary(&location, &diary)?;
    Ok(())
}

pub fn goals() -> Result<()> {
    let (diary, _) = load_current_diary()?;
    let active = diary.items.active_goals();
    let completed = diary.items.completed_goals();
    println!("Active goals");
    if active.is_empty() {
        println!("  (none)");
    }
    for item in active {
        print_item(item);
    }
    if !completed.is_empty() {
        println!();
        println!("Completed goals");
        for item in completed {
            print_item(item);
        }
    }
    Ok(())
}

pub fn home() -> Result<()> {
    let (diary, location) = load_current_diary()?;
    println!(
        "Diary ({}): {} items, {} done, {} appointments",
        match location.scope {
            DiaryScope::Project => "project",
            DiaryScope::Global => "global",
        },
        diary.items.len(),
        diary.items.items().iter().filter(|i| i.completed).count(),
        diary.agenda.personal().len()
    );
    if diary.items.is_empty() {
        println!("Nothing here yet. Try `domeer add task \"...\"`.");
        return Ok(());
    }
    println!("Track your rewards!");
    let summaries = diary.items.reward_summaries();
    if summaries.is_empty() {
        println!("  Add a goal with a reward to start tracking!");
    }
    for status in summaries {
        let marker = match status.state {
            RewardState::Complete => "[done]".to_string(),
            RewardState::InProgress { remaining_percent } => {
                format!("[{:>3}%]", 100 - remaining_percent)
            }
        };
        println!(
            "  {} {} {}: {}",
            marker, status.id, status.content, status.message
        );
    }
    Ok(())
}

pub fn month(year: Option<i32>, month: Option<u32>, offline: bool) -> Result<()> {
    let config = Config::load()?;
    let (mut diary, _) = load_current_diary()?;
    let grid = resolve_month(year, month)?;
    if config.fetch_holidays && !offline {
        match HttpHolidaySource::new(&config.holiday_api_url, &config.holiday_country) {
            Ok(source) => diary.agenda.set_holidays(load_holidays(&source, grid.year)),
            Err(err) => log::warn!("holiday lookup unavailable: {}", err),
        }
    }
    for line in render_month(&grid, |d| diary.agenda.has_appointment_on(d)) {
        println!("{}", line);
    }
    println!();
    let appointments = diary.agenda.for_month(grid.year, grid.month_index);
    if appointments.is_empty() {
        println!("No appointments scheduled for {}.", grid.name);
    }
    for appt in appointments {
        let tag = match appt.kind {
            AppointmentKind::Holiday => " (holiday)",
            AppointmentKind::Personal => "",
        };
        println!(
            "  {:>4}  {}  {}{}",
            appt.id,
            appt.date.format("%d/%m"),
            appt.description,
            tag
        );
    }
    Ok(())
}

pub fn appoint(date: String, description: String) -> Result<()> {
    let (mut diary, location) = load_current_diary()?;
    let date = parse_date(Some(date.as_str()))?.ok_or_else(|| anyhow!("a date is required"))?;
    let appt = diary
        .agenda
        .add_appointment(date, &description)
        .with_context(|| format!("scheduling on {}", date))?;
    println!("Scheduled {} on {}", appt.id, appt.date.format("%d/%m/%Y"));
    save_diary(&location, &diary)?;
    Ok(())
}

pub fn unappoint(id: i64) -> Result<()> {
    let (mut diary, location) = load_current_diary()?;
    let removed = diary
        .agenda
        .delete_appointment(id)
        .with_context(|| format!("removing appointment {}", id))?;
    println!("Removed \"{}\" from {}", removed.description, removed.date);
    save_diary(&location, &diary)?;
    Ok(())
}

fn load_current_diary() -> Result<(Diary, DiaryLocation)> {
    let cwd = env::current_dir()?;
    let location = locate_diary(&cwd)?;
    let diary = load_diary(&location)?;
    Ok((diary, location))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_month(year: Option<i32>, month: Option<u32>) -> Result<CalendarMonth> {
    let now = today();
    let year = year.unwrap_or_else(|| now.year());
    let month = month.unwrap_or_else(|| now.month());
    if !(1..=12).contains(&month) {
        return Err(anyhow!("month must be between 1 and 12: {}", month));
    }
    month_grid(year, month - 1).ok_or_else(|| anyhow!("year out of range: {}", year))
}

fn parse_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    let raw = match input {
        Some(r) => r.trim(),
        None => return Ok(None),
    };
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format (use YYYY-MM-DD): {}", raw))?;
    Ok(Some(date))
}

/// Text rendering of a month grid. Days from adjacent months are bracketed
/// and `marked` days carry a `*`.
fn render_month<F>(month: &CalendarMonth, marked: F) -> Vec<String>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut lines = vec![format!("{} {}", month.name, month.year)];
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|h| format!("{:>5}", h))
            .collect::<String>(),
    );
    for week in weeks_for_month(month) {
        let line: String = week
            .iter()
            .map(|day| {
                let mark = if marked(day.date) { "*" } else { " " };
                if day.is_current_month {
                    format!("{:>4}{}", day.day_of_month, mark)
                } else {
                    format!("{:>4}{}", format!("({})", day.day_of_month), mark)
                }
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn print_item(item: &DiaryItem) {
    let check = if item.completed { "x" } else { " " };
    println!(
        "  [{}] {} {}: {}",
        check,
        item.id,
        item.item_type().label(),
        item.content
    );
    match &item.kind {
        ItemKind::Task => {}
        ItemKind::Habit { frequency, .. } => println!("      frequency: {}", frequency.label()),
        ItemKind::Goal(goal) => {
            println!(
                "      {}/{} days | progress: {}% | +{}% per day | target: {}",
                goal.days_completed,
                goal.duration_days,
                goal.rounded_percent(),
                goal.percent_per_day().round(),
                goal.target_date
            );
            if goal.has_reward() {
                println!("      reward: {}", goal.reward);
            }
        }
    }
}
