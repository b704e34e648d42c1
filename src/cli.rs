use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "domeer", version, about = "Habit, task and goal diary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Task,
    Goal,
    Habit,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a project diary in the current directory
    Init,
    /// Show the month grid (defaults to the current month)
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        /// Month number, 1-12
        #[arg(long)]
        month: Option<u32>,
    },
    /// List the items due on a day (defaults to today)
    Day {
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a task, goal or habit
    Add {
        kind: Kind,
        /// Description of the item
        content: String,
        /// Anchor date in YYYY-MM-DD format (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Habit repeats weekly on the anchor date's weekday instead of daily
        #[arg(long)]
        weekly: bool,
        /// Goal duration in days
        #[arg(long)]
        days: Option<u32>,
        /// Goal target date in YYYY-MM-DD format
        #[arg(long)]
        target: Option<String>,
        /// Goal reward
        #[arg(long)]
        reward: Option<String>,
    },
    /// Toggle completion of a task or habit
    Toggle { id: String },
    /// Mark one more day done on a goal
    Progress { id: String },
    /// Set the reward of a goal
    Reward { id: String, reward: String },
    /// List active and completed goals
    Goals,
    /// Summarise goals that carry a reward
    Home,
    /// Show a month with its holidays and appointments
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// Month number, 1-12
        #[arg(long)]
        month: Option<u32>,
        /// Skip the public holiday lookup
        #[arg(long)]
        offline: bool,
    },
    /// Add a personal appointment
    Appoint {
        /// Date in YYYY-MM-DD format
        date: String,
        description: String,
    },
    /// Remove a personal appointment
    Unappoint {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}
