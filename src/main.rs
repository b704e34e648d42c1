mod agenda;
mod calendar;
mod cli;
mod commands;
mod config;
mod holidays;
mod model;
mod storage;
mod store;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Day { date: None });
    match command {
        cli::Command::Init => commands::init(),
        cli::Command::Calendar { year, month } => commands::calendar(year, month),
        cli::Command::Day { date } => commands::day(date),
        cli::Command::Add {
            kind,
            content,
            date,
            weekly,
            days,
            target,
            reward,
        } => commands::add(kind, content, date, weekly, days, target, reward),
        cli::Command::Toggle { id } => commands::toggle(id),
        cli::Command::Progress { id } => commands::progress(id),
        cli::Command::Reward { id, reward } => commands::reward(id, reward),
        cli::Command::Goals => commands::goals(),
        cli::Command::Home => commands::home(),
        cli::Command::Month {
            year,
            month,
            offline,
        } => commands::month(year, month, offline),
        cli::Command::Appoint { date, description } => commands::appoint(date, description),
        cli::Command::Unappoint { id } => commands::unappoint(id),
    }
}
