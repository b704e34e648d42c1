use chrono::{Datelike, Duration, Month, NaiveDate};

/// Number of cells in a month grid: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// 0 = Sunday
    pub day_of_week: u32,
    pub is_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub name: String,
    pub year: i32,
    /// 0 = January
    pub month_index: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarDay {
    fn new(date: NaiveDate, is_current_month: bool) -> Self {
        CalendarDay {
            date,
            day_of_month: date.day(),
            day_of_week: date.weekday().num_days_from_sunday(),
            is_current_month,
        }
    }
}

/// Builds the twelve month grids of `year`. Years chrono cannot represent
/// yield an empty list.
pub fn generate_calendar(year: i32) -> Vec<CalendarMonth> {
    (0..12).filter_map(|m| month_grid(year, m)).collect()
}

/// Builds one month grid: leading days from the previous month back to the
/// Sunday before day 1, the month itself, then the following month until the
/// grid holds 42 cells.
pub fn month_grid(year: i32, month_index: u32) -> Option<CalendarMonth> {
    if month_index > 11 {
        return None;
    }
    let month = month_index + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let in_month = leading..leading + days_in_month(year, month) as usize;
    let grid_start = first.checked_sub_signed(Duration::days(leading as i64))?;
    let days: Vec<CalendarDay> = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .enumerate()
        .map(|(idx, date)| CalendarDay::new(date, in_month.contains(&idx)))
        .collect();
    if days.len() != GRID_CELLS {
        return None;
    }
    let name = Month::try_from(month as u8)
        .map(|m| m.name().to_string())
        .ok()?;
    Some(CalendarMonth {
        name,
        year,
        month_index,
        days,
    })
}

/// Splits a month grid into its six weeks.
pub fn weeks_for_month(month: &CalendarMonth) -> Vec<&[CalendarDay]> {
    month.days.chunks(7).collect()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn current_days(month: &CalendarMonth) -> usize {
        month.days.iter().filter(|d| d.is_current_month).count()
    }

    #[test]
    fn every_month_has_forty_two_cells() {
        for year in [1900, 1999, 2000, 2023, 2024, 2025, 2100] {
            let months = generate_calendar(year);
            assert_eq!(months.len(), 12);
            for month in &months {
                assert_eq!(month.days.len(), GRID_CELLS, "{} {}", month.name, year);
            }
        }
    }

    #[test]
    fn current_month_cells_match_month_length() {
        for year in [2023, 2024, 2025, 2100] {
            for month in generate_calendar(year) {
                let expected = days_in_month(year, month.month_index + 1);
                assert_eq!(current_days(&month) as u32, expected);
            }
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn grid_starts_on_sunday_and_is_contiguous() {
        for month in generate_calendar(2025) {
            assert_eq!(month.days[0].day_of_week, 0);
            for pair in month.days.windows(2) {
                assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
        }
    }

    #[test]
    fn january_2025_padding() {
        let jan = &generate_calendar(2025)[0];
        assert_eq!(jan.name, "January");
        assert_eq!(jan.month_index, 0);

        let leading: Vec<_> = jan.days.iter().take_while(|d| !d.is_current_month).collect();
        assert_eq!(leading.len(), 3);
        assert_eq!(leading[0].date, date(2024, 12, 29));
        assert_eq!(leading[2].date, date(2024, 12, 31));

        assert_eq!(current_days(jan), 31);
        assert_eq!(jan.days[3].date, date(2025, 1, 1));
        assert_eq!(jan.days[3].day_of_week, 3);

        let trailing: Vec<_> = jan.days[34..].iter().collect();
        assert_eq!(trailing.len(), 8);
        assert!(trailing.iter().all(|d| !d.is_current_month));
        assert_eq!(trailing[0].date, date(2025, 2, 1));
        assert_eq!(trailing[7].date, date(2025, 2, 8));
    }

    #[test]
    fn sunday_start_has_no_leading_padding() {
        // June 2025 begins on a Sunday.
        let june = month_grid(2025, 5).unwrap();
        assert!(june.days[0].is_current_month);
        assert_eq!(june.days[0].day_of_month, 1);
        assert_eq!(june.days[41].date, date(2025, 7, 12));
    }

    #[test]
    fn december_pads_into_next_year() {
        let dec = month_grid(2025, 11).unwrap();
        let last = dec.days.last().unwrap();
        assert_eq!(last.date.year(), 2026);
        assert!(!last.is_current_month);
    }

    #[test]
    fn weeks_are_six_chunks_of_seven() {
        let month = month_grid(2024, 1).unwrap();
        let weeks = weeks_for_month(&month);
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
        let flat: Vec<CalendarDay> = weeks.concat();
        assert_eq!(flat, month.days);
    }

    #[test]
    fn out_of_range_input_yields_nothing() {
        assert!(month_grid(2025, 12).is_none());
        assert!(generate_calendar(i32::MAX).is_empty());
    }
}
