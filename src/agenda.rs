use crate::holidays::Holiday;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type AppointmentId = i64;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentKind {
    Holiday,
    Personal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub description: String,
    pub kind: AppointmentKind,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AgendaError {
    #[error("appointment description cannot be empty")]
    EmptyDescription,
    #[error("appointment {0} is a public holiday and cannot be removed")]
    HolidayNotDeletable(AppointmentId),
    #[error("appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),
}

/// Month-screen appointments: fetched holidays (read-only, never saved) and
/// personal entries. Holidays carry negative ids, personal entries positive.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Agenda {
    #[serde(skip)]
    holidays: Vec<Appointment>,
    personal: Vec<Appointment>,
    next_id: AppointmentId,
}

impl Default for Agenda {
    fn default() -> Self {
        Agenda {
            holidays: Vec::new(),
            personal: Vec::new(),
            next_id: 1,
        }
    }
}

impl Agenda {
    pub fn set_holidays(&mut self, holidays: Vec<Holiday>) {
        self.holidays = holidays
            .into_iter()
            .enumerate()
            .map(|(idx, h)| Appointment {
                id: -(idx as AppointmentId + 1),
                date: h.date,
                description: h.name,
                kind: AppointmentKind::Holiday,
            })
            .collect();
    }

    pub fn add_appointment(
        &mut self,
        date: NaiveDate,
        description: &str,
    ) -> Result<&Appointment, AgendaError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AgendaError::EmptyDescription);
        }
        // a diary saved without `next_id` still holds its personal ids
        let id = self
            .personal
            .iter()
            .map(|a| a.id + 1)
            .fold(self.next_id, AppointmentId::max);
        self.next_id = id + 1;
        self.personal.push(Appointment {
            id,
            date,
            description: description.to_string(),
            kind: AppointmentKind::Personal,
        });
        self.personal.sort_by_key(|a| (a.date, a.id));
        log::debug!("added appointment {} on {}", id, date);
        self.personal
            .iter()
            .find(|a| a.id == id)
            .ok_or(AgendaError::AppointmentNotFound(id))
    }

    /// Removes a personal appointment. Holidays, and any negative id whether or
    /// not holidays are loaded, are refused and left in place.
    pub fn delete_appointment(&mut self, id: AppointmentId) -> Result<Appointment, AgendaError> {
        if id < 0 || self.holidays.iter().any(|h| h.id == id) {
            return Err(AgendaError::HolidayNotDeletable(id));
        }
        let idx = self
            .personal
            .iter()
            .position(|a| a.id == id)
            .ok_or(AgendaError::AppointmentNotFound(id))?;
        log::debug!("deleted appointment {}", id);
        Ok(self.personal.remove(idx))
    }

    /// Holidays and personal entries ordered by date, then id.
    pub fn appointments(&self) -> Vec<&Appointment> {
        let mut all: Vec<&Appointment> = self.holidays.iter().chain(self.personal.iter()).collect();
        all.sort_by_key(|a| (a.date, a.id));
        all
    }

    pub fn for_month(&self, year: i32, month_index: u32) -> Vec<&Appointment> {
        self.appointments()
            .into_iter()
            .filter(|a| a.date.year() == year && a.date.month0() == month_index)
            .collect()
    }

    pub fn has_appointment_on(&self, date: NaiveDate) -> bool {
        self.holidays
            .iter()
            .chain(self.personal.iter())
            .any(|a| a.date == date)
    }

    pub fn personal(&self) -> &[Appointment] {
        &self.personal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn agenda_with_holidays() -> Agenda {
        let mut agenda = Agenda::default();
        agenda.set_holidays(vec![
            Holiday {
                date: date(2025, 1, 1),
                name: "New Year".into(),
            },
            Holiday {
                date: date(2025, 4, 21),
                name: "Tiradentes".into(),
            },
        ]);
        agenda
    }

    #[test]
    fn holidays_get_negative_ids() {
        let agenda = agenda_with_holidays();
        let ids: Vec<_> = agenda.appointments().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![-1, -2]);
        assert!(agenda
            .appointments()
            .iter()
            .all(|a| a.kind == AppointmentKind::Holiday));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut agenda = Agenda::default();
        assert_eq!(
            agenda.add_appointment(date(2025, 1, 2), "  ").unwrap_err(),
            AgendaError::EmptyDescription
        );
        assert!(agenda.appointments().is_empty());
    }

    #[test]
    fn merged_list_sorts_by_date_then_id() {
        let mut agenda = agenda_with_holidays();
        let late = agenda.add_appointment(date(2025, 4, 21), "Dinner").unwrap().id;
        let early = agenda.add_appointment(date(2025, 1, 1), "Brunch").unwrap().id;
        let order: Vec<_> = agenda.appointments().iter().map(|a| a.id).collect();
        assert_eq!(order, vec![-1, early, -2, late]);
    }

    #[test]
    fn delete_removes_only_that_personal_entry() {
        let mut agenda = agenda_with_holidays();
        let keep = agenda.add_appointment(date(2025, 2, 3), "Gym").unwrap().id;
        let gone = agenda.add_appointment(date(2025, 2, 4), "Vet").unwrap().id;

        let removed = agenda.delete_appointment(gone).unwrap();
        assert_eq!(removed.description, "Vet");
        let ids: Vec<_> = agenda.appointments().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![-1, keep, -2]);

        assert_eq!(
            agenda.delete_appointment(gone).unwrap_err(),
            AgendaError::AppointmentNotFound(gone)
        );
    }

    #[test]
    fn holidays_cannot_be_deleted() {
        let mut agenda = agenda_with_holidays();
        let before: Vec<Appointment> = agenda.appointments().into_iter().cloned().collect();
        assert_eq!(
            agenda.delete_appointment(-2).unwrap_err(),
            AgendaError::HolidayNotDeletable(-2)
        );
        let after: Vec<Appointment> = agenda.appointments().into_iter().cloned().collect();
        assert_eq!(before, after);

        let mut offline = Agenda::default();
        assert_eq!(
            offline.delete_appointment(-1).unwrap_err(),
            AgendaError::HolidayNotDeletable(-1)
        );
    }

    #[test]
    fn month_filter_and_day_lookup() {
        let mut agenda = agenda_with_holidays();
        agenda.add_appointment(date(2025, 4, 2), "Taxes").unwrap();
        agenda.add_appointment(date(2026, 4, 2), "Taxes again").unwrap();

        let april: Vec<_> = agenda
            .for_month(2025, 3)
            .into_iter()
            .map(|a| a.description.as_str())
            .collect();
        assert_eq!(april, vec!["Taxes", "Tiradentes"]);
        assert!(agenda.for_month(2025, 5).is_empty());
        assert!(agenda.has_appointment_on(date(2025, 1, 1)));
        assert!(!agenda.has_appointment_on(date(2025, 1, 2)));
    }

    #[test]
    fn ids_keep_increasing_after_deletes() {
        let mut agenda = Agenda::default();
        let first = agenda.add_appointment(date(2025, 5, 1), "A").unwrap().id;
        agenda.delete_appointment(first).unwrap();
        let second = agenda.add_appointment(date(2025, 5, 1), "B").unwrap().id;
        assert!(second > first);
        assert!(first > 0);
    }

    #[test]
    fn ids_continue_past_saved_entries_without_counter() {
        let yaml = "personal:\n  - id: 1\n    date: 2025-03-01\n    description: Dentist\n    kind: personal\n  - id: 4\n    date: 2025-03-02\n    description: Haircut\n    kind: personal\n";
        let mut agenda: Agenda = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(agenda.personal().len(), 2);

        let fresh = agenda.add_appointment(date(2025, 3, 3), "Lunch").unwrap().id;
        assert_eq!(fresh, 5);
        let next = agenda.add_appointment(date(2025, 3, 4), "Movie").unwrap().id;
        assert_eq!(next, 6);

        let ids: HashSet<_> = agenda.personal().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 4);
    }
}
