use super::AssignError;
use crate::directory::AvailabilityStore;
use crate::model::{TimeSlot, Weekday, WorkerId};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Saisonniers disponibles pour une date, par demi-journée.
#[derive(Debug, Clone, Default)]
pub struct DayAvailability {
    weekday: Option<Weekday>,
    am: HashSet<WorkerId>,
    pm: HashSet<WorkerId>,
}

impl DayAvailability {
    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    pub fn workers(&self, slot: TimeSlot) -> &HashSet<WorkerId> {
        match slot {
            TimeSlot::Am => &self.am,
            TimeSlot::Pm => &self.pm,
        }
    }

    /// Nombre de saisonniers distincts pour la demi-journée.
    pub fn count(&self, slot: TimeSlot) -> usize {
        self.workers(slot).len()
    }

    pub fn is_available(&self, worker: WorkerId, slot: TimeSlot) -> bool {
        self.workers(slot).contains(&worker)
    }
}

/// Construit l'index des disponibilités du jour de `date`.
///
/// Un dimanche n'a pas de catégorie : l'index est vide et la validation de
/// capacité signalera zéro disponible.
pub fn index_day<A>(store: &A, date: NaiveDate) -> Result<DayAvailability, AssignError>
where
    A: AvailabilityStore + ?Sized,
{
    let Some(weekday) = Weekday::of_date(date) else {
        let err = AssignError::InvalidWeekday(date);
        warn!(%date, %err, "no availability category, treating as zero availability");
        return Ok(DayAvailability::default());
    };

    let mut day = DayAvailability {
        weekday: Some(weekday),
        ..DayAvailability::default()
    };
    for decl in store.declarations_for(weekday)? {
        if decl.weekday != weekday {
            continue;
        }
        match decl.slot {
            TimeSlot::Am => day.am.insert(decl.worker),
            TimeSlot::Pm => day.pm.insert(decl.worker),
        };
    }
    debug!(%date, %weekday, am = day.am.len(), pm = day.pm.len(), "availability indexed");
    Ok(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, FarmData};

    fn farm() -> FarmData {
        let w1 = WorkerId::new(1);
        let w2 = WorkerId::new(2);
        FarmData {
            availability: vec![
                Availability::new(w1, Weekday::Monday, TimeSlot::Am),
                Availability::new(w1, Weekday::Monday, TimeSlot::Am),
                Availability::new(w2, Weekday::Monday, TimeSlot::Am),
                Availability::new(w2, Weekday::Monday, TimeSlot::Pm),
                Availability::new(w1, Weekday::Tuesday, TimeSlot::Pm),
            ],
            ..FarmData::default()
        }
    }

    #[test]
    fn duplicates_count_once() {
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let day = index_day(&farm(), monday).unwrap();
        assert_eq!(day.weekday(), Some(Weekday::Monday));
        assert_eq!(day.count(TimeSlot::Am), 2);
        assert_eq!(day.count(TimeSlot::Pm), 1);
        assert!(day.is_available(WorkerId::new(2), TimeSlot::Pm));
        assert!(!day.is_available(WorkerId::new(1), TimeSlot::Pm));
    }

    #[test]
    fn sunday_yields_empty_index() {
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let day = index_day(&farm(), sunday).unwrap();
        assert_eq!(day.weekday(), None);
        assert_eq!(day.count(TimeSlot::Am), 0);
        assert_eq!(day.count(TimeSlot::Pm), 0);
    }
}
