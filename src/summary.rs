use crate::directory::Directory;
use crate::model::{SkillLevel, TimeSlot, Weekday, Worker};
use crate::scheduler::{index_day, AssignError};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Vue d'ensemble des disponibles d'une date (avant affectation).
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilitySummary {
    pub work_date: NaiveDate,
    pub weekday: Option<Weekday>,
    /// Saisonniers ayant au moins une déclaration ce jour-là.
    pub workers: Vec<Worker>,
    pub leaders: usize,
    pub generals: usize,
    pub newcomers: usize,
    pub am_total: usize,
    pub pm_total: usize,
}

impl AvailabilitySummary {
    pub fn total(&self, slot: TimeSlot) -> usize {
        match slot {
            TimeSlot::Am => self.am_total,
            TimeSlot::Pm => self.pm_total,
        }
    }
}

pub fn availability_summary<D>(
    directory: &D,
    work_date: NaiveDate,
) -> Result<AvailabilitySummary, AssignError>
where
    D: Directory + ?Sized,
{
    let day = index_day(directory, work_date)?;
    let workers: Vec<Worker> = directory
        .workers()?
        .into_iter()
        .filter(|w| TimeSlot::ALL.iter().any(|&s| day.is_available(w.id, s)))
        .collect();
    let count = |level: SkillLevel| workers.iter().filter(|w| w.skill == level).count();

    Ok(AvailabilitySummary {
        work_date,
        weekday: day.weekday(),
        leaders: count(SkillLevel::Leader),
        generals: count(SkillLevel::General),
        newcomers: count(SkillLevel::Newcomer),
        am_total: day.count(TimeSlot::Am),
        pm_total: day.count(TimeSlot::Pm),
        workers,
    })
}

/// Date de travail proposée par défaut : le lendemain, sauf le samedi
/// (on saute le dimanche pour arriver au lundi).
pub fn default_work_date(today: NaiveDate) -> NaiveDate {
    let step = if today.weekday() == chrono::Weekday::Sat {
        2
    } else {
        1
    };
    today + Duration::days(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, FarmData, WorkerId};

    #[test]
    fn counts_each_worker_once() {
        let farm = FarmData {
            workers: vec![
                Worker::new(1, "Aki", SkillLevel::Leader),
                Worker::new(2, "Bo", SkillLevel::General),
                Worker::new(3, "Chie", SkillLevel::Newcomer),
            ],
            availability: vec![
                Availability::new(WorkerId::new(1), Weekday::Monday, TimeSlot::Am),
                Availability::new(WorkerId::new(1), Weekday::Monday, TimeSlot::Pm),
                Availability::new(WorkerId::new(2), Weekday::Monday, TimeSlot::Pm),
                Availability::new(WorkerId::new(3), Weekday::Friday, TimeSlot::Am),
            ],
            ..FarmData::default()
        };
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let summary = availability_summary(&farm, monday).unwrap();
        assert_eq!(summary.workers.len(), 2);
        assert_eq!((summary.leaders, summary.generals, summary.newcomers), (1, 1, 0));
        assert_eq!(summary.total(TimeSlot::Am), 1);
        assert_eq!(summary.total(TimeSlot::Pm), 2);
    }

    #[test]
    fn saturday_skips_to_monday() {
        let saturday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(
            default_work_date(saturday),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        let friday = NaiveDate::from_ymd_opt(2025, 5, 30).unwrap();
        assert_eq!(default_work_date(friday), saturday);
    }
}
