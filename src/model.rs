use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Identifiant fort d'un saisonnier
    WorkerId
);
numeric_id!(
    /// Identifiant fort d'un poste de travail (serre, station de tri...)
    WorkplaceId
);
numeric_id!(
    /// Identifiant fort d'une tâche
    TaskId
);

/// Identifiant d'une ligne de planning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Niveau de compétence d'un saisonnier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkillLevel {
    Leader,
    General,
    Newcomer,
}

impl SkillLevel {
    pub fn is_leader(self) -> bool {
        self == SkillLevel::Leader
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Leader => "LEADER",
            SkillLevel::General => "GENERAL",
            SkillLevel::Newcomer => "NEWCOMER",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEADER" => Ok(SkillLevel::Leader),
            "GENERAL" => Ok(SkillLevel::General),
            "NEWCOMER" => Ok(SkillLevel::Newcomer),
            other => Err(format!("unknown skill level: {other}")),
        }
    }
}

/// Jour ouvré pour lequel on peut déclarer une disponibilité (pas de dimanche).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// `None` pour un dimanche.
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri => Some(Weekday::Friday),
            chrono::Weekday::Sat => Some(Weekday::Saturday),
            chrono::Weekday::Sun => None,
        }
    }

    pub fn of_date(date: NaiveDate) -> Option<Self> {
        Self::from_chrono(date.weekday())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str() == upper || d.as_str()[..3] == upper)
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

/// Demi-journée de travail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeSlot {
    Am,
    Pm,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 2] = [TimeSlot::Am, TimeSlot::Pm];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Am => "AM",
            TimeSlot::Pm => "PM",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(TimeSlot::Am),
            "PM" => Ok(TimeSlot::Pm),
            other => Err(format!("unknown time slot: {other}")),
        }
    }
}

/// Saisonnier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub skill: SkillLevel,
}

impl Worker {
    pub fn new<N: Into<String>>(id: u64, name: N, skill: SkillLevel) -> Self {
        Self {
            id: WorkerId::new(id),
            name: name.into(),
            skill,
        }
    }
}

/// Déclaration de disponibilité (un saisonnier, un jour, une demi-journée).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Availability {
    pub worker: WorkerId,
    pub weekday: Weekday,
    pub slot: TimeSlot,
}

impl Availability {
    pub fn new(worker: WorkerId, weekday: Weekday, slot: TimeSlot) -> Self {
        Self {
            worker,
            weekday,
            slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workplace {
    pub id: WorkplaceId,
    pub name: String,
}

impl Workplace {
    pub fn new<N: Into<String>>(id: u64, name: N) -> Self {
        Self {
            id: WorkplaceId::new(id),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

impl Task {
    pub fn new<N: Into<String>>(id: u64, name: N) -> Self {
        Self {
            id: TaskId::new(id),
            name: name.into(),
        }
    }
}

/// Besoin d'un poste pour une demi-journée : effectif demandé et tâches éventuelles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRequirement {
    pub workplace: WorkplaceId,
    pub slot: TimeSlot,
    pub headcount: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskId>,
}

impl StaffingRequirement {
    pub fn new(workplace: WorkplaceId, slot: TimeSlot, headcount: u32) -> Self {
        Self {
            workplace,
            slot,
            headcount,
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks<I: IntoIterator<Item = TaskId>>(mut self, tasks: I) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }
}

/// Ligne de planning : un saisonnier, une tâche, un poste, une demi-journée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Identifiant technique, tiré au hasard à chaque exécution : il ne fait
    /// pas partie de l'affectation, comparer deux plannings via `assignment`.
    pub id: RowId,
    pub work_date: NaiveDate,
    pub workplace: WorkplaceId,
    pub slot: TimeSlot,
    pub task: TaskId,
    pub worker: WorkerId,
    pub required_count: u32,
}

impl RosterRow {
    /// Contenu de la ligne hors identifiant.
    pub fn assignment(&self) -> (NaiveDate, WorkplaceId, TimeSlot, TaskId, WorkerId, u32) {
        (
            self.work_date,
            self.workplace,
            self.slot,
            self.task,
            self.worker,
            self.required_count,
        )
    }
}

/// Données complètes de l'exploitation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FarmData {
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub availability: Vec<Availability>,
    #[serde(default)]
    pub workplaces: Vec<Workplace>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub roster: Vec<RosterRow>,
}

impl FarmData {
    pub fn find_worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }
    pub fn find_workplace(&self, id: WorkplaceId) -> Option<&Workplace> {
        self.workplaces.iter().find(|w| w.id == id)
    }
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ajoute ou remplace un saisonnier (même id).
    pub fn upsert_worker(&mut self, worker: Worker) {
        match self.workers.iter_mut().find(|w| w.id == worker.id) {
            Some(slot) => *slot = worker,
            None => self.workers.push(worker),
        }
    }

    pub fn upsert_workplace(&mut self, workplace: Workplace) {
        match self.workplaces.iter_mut().find(|w| w.id == workplace.id) {
            Some(slot) => *slot = workplace,
            None => self.workplaces.push(workplace),
        }
    }

    pub fn upsert_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_has_no_weekday() {
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(Weekday::of_date(sunday), None);
        let saturday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(Weekday::of_date(saturday), Some(Weekday::Saturday));
    }

    #[test]
    fn weekday_parses_short_and_long_forms() {
        assert_eq!("mon".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Saturday".parse::<Weekday>().unwrap(), Weekday::Saturday);
        assert!("sun".parse::<Weekday>().is_err());
    }

    #[test]
    fn enums_serialize_uppercase() {
        let json = serde_json::to_string(&Availability::new(
            WorkerId::new(3),
            Weekday::Tuesday,
            TimeSlot::Pm,
        ))
        .unwrap();
        assert_eq!(json, r#"{"worker":3,"weekday":"TUESDAY","slot":"PM"}"#);
    }
}
