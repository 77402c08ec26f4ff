//! Collaborateurs consultés par le moteur d'affectation.
//!
//! Le moteur ne lit que via ces traits ; `FarmData` les implémente en mémoire
//! (fichier JSON chargé par `storage`).

use crate::model::{
    Availability, FarmData, RosterRow, Task, TaskId, Weekday, Worker, Workplace,
};
use chrono::NaiveDate;

pub trait WorkerDirectory {
    /// Tous les saisonniers, dans l'ordre de l'annuaire.
    fn workers(&self) -> anyhow::Result<Vec<Worker>>;
}

pub trait AvailabilityStore {
    /// Déclarations de disponibilité pour un jour donné.
    fn declarations_for(&self, weekday: Weekday) -> anyhow::Result<Vec<Availability>>;
}

pub trait WorkplaceDirectory {
    fn workplaces(&self) -> anyhow::Result<Vec<Workplace>>;
}

pub trait TaskDirectory {
    fn task_by_id(&self, id: TaskId) -> anyhow::Result<Option<Task>>;
    fn task_by_name(&self, name: &str) -> anyhow::Result<Option<Task>>;
}

/// Destination du planning calculé.
pub trait RosterStore {
    /// Insère toutes les lignes ou aucune.
    fn insert_batch(&mut self, work_date: NaiveDate, rows: &[RosterRow]) -> anyhow::Result<()>;
    fn roster_for(&self, work_date: NaiveDate) -> anyhow::Result<Vec<RosterRow>>;
    /// Supprime le planning d'une date ; renvoie le nombre de lignes retirées.
    fn clear_date(&mut self, work_date: NaiveDate) -> anyhow::Result<usize>;
}

/// Ensemble des annuaires en lecture seule requis pour un calcul.
pub trait Directory: WorkerDirectory + AvailabilityStore + WorkplaceDirectory + TaskDirectory {}

impl<T> Directory for T where
    T: WorkerDirectory + AvailabilityStore + WorkplaceDirectory + TaskDirectory
{
}

impl WorkerDirectory for FarmData {
    fn workers(&self) -> anyhow::Result<Vec<Worker>> {
        Ok(self.workers.clone())
    }
}

impl AvailabilityStore for FarmData {
    fn declarations_for(&self, weekday: Weekday) -> anyhow::Result<Vec<Availability>> {
        Ok(self
            .availability
            .iter()
            .filter(|a| a.weekday == weekday)
            .copied()
            .collect())
    }
}

impl WorkplaceDirectory for FarmData {
    fn workplaces(&self) -> anyhow::Result<Vec<Workplace>> {
        Ok(self.workplaces.clone())
    }
}

impl TaskDirectory for FarmData {
    fn task_by_id(&self, id: TaskId) -> anyhow::Result<Option<Task>> {
        Ok(self.find_task(id).cloned())
    }

    fn task_by_name(&self, name: &str) -> anyhow::Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.name == name).cloned())
    }
}

impl RosterStore for FarmData {
    fn insert_batch(&mut self, work_date: NaiveDate, rows: &[RosterRow]) -> anyhow::Result<()> {
        if let Some(row) = rows.iter().find(|r| r.work_date != work_date) {
            anyhow::bail!(
                "row {} is dated {} but the batch targets {}",
                row.id.as_str(),
                row.work_date,
                work_date
            );
        }
        self.roster.extend_from_slice(rows);
        Ok(())
    }

    fn roster_for(&self, work_date: NaiveDate) -> anyhow::Result<Vec<RosterRow>> {
        Ok(self
            .roster
            .iter()
            .filter(|r| r.work_date == work_date)
            .cloned()
            .collect())
    }

    fn clear_date(&mut self, work_date: NaiveDate) -> anyhow::Result<usize> {
        let before = self.roster.len();
        self.roster.retain(|r| r.work_date != work_date);
        Ok(before - self.roster.len())
    }
}
