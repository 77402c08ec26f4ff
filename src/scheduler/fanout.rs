use super::AssignError;
use crate::config::FarmConfig;
use crate::directory::TaskDirectory;
use crate::model::{RosterRow, RowId, StaffingRequirement, Task, TaskId, Worker};
use chrono::NaiveDate;
use tracing::debug;

/// Tâches réservées, résolues une seule fois par calcul.
#[derive(Debug, Clone)]
pub(super) struct ReservedTasks {
    sorting_name: String,
    sorting: Option<Task>,
    default_name: String,
    default: Option<Task>,
}

impl ReservedTasks {
    pub(super) fn resolve<T>(tasks: &T, config: &FarmConfig) -> Result<Self, AssignError>
    where
        T: TaskDirectory + ?Sized,
    {
        Ok(Self {
            sorting: tasks.task_by_name(&config.sorting_task)?,
            sorting_name: config.sorting_task.clone(),
            default: tasks.task_by_name(&config.default_task)?,
            default_name: config.default_task.clone(),
        })
    }

    fn sorting(&self) -> Result<TaskId, AssignError> {
        self.sorting
            .as_ref()
            .map(|t| t.id)
            .ok_or_else(|| AssignError::MissingSortingTask(self.sorting_name.clone()))
    }

    fn default_task(&self) -> Result<TaskId, AssignError> {
        self.default
            .as_ref()
            .map(|t| t.id)
            .ok_or_else(|| AssignError::MissingDefaultTask(self.default_name.clone()))
    }
}

/// Tâches effectivement affectées pour un besoin.
///
/// Station de tri : tâche de tri, liste ignorée. Sans liste : tâche par défaut.
/// Sinon : chaque tâche de la liste, dans l'ordre.
pub(super) fn resolve_tasks<T>(
    tasks: &T,
    reserved: &ReservedTasks,
    config: &FarmConfig,
    requirement: &StaffingRequirement,
) -> Result<Vec<TaskId>, AssignError>
where
    T: TaskDirectory + ?Sized,
{
    if config.is_sorting_facility(requirement.workplace) {
        if !requirement.tasks.is_empty() {
            debug!(
                workplace = %requirement.workplace,
                ignored = requirement.tasks.len(),
                "sorting facility ignores supplied tasks"
            );
        }
        return Ok(vec![reserved.sorting()?]);
    }
    if requirement.tasks.is_empty() {
        return Ok(vec![reserved.default_task()?]);
    }
    requirement
        .tasks
        .iter()
        .map(|&id| match tasks.task_by_id(id)? {
            Some(task) => Ok(task.id),
            None => Err(AssignError::TaskNotFound(id)),
        })
        .collect()
}

/// Une ligne par (saisonnier × tâche).
pub(super) fn fan_out(
    work_date: NaiveDate,
    requirement: &StaffingRequirement,
    team: &[&Worker],
    task_ids: &[TaskId],
) -> Vec<RosterRow> {
    team.iter()
        .flat_map(|worker| {
            task_ids.iter().map(move |&task| RosterRow {
                id: RowId::random(),
                work_date,
                workplace: requirement.workplace,
                slot: requirement.slot,
                task,
                worker: worker.id,
                required_count: requirement.headcount,
            })
        })
        .collect()
}
