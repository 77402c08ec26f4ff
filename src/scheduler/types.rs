use crate::model::{TaskId, TimeSlot, WorkplaceId};
use chrono::NaiveDate;
use thiserror::Error;

/// Options d'affectation
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    /// Un saisonnier ne peut tenir qu'un seul poste par demi-journée.
    pub exclusive_slots: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            exclusive_slots: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("{0} has no availability category (sunday)")]
    InvalidWeekday(NaiveDate),
    #[error("{slot}: requested headcount {requested} exceeds the {available} available worker(s)")]
    CapacityExceeded {
        slot: TimeSlot,
        requested: u64,
        available: usize,
    },
    #[error("no leader available for workplace {workplace} at {slot}")]
    LeaderShortage { workplace: WorkplaceId, slot: TimeSlot },
    #[error(
        "not enough staff for workplace {workplace} at {slot}: required {required}, available {available}"
    )]
    StaffShortage {
        workplace: WorkplaceId,
        slot: TimeSlot,
        required: usize,
        available: usize,
    },
    #[error("unknown workplace: {0}")]
    WorkplaceNotFound(WorkplaceId),
    #[error("unknown task: {0}")]
    TaskNotFound(TaskId),
    #[error("default task '{0}' is not registered")]
    MissingDefaultTask(String),
    #[error("sorting task '{0}' is not registered")]
    MissingSortingTask(String),
    #[error("workplace {workplace} has more than one requirement for {slot}")]
    DuplicateRequirement { workplace: WorkplaceId, slot: TimeSlot },
    #[error("roster write failed: {0:#}")]
    Store(anyhow::Error),
    #[error(transparent)]
    Directory(#[from] anyhow::Error),
}

impl AssignError {
    /// Nom court du type d'échec, stable pour l'affichage et les rapports.
    pub fn kind(&self) -> &'static str {
        match self {
            AssignError::InvalidWeekday(_) => "invalid-weekday",
            AssignError::CapacityExceeded { .. } => "capacity-exceeded",
            AssignError::LeaderShortage { .. } => "leader-shortage",
            AssignError::StaffShortage { .. } => "staff-shortage",
            AssignError::WorkplaceNotFound(_) => "workplace-not-found",
            AssignError::TaskNotFound(_) => "task-not-found",
            AssignError::MissingDefaultTask(_) => "missing-default-task",
            AssignError::MissingSortingTask(_) => "missing-sorting-task",
            AssignError::DuplicateRequirement { .. } => "duplicate-requirement",
            AssignError::Store(_) => "store",
            AssignError::Directory(_) => "directory",
        }
    }
}
