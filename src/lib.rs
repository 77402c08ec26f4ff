#![forbid(unsafe_code)]
//! Affectation — planification des équipes saisonnières d'une exploitation (sans BD).
//!
//! - Disponibilités déclarées par jour et demi-journée (matin / après-midi).
//! - Contrôle global de capacité, un chef d'équipe par poste, rotation équitable.
//! - Tâches imposées (station de tri), par défaut, ou liste explicite.
//! - Tout ou rien : aucun planning partiel n'est enregistré.

pub mod config;
pub mod directory;
pub mod io;
pub mod model;
pub mod plan;
pub mod scheduler;
pub mod storage;
pub mod summary;

pub use config::FarmConfig;
pub use directory::{
    AvailabilityStore, Directory, RosterStore, TaskDirectory, WorkerDirectory, WorkplaceDirectory,
};
pub use model::{
    Availability, FarmData, RosterRow, RowId, SkillLevel, StaffingRequirement, Task, TaskId,
    TimeSlot, Weekday, Worker, WorkerId, Workplace, WorkplaceId,
};
pub use plan::{load_plan_from_file, PlanEntry, StaffingPlan};
pub use scheduler::{assign, AssignError, AssignOptions, ShiftEngine};
pub use storage::{JsonStorage, Storage};
pub use summary::{availability_summary, default_work_date, AvailabilitySummary};
