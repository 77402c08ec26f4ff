mod allocator;
pub mod availability;
mod capacity;
mod fanout;
mod types;

pub use allocator::{ShiftCounter, SlotAllocator};
pub use availability::{index_day, DayAvailability};
pub use types::{AssignError, AssignOptions};

use crate::config::FarmConfig;
use crate::directory::{Directory, RosterStore};
use crate::model::{RosterRow, StaffingRequirement};
use chrono::NaiveDate;
use fanout::ReservedTasks;
use tracing::{debug, info, warn};

/// Moteur d'affectation : calcule le planning complet d'une date, ou rien.
pub struct ShiftEngine<'a, D: ?Sized> {
    directory: &'a D,
    config: &'a FarmConfig,
    opts: AssignOptions,
}

impl<'a, D> ShiftEngine<'a, D>
where
    D: Directory + ?Sized,
{
    pub fn new(directory: &'a D, config: &'a FarmConfig) -> Self {
        Self {
            directory,
            config,
            opts: AssignOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: AssignOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Calcule les lignes de planning sans rien écrire.
    ///
    /// Les besoins sont traités poste par poste puis matin avant après-midi ;
    /// les besoins à effectif nul sont ignorés. Le moindre échec annule tout.
    pub fn plan(
        &self,
        work_date: NaiveDate,
        requirements: &[StaffingRequirement],
    ) -> Result<Vec<RosterRow>, AssignError> {
        info!(%work_date, requirements = requirements.len(), "assignment run started");

        let mut ordered: Vec<&StaffingRequirement> = requirements.iter().collect();
        ordered.sort_by_key(|r| (r.workplace, r.slot));
        if let Some(pair) = ordered
            .windows(2)
            .find(|pair| (pair[0].workplace, pair[0].slot) == (pair[1].workplace, pair[1].slot))
        {
            return Err(AssignError::DuplicateRequirement {
                workplace: pair[0].workplace,
                slot: pair[0].slot,
            });
        }
        ordered.retain(|r| r.headcount > 0);

        let day = availability::index_day(self.directory, work_date)?;
        capacity::check_capacity(&day, &ordered)?;

        let workplaces = self.directory.workplaces()?;
        let pool = self.directory.workers()?;
        let reserved = ReservedTasks::resolve(self.directory, self.config)?;
        let mut allocator = SlotAllocator::new(&pool, &day, self.opts);

        let mut rows = Vec::new();
        for requirement in ordered {
            let Some(workplace) = workplaces.iter().find(|w| w.id == requirement.workplace)
            else {
                warn!(workplace = %requirement.workplace, "workplace not found");
                return Err(AssignError::WorkplaceNotFound(requirement.workplace));
            };
            debug!(
                workplace = %workplace.id,
                name = %workplace.name,
                slot = %requirement.slot,
                headcount = requirement.headcount,
                "allocating"
            );

            let team = allocator.allocate(requirement)?;
            let task_ids =
                fanout::resolve_tasks(self.directory, &reserved, self.config, requirement)?;
            rows.extend(fanout::fan_out(work_date, requirement, &team, &task_ids));
        }

        info!(%work_date, rows = rows.len(), "assignment computed");
        Ok(rows)
    }
}

/// Calcule puis enregistre le planning d'une date en un seul lot.
///
/// Rien n'est écrit si le calcul échoue ; un échec d'écriture est remonté
/// tel quel (`AssignError::Store`), sans nouvelle tentative.
pub fn assign<S>(
    store: &mut S,
    config: &FarmConfig,
    opts: AssignOptions,
    work_date: NaiveDate,
    requirements: &[StaffingRequirement],
) -> Result<Vec<RosterRow>, AssignError>
where
    S: Directory + RosterStore,
{
    let rows = ShiftEngine::new(&*store, config)
        .with_options(opts)
        .plan(work_date, requirements)?;
    store
        .insert_batch(work_date, &rows)
        .map_err(AssignError::Store)?;
    info!(%work_date, rows = rows.len(), "roster saved");
    Ok(rows)
}
