use super::availability::DayAvailability;
use super::{AssignError, AssignOptions};
use crate::model::{SkillLevel, StaffingRequirement, TimeSlot, Worker, WorkerId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Nombre d'affectations déjà données à chaque saisonnier pendant le calcul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftCounter {
    counts: HashMap<WorkerId, u32>,
}

impl ShiftCounter {
    pub fn get(&self, worker: WorkerId) -> u32 {
        self.counts.get(&worker).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, worker: WorkerId) {
        *self.counts.entry(worker).or_insert(0) += 1;
    }
}

/// Sélection des équipes, besoin après besoin, sur un même calcul.
///
/// Le compteur est partagé entre tous les besoins : un saisonnier choisi
/// passe derrière ceux qui ont moins travaillé (rotation équitable).
pub struct SlotAllocator<'a> {
    pool: &'a [Worker],
    day: &'a DayAvailability,
    opts: AssignOptions,
    counter: ShiftCounter,
    committed: HashMap<TimeSlot, HashSet<WorkerId>>,
}

impl<'a> SlotAllocator<'a> {
    pub fn new(pool: &'a [Worker], day: &'a DayAvailability, opts: AssignOptions) -> Self {
        Self {
            pool,
            day,
            opts,
            counter: ShiftCounter::default(),
            committed: HashMap::new(),
        }
    }

    pub fn counter(&self) -> &ShiftCounter {
        &self.counter
    }

    pub fn into_counter(self) -> ShiftCounter {
        self.counter
    }

    /// Choisit un chef d'équipe puis `headcount - 1` équipiers.
    ///
    /// Le chef est toujours en tête du résultat.
    pub fn allocate(
        &mut self,
        requirement: &StaffingRequirement,
    ) -> Result<Vec<&'a Worker>, AssignError> {
        let slot = requirement.slot;
        let workplace = requirement.workplace;

        let leaders = self.candidates(slot, SkillLevel::is_leader);
        let Some(&leader) = leaders.first() else {
            warn!(%workplace, %slot, "no leader available");
            return Err(AssignError::LeaderShortage { workplace, slot });
        };
        self.commit(leader.id, slot);

        let required = requirement.headcount.saturating_sub(1) as usize;
        let others = self.candidates(slot, |skill| !skill.is_leader());
        if others.len() < required {
            warn!(
                %workplace,
                %slot,
                required,
                available = others.len(),
                "not enough non-leader workers"
            );
            return Err(AssignError::StaffShortage {
                workplace,
                slot,
                required,
                available: others.len(),
            });
        }

        let mut team = Vec::with_capacity(required + 1);
        team.push(leader);
        for worker in others.into_iter().take(required) {
            self.commit(worker.id, slot);
            team.push(worker);
        }
        debug!(
            %workplace,
            %slot,
            leader = %leader.id,
            team = team.len(),
            "team selected"
        );
        Ok(team)
    }

    /// Candidats disponibles pour la demi-journée, les moins sollicités d'abord.
    /// À égalité, l'ordre de l'annuaire est conservé.
    fn candidates<F>(&self, slot: TimeSlot, skill_filter: F) -> Vec<&'a Worker>
    where
        F: Fn(SkillLevel) -> bool,
    {
        let taken = self.committed.get(&slot);
        let mut out: Vec<&'a Worker> = self
            .pool
            .iter()
            .filter(|w| skill_filter(w.skill))
            .filter(|w| self.day.is_available(w.id, slot))
            .filter(|w| {
                !self.opts.exclusive_slots || taken.map_or(true, |set| !set.contains(&w.id))
            })
            .collect();
        out.sort_by_key(|w| self.counter.get(w.id));
        out
    }

    fn commit(&mut self, worker: WorkerId, slot: TimeSlot) {
        self.counter.bump(worker);
        self.committed.entry(slot).or_default().insert(worker);
    }
}
