use crate::model::{StaffingRequirement, TaskId, TimeSlot, WorkplaceId};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Plan de besoins saisi par l'administrateur pour une date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffingPlan {
    #[serde(default)]
    pub work_date: Option<NaiveDate>,
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

/// Besoins d'un poste : effectif matin/après-midi et tâches choisies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    pub workplace: WorkplaceId,
    #[serde(default)]
    pub am: u32,
    #[serde(default)]
    pub pm: u32,
    #[serde(default)]
    pub tasks: Vec<TaskId>,
}

impl PlanEntry {
    fn headcount(&self, slot: TimeSlot) -> u32 {
        match slot {
            TimeSlot::Am => self.am,
            TimeSlot::Pm => self.pm,
        }
    }

    /// Tâches sans doublon, dans l'ordre de saisie.
    fn unique_tasks(&self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        self.tasks.iter().copied().filter(|t| seen.insert(*t)).collect()
    }
}

impl StaffingPlan {
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            bail!("plan must contain at least one workplace entry");
        }
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.workplace) {
                bail!("workplace {} is listed more than once", entry.workplace);
            }
        }
        Ok(())
    }

    /// Un besoin par poste et par demi-journée ; la liste de tâches vaut pour
    /// les deux demi-journées du poste.
    pub fn into_requirements(&self) -> Vec<StaffingRequirement> {
        self.entries
            .iter()
            .flat_map(|entry| {
                let tasks = entry.unique_tasks();
                TimeSlot::ALL.into_iter().map(move |slot| {
                    StaffingRequirement::new(entry.workplace, slot, entry.headcount(slot))
                        .with_tasks(tasks.clone())
                })
            })
            .collect()
    }

    pub fn total(&self, slot: TimeSlot) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.headcount(slot)))
            .sum()
    }
}

pub fn load_plan_from_file<P: AsRef<Path>>(path: P) -> Result<StaffingPlan> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading plan {}", path.display()))?;
    let plan: StaffingPlan = serde_json::from_slice(&data)
        .with_context(|| format!("parsing plan {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}

pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &StaffingPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}
