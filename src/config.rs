use crate::model::WorkplaceId;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Identifiants réservés de l'exploitation, lus une fois au démarrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Poste « station de tri » : toujours affecté à la tâche de tri.
    #[serde(default = "default_sorting_workplace")]
    pub sorting_workplace: WorkplaceId,
    /// Nom de la tâche imposée à la station de tri.
    #[serde(default = "default_sorting_task")]
    pub sorting_task: String,
    /// Nom de la tâche utilisée quand aucune liste n'est fournie.
    #[serde(default = "default_default_task")]
    pub default_task: String,
}

fn default_sorting_workplace() -> WorkplaceId {
    WorkplaceId::new(5)
}

fn default_sorting_task() -> String {
    "sorting".to_string()
}

fn default_default_task() -> String {
    "unspecified".to_string()
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            sorting_workplace: default_sorting_workplace(),
            sorting_task: default_sorting_task(),
            default_task: default_default_task(),
        }
    }
}

impl FarmConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: FarmConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sorting_task.trim().is_empty() {
            bail!("sorting_task cannot be empty");
        }
        if self.default_task.trim().is_empty() {
            bail!("default_task cannot be empty");
        }
        Ok(())
    }

    pub fn is_sorting_facility(&self, workplace: WorkplaceId) -> bool {
        self.sorting_workplace == workplace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: FarmConfig = serde_json::from_str(r#"{ "sorting_workplace": 9 }"#).unwrap();
        assert_eq!(config.sorting_workplace, WorkplaceId::new(9));
        assert_eq!(config.sorting_task, "sorting");
        assert_eq!(config.default_task, "unspecified");
    }

    #[test]
    fn blank_task_name_is_rejected() {
        let config = FarmConfig {
            default_task: "  ".into(),
            ..FarmConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
