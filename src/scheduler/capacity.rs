use super::availability::DayAvailability;
use super::AssignError;
use crate::model::{StaffingRequirement, TimeSlot};
use tracing::{info, warn};

/// Vérifie, tous postes confondus, que l'effectif demandé par demi-journée
/// ne dépasse pas le nombre de disponibles.
pub(super) fn check_capacity(
    day: &DayAvailability,
    requirements: &[&StaffingRequirement],
) -> Result<(), AssignError> {
    for slot in TimeSlot::ALL {
        let requested: u64 = requirements
            .iter()
            .filter(|r| r.slot == slot)
            .map(|r| u64::from(r.headcount))
            .sum();
        let available = day.count(slot);
        info!(%slot, requested, available, "capacity check");

        if requested > available as u64 {
            warn!(%slot, requested, available, "requested headcount exceeds availability");
            return Err(AssignError::CapacityExceeded {
                slot,
                requested,
                available,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, FarmData, Weekday, WorkerId, WorkplaceId};
    use crate::scheduler::availability::index_day;
    use chrono::NaiveDate;

    fn monday_with(am: u64, pm: u64) -> DayAvailability {
        let mut farm = FarmData::default();
        for i in 0..am {
            farm.availability
                .push(Availability::new(WorkerId::new(i), Weekday::Monday, TimeSlot::Am));
        }
        for i in 0..pm {
            farm.availability
                .push(Availability::new(WorkerId::new(100 + i), Weekday::Monday, TimeSlot::Pm));
        }
        index_day(&farm, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()).unwrap()
    }

    #[test]
    fn sums_across_workplaces() {
        let day = monday_with(3, 5);
        let a = StaffingRequirement::new(WorkplaceId::new(1), TimeSlot::Am, 2);
        let b = StaffingRequirement::new(WorkplaceId::new(2), TimeSlot::Am, 2);
        let err = check_capacity(&day, &[&a, &b]).unwrap_err();
        assert!(matches!(
            err,
            AssignError::CapacityExceeded { slot: TimeSlot::Am, requested: 4, available: 3 }
        ));
    }

    #[test]
    fn exact_fit_passes() {
        let day = monday_with(3, 1);
        let a = StaffingRequirement::new(WorkplaceId::new(1), TimeSlot::Am, 3);
        let b = StaffingRequirement::new(WorkplaceId::new(1), TimeSlot::Pm, 1);
        assert!(check_capacity(&day, &[&a, &b]).is_ok());
    }

    #[test]
    fn pm_overcommit_is_named() {
        let day = monday_with(4, 1);
        let b = StaffingRequirement::new(WorkplaceId::new(3), TimeSlot::Pm, 2);
        let err = check_capacity(&day, &[&b]).unwrap_err();
        assert!(matches!(err, AssignError::CapacityExceeded { slot: TimeSlot::Pm, .. }));
    }
}
