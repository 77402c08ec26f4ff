use crate::model::{
    Availability, FarmData, RosterRow, SkillLevel, TimeSlot, Weekday, Worker, WorkerId,
};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de saisonniers depuis CSV: header `id,name,skill`
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let skill = rec.get(2).context("missing skill")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid worker row (empty)");
        }
        let id: WorkerId = id.parse().with_context(|| format!("invalid worker id: {id}"))?;
        let skill = skill
            .parse::<SkillLevel>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid skill for worker {id}"))?;
        out.push(Worker {
            id,
            name: name.to_string(),
            skill,
        });
    }
    Ok(out)
}

/// Import des disponibilités: header `worker_id,weekday,slot`
///
/// `slot` accepte aussi `BOTH` pour déclarer matin et après-midi.
pub fn import_availability_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Availability>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let worker = rec.get(0).context("missing worker_id")?.trim();
        let weekday = rec.get(1).context("missing weekday")?.trim();
        let slot = rec.get(2).context("missing slot")?.trim();
        let worker: WorkerId = worker
            .parse()
            .with_context(|| format!("invalid worker id: {worker}"))?;
        let weekday: Weekday = weekday.parse().map_err(anyhow::Error::msg)?;
        if slot.eq_ignore_ascii_case("both") {
            out.extend(TimeSlot::ALL.map(|s| Availability::new(worker, weekday, s)));
        } else {
            let slot: TimeSlot = slot.parse().map_err(anyhow::Error::msg)?;
            out.push(Availability::new(worker, weekday, slot));
        }
    }
    Ok(out)
}

/// Export JSON des lignes de planning (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, rows: &[RosterRow]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning:
/// header `work_date,workplace,slot,task,worker_id,worker_name,required_count`
pub fn export_roster_csv<P: AsRef<Path>>(
    path: P,
    farm: &FarmData,
    rows: &[RosterRow],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "work_date",
        "workplace",
        "slot",
        "task",
        "worker_id",
        "worker_name",
        "required_count",
    ])?;
    let mut worker_buf = itoa::Buffer::new();
    let mut count_buf = itoa::Buffer::new();
    for row in rows {
        let workplace = farm
            .find_workplace(row.workplace)
            .map(|wp| wp.name.as_str())
            .unwrap_or("");
        let task = farm
            .find_task(row.task)
            .map(|t| t.name.as_str())
            .unwrap_or("");
        let worker_name = farm
            .find_worker(row.worker)
            .map(|p| p.name.as_str())
            .unwrap_or("");
        let date = row.work_date.to_string();
        w.write_record([
            date.as_str(),
            workplace,
            row.slot.as_str(),
            task,
            worker_buf.format(row.worker.get()),
            worker_name,
            count_buf.format(row.required_count),
        ])?;
    }
    w.flush()?;
    Ok(())
}
