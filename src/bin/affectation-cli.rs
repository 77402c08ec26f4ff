#![forbid(unsafe_code)]
use affectation::{
    assign, availability_summary, default_work_date, io, load_plan_from_file,
    directory::RosterStore,
    model::{FarmData, RosterRow, Task, Workplace},
    storage::{JsonStorage, Storage},
    AssignError, AssignOptions, FarmConfig,
};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'affectation des saisonniers (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des données de l'exploitation
    #[arg(long, global = true, default_value = "farm.json")]
    data: String,

    /// Fichier JSON des identifiants réservés (station de tri, tâches)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des saisonniers depuis un CSV (`id,name,skill`)
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des disponibilités depuis un CSV (`worker_id,weekday,slot`)
    ImportAvailability {
        #[arg(long)]
        csv: String,
    },

    /// Déclarer ou renommer un poste
    AddWorkplace {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: String,
    },

    /// Déclarer ou renommer une tâche
    AddTask {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: String,
    },

    /// Résumé des disponibles pour une date
    Availability {
        /// AAAA-MM-JJ (défaut : prochain jour travaillé)
        #[arg(long)]
        date: Option<String>,
    },

    /// Calculer et enregistrer le planning d'une date
    Assign {
        /// Plan de besoins (JSON)
        #[arg(long)]
        plan: String,
        /// AAAA-MM-JJ (défaut : date du plan, sinon prochain jour travaillé)
        #[arg(long)]
        date: Option<String>,
        /// Remplace un planning déjà enregistré pour cette date
        #[arg(long)]
        replace: bool,
        /// Autorise un saisonnier sur plusieurs postes dans la même demi-journée
        #[arg(long)]
        shared_slots: bool,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher le planning enregistré d'une date
    Show {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => FarmConfig::load(path)?,
        None => FarmConfig::default(),
    };
    let storage = JsonStorage::open(&cli.data)?;
    let mut farm = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            let n = workers.len();
            for worker in workers {
                farm.upsert_worker(worker);
            }
            storage.save(&farm)?;
            println!("{n} worker(s) imported");
            0
        }
        Commands::ImportAvailability { csv } => {
            let declarations = io::import_availability_csv(csv)?;
            let unknown: Vec<String> = declarations
                .iter()
                .filter(|d| farm.find_worker(d.worker).is_none())
                .map(|d| d.worker.to_string())
                .collect();
            if !unknown.is_empty() {
                bail!("unknown worker id(s): {}", unknown.join(", "));
            }
            let n = declarations.len();
            farm.availability.extend(declarations);
            storage.save(&farm)?;
            println!("{n} declaration(s) imported");
            0
        }
        Commands::AddWorkplace { id, name } => {
            farm.upsert_workplace(Workplace::new(id, name));
            storage.save(&farm)?;
            0
        }
        Commands::AddTask { id, name } => {
            farm.upsert_task(Task::new(id, name));
            storage.save(&farm)?;
            0
        }
        Commands::Availability { date } => {
            let date = resolve_date(date.as_deref(), None)?;
            let summary = availability_summary(&farm, date)?;
            match summary.weekday {
                Some(day) => println!("{} ({day})", summary.work_date),
                None => println!("{} (no availability category)", summary.work_date),
            }
            println!(
                "AM: {} | PM: {} | leaders: {} | general: {} | newcomers: {}",
                summary.am_total,
                summary.pm_total,
                summary.leaders,
                summary.generals,
                summary.newcomers
            );
            for w in &summary.workers {
                println!("{} | {} | {}", w.id, w.name, w.skill);
            }
            0
        }
        Commands::Assign {
            plan,
            date,
            replace,
            shared_slots,
            out_csv,
        } => {
            let plan = load_plan_from_file(&plan)?;
            let date = resolve_date(date.as_deref(), plan.work_date)?;
            let existing = farm.roster_for(date)?;
            if !existing.is_empty() {
                if !replace {
                    bail!("a roster already exists for {date} (use --replace)");
                }
                farm.clear_date(date)?;
            }
            let opts = AssignOptions {
                exclusive_slots: !shared_slots,
            };
            let requirements = plan.into_requirements();
            match assign(&mut farm, &config, opts, date, &requirements) {
                Ok(rows) => {
                    storage.save(&farm)?;
                    print_rows(&farm, &rows);
                    if let Some(path) = out_csv {
                        io::export_roster_csv(path, &farm, &rows)?;
                    }
                    0
                }
                Err(err) => report_failure(&err),
            }
        }
        Commands::Show {
            date,
            out_json,
            out_csv,
        } => {
            let date = resolve_date(date.as_deref(), None)?;
            let rows = farm.roster_for(date)?;
            if let Some(path) = out_json {
                io::export_roster_json(path, &rows)?;
            }
            if let Some(path) = out_csv {
                io::export_roster_csv(path, &farm, &rows)?;
            }
            if rows.is_empty() {
                println!("no roster for {date}");
            }
            print_rows(&farm, &rows);
            0
        }
    };

    std::process::exit(code);
}

fn resolve_date(raw: Option<&str>, fallback: Option<NaiveDate>) -> Result<NaiveDate> {
    match raw {
        Some(s) => s
            .trim()
            .parse()
            .with_context(|| format!("invalid date (expected YYYY-MM-DD): {s}")),
        None => Ok(fallback.unwrap_or_else(|| default_work_date(Local::now().date_naive()))),
    }
}

fn print_rows(farm: &FarmData, rows: &[RosterRow]) {
    for row in rows {
        let workplace = farm
            .find_workplace(row.workplace)
            .map(|w| w.name.as_str())
            .unwrap_or("-");
        let task = farm
            .find_task(row.task)
            .map(|t| t.name.as_str())
            .unwrap_or("-");
        let worker = farm
            .find_worker(row.worker)
            .map(|w| w.name.as_str())
            .unwrap_or("-");
        println!(
            "{} | {} | {} | {} | {}",
            row.work_date, workplace, row.slot, task, worker
        );
    }
}

// Code 2 = affectation impossible, rien n'a été enregistré
fn report_failure(err: &AssignError) -> i32 {
    eprintln!("assignment failed [{}]: {err}", err.kind());
    2
}
