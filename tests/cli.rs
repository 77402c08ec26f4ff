#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("affectation-cli").unwrap();
    cmd.arg("--data").arg(data);
    cmd
}

fn seed(dir: &Path) -> std::path::PathBuf {
    let data = dir.join("farm.json");
    let workers = dir.join("workers.csv");
    fs::write(
        &workers,
        "id,name,skill\n1,Aki,LEADER\n2,Bo,GENERAL\n3,Chie,NEWCOMER\n",
    )
    .unwrap();
    let avail = dir.join("availability.csv");
    fs::write(
        &avail,
        "worker_id,weekday,slot\n1,MONDAY,BOTH\n2,MONDAY,AM\n3,MONDAY,AM\n",
    )
    .unwrap();

    cli(&data)
        .args(["import-workers", "--csv"])
        .arg(&workers)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 worker(s) imported"));
    cli(&data)
        .args(["import-availability", "--csv"])
        .arg(&avail)
        .assert()
        .success();
    cli(&data)
        .args(["add-workplace", "--id", "1", "--name", "House 1"])
        .assert()
        .success();
    for (id, name) in [("1", "harvest"), ("11", "unspecified"), ("12", "sorting")] {
        cli(&data)
            .args(["add-task", "--id", id, "--name", name])
            .assert()
            .success();
    }
    data
}

#[test]
fn assign_then_show_roster() {
    let dir = tempdir().unwrap();
    let data = seed(dir.path());
    let plan = dir.path().join("plan.json");
    fs::write(
        &plan,
        r#"{ "entries": [ { "workplace": 1, "am": 3, "pm": 1, "tasks": [1] } ] }"#,
    )
    .unwrap();

    cli(&data)
        .args(["assign", "--date", "2025-06-02", "--plan"])
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("House 1 | AM | harvest | Aki"))
        .stdout(predicate::str::contains("House 1 | PM | harvest | Aki"));

    cli(&data)
        .args(["show", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chie"));

    // une seconde exécution pour la même date est refusée sans --replace
    cli(&data)
        .args(["assign", "--date", "2025-06-02", "--plan"])
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--replace"));
}

#[test]
fn failed_assignment_exits_2_and_saves_nothing() {
    let dir = tempdir().unwrap();
    let data = seed(dir.path());
    let plan = dir.path().join("plan.json");
    fs::write(&plan, r#"{ "entries": [ { "workplace": 1, "pm": 2 } ] }"#).unwrap();

    cli(&data)
        .args(["assign", "--date", "2025-06-02", "--plan"])
        .arg(&plan)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("capacity-exceeded"));

    cli(&data)
        .args(["show", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no roster for 2025-06-02"));
}

#[test]
fn availability_summary_lists_counts() {
    let dir = tempdir().unwrap();
    let data = seed(dir.path());
    cli(&data)
        .args(["availability", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "AM: 3 | PM: 1 | leaders: 1 | general: 1 | newcomers: 1",
        ));
}
