#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env_remove("HR_PORTAL_CONFIG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_rejects_inverted_item() {
    run_cli("add p1 2025-01-10 2025-01-06 Portal\nquit\n")
        .success()
        .stdout(str_contains("Error: work item p1 ends"));
}

#[test]
fn cli_delete_command_removes_item() {
    run_cli("add p1 2025-01-06 2025-01-10 Portal\ndelete p1\ndelete p1\nquit\n")
        .success()
        .stdout(str_contains("Deleted item p1."))
        .stdout(str_contains("Item p1 not found."));
}

#[test]
fn cli_timeline_attributes_working_days() {
    let script = "today 2025-01-08\n\
                  add a 2025-01-06 2025-01-10 Internal Portal\n\
                  add b 2025-01-20 2025-01-24 Payroll\n\
                  timeline\nquit\n";
    let assert = run_cli(script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Completed days:"), "{output}");
    assert!(output.contains("Internal Portal: 3 working days"), "{output}");
    assert!(output.contains("5 idle working days (Sat Jan 11 2025 → Sun Jan 19 2025)"), "{output}");
    assert!(output.contains("Payroll: 5 working days"), "{output}");
}

#[test]
fn cli_counts_and_classifies_ranges() {
    run_cli("today 2025-01-08\nbdays 2025-01-11 2025-01-19\nstatus 2025-01-06 2025-01-10\nquit\n")
        .success()
        .stdout(str_contains("Working days: 5"))
        .stdout(str_contains("Status: In Progress"));
}

#[test]
fn cli_holiday_changes_the_count() {
    run_cli("calendar holiday 2025-01-08\nbdays 2025-01-06 2025-01-10\nquit\n")
        .success()
        .stdout(str_contains("Holiday 2025-01-08 added."))
        .stdout(str_contains("Working days: 4"));
}

#[test]
fn cli_shows_fiscal_years_and_appraisals() {
    run_cli("today 2025-01-15\nfy\njoin 2024-06-01\nappraisal\nquit\n")
        .success()
        .stdout(str_contains(
            "Fiscal years: FY (24 - 25), FY (23 - 24), FY (22 - 23), FY (21 - 22)",
        ))
        .stdout(str_contains("Project End Appraisal: FY (24 - 25)"))
        .stdout(str_contains("Selected           : PEA FY (24 - 25) (add tasks: true)"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!(
        "add p1 2025-01-06 2025-01-10 KeptProject\nsave json {path}\n\
         add p2 2025-02-03 2025-02-07 ScratchItem\nload json {path}\nshow\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Items loaded from"), "{output}");
    let after_reload = output.split("Items loaded from").last().unwrap_or_default();
    assert!(after_reload.contains("KeptProject"), "{after_reload}");
    assert!(
        !after_reload.contains("ScratchItem"),
        "temporary item should not appear after reload:\n{after_reload}"
    );
}

#[test]
fn cli_save_and_load_csv() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!(
        "add p1 2025-01-06 2025-01-10 CsvProject\nsave csv {path}\ndelete p1\nload csv {path}\nshow\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let after_reload = output.split("Items loaded from").last().unwrap_or_default();
    assert!(after_reload.contains("CsvProject"), "{output}");
}

#[test]
fn cli_unknown_command_is_reported() {
    run_cli("frobnicate\n")
        .success()
        .stdout(str_contains("Unknown command 'frobnicate'"));
}

#[test]
fn cli_six_day_week_counts_saturday() {
    run_cli("calendar workdays Mon,Tue,Wed,Thu,Fri,Sat\nbdays 2025-01-06 2025-01-12\nquit\n")
        .success()
        .stdout(str_contains("Working days set to Mon,Tue,Wed,Thu,Fri,Sat."))
        .stdout(str_contains("Working days: 6"));
}

#[test]
fn cli_rejects_unknown_weekday() {
    run_cli("calendar workdays Mon,Funday\nquit\n")
        .success()
        .stdout(str_contains("Invalid weekday list"));
}

#[test]
fn cli_recurring_holiday_applies_to_each_year() {
    run_cli(
        "calendar recurring 01-01 2025 2026\nbdays 2025-01-01 2025-01-03\nbdays 2026-01-01 2026-01-02\nquit\n",
    )
    .success()
    .stdout(str_contains("Holiday 01-01 added for 2025-2026."))
    .stdout(str_contains("Working days: 2"))
    .stdout(str_contains("Working days: 1"));
}
