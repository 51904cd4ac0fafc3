// CLI behaviour against the YAML tables in tests/cases.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn casework() -> Command {
    let mut cmd = Command::cargo_bin("casework").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn passing_tables_exit_zero() {
    casework()
        .args(["run", "tests/cases/passing", "--no-color"])
        .assert()
        .success()
        .stdout(
            contains("PASS: withdraw/WithdrawingLessThanBalance")
                .and(contains("PASS: deposits_first/case_0"))
                .and(contains("SKIP: deposits_first/NotYetDecided (marked skip)"))
                .and(contains("all tables: total 6, passed 5, failed 0, errored 0, skipped 1")),
        );
}

#[test]
fn wrong_expectation_exits_nonzero_with_diagnostics() {
    casework()
        .args(["run", "tests/cases/failing", "--no-color"])
        .assert()
        .failure()
        .stdout(
            contains("FAIL: wrong_balance/WithdrawingMoreThanBalance")
                .and(contains("Expected: 50"))
                .and(contains("Actual: 100"))
                .and(contains("total 3, passed 2, failed 1")),
        );
}

#[test]
fn filter_skips_other_cases() {
    casework()
        .args(["run", "tests/cases/failing", "--no-color", "--filter", "AsMuch"])
        .assert()
        .success()
        .stdout(contains("passed 1, failed 0, errored 0, skipped 2"));
}

#[test]
fn json_report_lists_every_case() {
    casework()
        .args(["run", "tests/cases/failing", "--json"])
        .assert()
        .failure()
        .stdout(contains("\"suite\": \"wrong_balance\"").and(contains("\"outcome\": \"failed\"")));
}

#[test]
fn list_prints_effective_names() {
    casework()
        .args(["list", "tests/cases/passing"])
        .assert()
        .success()
        .stdout(contains("deposits_first/case_1").and(contains("withdraw/WithdrawingMoreThanBalance")));
}

#[test]
fn malformed_table_is_a_table_diagnostic() {
    let dir = std::env::temp_dir().join(format!("casework-bad-table-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("broken.yaml"), "- initial_balance: lots\n").unwrap();

    casework()
        .arg("run")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(contains("casework::table").and(contains("broken.yaml")));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_an_io_diagnostic() {
    let dir = std::env::temp_dir().join(format!("casework-no-such-dir-{}", std::process::id()));
    casework()
        .arg("run")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(contains("casework::io"));
}
