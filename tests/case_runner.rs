// Parametrized runner properties, exercised with the bank-account withdrawal body.

use std::collections::HashMap;

use casework::toys::bank::{standard_cases, withdraw_body, AccountFixture, AccountState, BankAccount};
use casework::{Case, CaseError, CaseRunner, CaseTable, Fixture, Outcome, RunReport, RunnerConfig};

fn run_withdrawals(table: &CaseTable<AccountState>) -> RunReport {
    CaseRunner::new("BankAccountTest")
        .run_with_fixture::<_, AccountFixture, _>(table, withdraw_body)
        .expect("valid table")
}

#[test]
fn standard_withdrawals_all_pass() {
    let report = run_withdrawals(&CaseTable::named(standard_cases()));
    assert_eq!(report.len(), 3);
    assert_eq!(report.outcomes(), vec![Outcome::Passed; 3]);
    assert_eq!(report.results[0].name, "WithdrawingLessThanBalance");
}

#[test]
fn unnamed_withdrawals_all_pass_with_ordinal_names() {
    let table = CaseTable::values(standard_cases().into_iter().map(|(_, state)| state));
    let report = run_withdrawals(&table);
    assert!(report.all_passed());
    let names: Vec<_> = report.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["case_0", "case_1", "case_2"]);
}

#[test]
fn wrong_expectation_fails_only_that_case() {
    let table = CaseTable::values([
        AccountState::new(100, 50, 50, true),
        AccountState::new(100, 100, 0, true),
        AccountState::new(100, 200, 50, false),
    ]);
    let report = run_withdrawals(&table);
    assert_eq!(
        report.outcomes(),
        vec![Outcome::Passed, Outcome::Passed, Outcome::Failed]
    );

    let failed = &report.results[2];
    assert_eq!(failed.failures.len(), 1);
    assert_eq!(failed.failures[0].expected.as_deref(), Some("50"));
    assert_eq!(failed.failures[0].actual.as_deref(), Some("100"));
    assert!(failed.failures[0].location.is_some());
}

#[test]
fn report_length_matches_case_count() {
    for n in [1usize, 2, 7, 30] {
        let table = CaseTable::values(0..n as i64);
        let report = CaseRunner::new("len")
            .run(&table, |v, check| {
                check.expect_true(*v % 3 != 0, "not a multiple of 3");
                Ok(())
            })
            .unwrap();
        assert_eq!(report.len(), n);
    }
}

#[test]
fn results_follow_input_order() {
    let values = [5, 3, 9, 1, 7];
    let report = CaseRunner::new("order")
        .run(&CaseTable::values(values), |_, _| Ok(()))
        .unwrap();
    for (i, result) in report.iter().enumerate() {
        assert_eq!(result.ordinal, i);
        assert_eq!(result.value, values[i].to_string());
    }
}

#[test]
fn verdicts_do_not_depend_on_case_order() {
    let rows = vec![
        ("a", AccountState::new(100, 50, 50, true)),
        ("b", AccountState::new(100, 200, 50, false)),
        ("c", AccountState::new(10, 10, 0, true)),
        ("d", AccountState::new(0, 1, 0, true)),
    ];
    let forward = run_withdrawals(&CaseTable::named(rows.clone()));
    let backward = run_withdrawals(&CaseTable::named(rows.into_iter().rev()));

    let by_name = |report: &RunReport| -> HashMap<String, Outcome> {
        report.iter().map(|r| (r.name.clone(), r.outcome)).collect()
    };
    assert_eq!(by_name(&forward), by_name(&backward));
    assert_eq!(forward.summary().failed, 2);
}

#[test]
fn panicking_case_does_not_stop_the_rest() {
    let table = CaseTable::values([0, -1, 1]);
    let report = CaseRunner::new("lookup")
        .run(&table, |v: &i32, check| {
            let items = [10, 20];
            let picked = items[(*v + 1) as usize];
            check.expect_eq(&true, &(picked > 0));
            Ok(())
        })
        .unwrap();
    assert_eq!(
        report.outcomes(),
        vec![Outcome::Passed, Outcome::Passed, Outcome::Errored]
    );
    assert!(report.results[2]
        .error
        .as_deref()
        .unwrap()
        .contains("index out of bounds"));
}

#[test]
fn errored_case_keeps_failures_recorded_before_the_fault() {
    let table = CaseTable::named([("lookup", 7)]);
    let report = CaseRunner::new("lookup")
        .run(&table, |v, check| {
            check.expect_eq(&0, v);
            Err(CaseError::execution("no such record"))
        })
        .unwrap();
    let result = &report.results[0];
    assert_eq!(result.outcome, Outcome::Errored);
    assert_eq!(result.error.as_deref(), Some("no such record"));
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].actual.as_deref(), Some("7"));
}

struct CountingFixture {
    account: BankAccount,
}

impl Fixture<i64> for CountingFixture {
    fn set_up(case: &i64) -> Self {
        Self {
            account: BankAccount::with_balance(*case),
        }
    }
}

#[test]
fn every_case_gets_a_fresh_fixture() {
    let table = CaseTable::values([100_i64, 100, 100]);
    let report = CaseRunner::new("fresh")
        .run_with_fixture::<_, CountingFixture, _>(&table, |fx, initial, check| {
            fx.account.deposit(10);
            check.expect_eq(&(initial + 10), &fx.account.balance);
            Ok(())
        })
        .unwrap();
    assert!(report.all_passed());
}

#[test]
fn duplicate_names_are_a_policy_choice() {
    let table = CaseTable::named([("same", 1), ("same", 2)]);
    let report = CaseRunner::new("dups").run(&table, |_, _| Ok(())).unwrap();
    assert!(report.has_ambiguous_names());
    assert_eq!(report.results[1].ordinal, 1);

    let strict = CaseRunner::new("dups").with_config(RunnerConfig::default().rejecting_duplicates());
    assert!(strict.run(&table, |_, _| Ok(())).is_err());
}

#[test]
fn name_generator_replaces_ordinal_names() {
    let table = CaseTable::new()
        .with(Case::new(AccountState::new(100, 50, 50, true)))
        .with(Case::named("Explicit", AccountState::new(1, 1, 0, true)))
        .name_with(|info| {
            format!(
                "withdraw_{}_from_{}",
                info.value.withdraw_amount, info.value.initial_balance
            )
        });
    let report = run_withdrawals(&table);
    assert_eq!(report.results[0].name, "withdraw_50_from_100");
    assert_eq!(report.results[1].name, "Explicit");
}
