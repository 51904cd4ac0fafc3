//! A bank account and the withdrawal case rows used to exercise it.

use serde::{Deserialize, Serialize};

use crate::fixture::Fixture;
use crate::verdict::{CaseOutcome, Checker};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub balance: i64,
}

impl BankAccount {
    pub fn with_balance(balance: i64) -> Self {
        Self { balance }
    }

    pub fn deposit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Withdraws `amount` when the balance covers it.
    pub fn withdraw(&mut self, amount: i64) -> bool {
        if amount <= self.balance {
            self.balance -= amount;
            return true;
        }
        false
    }
}

/// One withdrawal scenario: start balance, amount, and what should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub initial_balance: i64,
    pub withdraw_amount: i64,
    pub final_balance: i64,
    pub success: bool,
}

impl AccountState {
    pub fn new(initial_balance: i64, withdraw_amount: i64, final_balance: i64, success: bool) -> Self {
        Self {
            initial_balance,
            withdraw_amount,
            final_balance,
            success,
        }
    }
}

/// Fresh account per case, opened with the case's initial balance.
#[derive(Debug)]
pub struct AccountFixture {
    pub account: BankAccount,
}

impl Fixture<AccountState> for AccountFixture {
    fn set_up(case: &AccountState) -> Self {
        Self {
            account: BankAccount::with_balance(case.initial_balance),
        }
    }
}

/// Withdraw, then compare the balance and the success flag.
pub fn withdraw_body(fixture: &mut AccountFixture, case: &AccountState, check: &mut Checker) -> CaseOutcome {
    let success = fixture.account.withdraw(case.withdraw_amount);
    check.expect_eq(&case.final_balance, &fixture.account.balance);
    check.expect_eq(&case.success, &success);
    Ok(())
}

/// The three canonical withdrawal scenarios.
pub fn standard_cases() -> Vec<(&'static str, AccountState)> {
    vec![
        ("WithdrawingLessThanBalance", AccountState::new(100, 50, 50, true)),
        ("WithdrawingAsMuchAsBalance", AccountState::new(100, 100, 0, true)),
        ("WithdrawingMoreThanBalance", AccountState::new(100, 200, 100, false)),
    ]
}
