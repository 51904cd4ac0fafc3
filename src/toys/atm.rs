//! An ATM that talks to a bank server.

use std::collections::HashMap;

use crate::mock::MockRecorder;

pub trait BankServer {
    fn connect(&mut self);
    fn disconnect(&mut self);
    fn credit(&mut self, account_number: u32, value: i64);
    fn debit(&mut self, account_number: u32, value: i64);
    fn double_transaction(&mut self, account_number: u32, value1: i64, value2: i64) -> bool;
    fn get_balance(&self, account_number: u32) -> i64;
}

/// Balances kept in memory. Operations require a connection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBankServer {
    connected: bool,
    balances: HashMap<u32, i64>,
}

impl InMemoryBankServer {
    pub fn with_account(mut self, account_number: u32, balance: i64) -> Self {
        self.balances.insert(account_number, balance);
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl BankServer for InMemoryBankServer {
    fn connect(&mut self) {
        self.connected = true;
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn credit(&mut self, account_number: u32, value: i64) {
        if self.connected {
            *self.balances.entry(account_number).or_default() += value;
        }
    }

    fn debit(&mut self, account_number: u32, value: i64) {
        if self.connected {
            *self.balances.entry(account_number).or_default() -= value;
        }
    }

    /// Applies two debits atomically: both or neither.
    fn double_transaction(&mut self, account_number: u32, value1: i64, value2: i64) -> bool {
        let balance = self.get_balance(account_number);
        let Some(total) = value1.checked_add(value2) else {
            return false;
        };
        if !self.connected || balance < total {
            return false;
        }
        self.debit(account_number, value1);
        self.debit(account_number, value2);
        true
    }

    fn get_balance(&self, account_number: u32) -> i64 {
        self.balances.get(&account_number).copied().unwrap_or(0)
    }
}

/// Records every server call; queries return configured defaults.
#[derive(Debug)]
pub struct MockBankServer {
    pub calls: MockRecorder,
}

impl Default for MockBankServer {
    fn default() -> Self {
        Self {
            calls: MockRecorder::new("bank_server"),
        }
    }
}

impl BankServer for MockBankServer {
    fn connect(&mut self) {
        self.calls.record("connect", &[]);
    }

    fn disconnect(&mut self) {
        self.calls.record("disconnect", &[]);
    }

    fn credit(&mut self, account_number: u32, value: i64) {
        self.calls.record("credit", &[&account_number, &value]);
    }

    fn debit(&mut self, account_number: u32, value: i64) {
        self.calls.record("debit", &[&account_number, &value]);
    }

    fn double_transaction(&mut self, account_number: u32, value1: i64, value2: i64) -> bool {
        self.calls
            .record("double_transaction", &[&account_number, &value1, &value2]);
        self.calls.returns_or("double_transaction", false)
    }

    fn get_balance(&self, account_number: u32) -> i64 {
        self.calls.record("get_balance", &[&account_number]);
        self.calls.returns_or("get_balance", 0)
    }
}

pub struct AtmMachine<'a> {
    server: &'a mut dyn BankServer,
}

impl<'a> AtmMachine<'a> {
    pub fn new(server: &'a mut dyn BankServer) -> Self {
        Self { server }
    }

    /// Withdraws `value` from `account_number` if the balance covers it.
    pub fn withdraw(&mut self, account_number: u32, value: i64) -> bool {
        self.server.connect();
        let available = self.server.get_balance(account_number);
        let result = available >= value;
        if result {
            self.server.debit(account_number, value);
        }
        self.server.disconnect();
        result
    }
}
