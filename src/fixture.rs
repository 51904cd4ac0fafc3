//! Per-case fixtures.

/// State built fresh for every case, from that case's value.
///
/// ```
/// use casework::Fixture;
/// use casework::toys::bank::{AccountState, BankAccount};
///
/// struct AccountFixture {
///     account: BankAccount,
/// }
///
/// impl Fixture<AccountState> for AccountFixture {
///     fn set_up(case: &AccountState) -> Self {
///         Self { account: BankAccount::with_balance(case.initial_balance) }
///     }
/// }
/// ```
pub trait Fixture<V>: Sized {
    fn set_up(case: &V) -> Self;

    /// Runs after the body returns, whatever its verdict.
    fn tear_down(&mut self) {}
}

/// Fixtures that ignore the case value can use `Default`.
#[derive(Debug, Default, Clone)]
pub struct Fresh<T>(pub T);

impl<V, T: Default> Fixture<V> for Fresh<T> {
    fn set_up(_case: &V) -> Self {
        Fresh(T::default())
    }
}
