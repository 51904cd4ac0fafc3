// Interaction checks with recording test doubles.

use casework::mock::Times;
use casework::toys::atm::{AtmMachine, BankServer, InMemoryBankServer, MockBankServer};
use casework::toys::turtle::{CanvasTurtle, MockTurtle, Painter, Turtle};
use casework::{CaseRunner, CaseTable, Fixture, Outcome};

#[test]
fn painter_can_draw_something() {
    let mut turtle = MockTurtle::default();
    turtle.calls.expect_call("pen_down").times(Times::AtLeast(1));

    let mut painter = Painter::new(&mut turtle);
    assert!(painter.draw_circle(0, 0, 10));

    turtle.calls.verify().unwrap();
}

#[test]
fn painter_walks_a_closed_polygon() {
    let mut turtle = CanvasTurtle::default();
    assert!(Painter::new(&mut turtle).draw_circle(0, 0, 10));
    assert_eq!(turtle.segments.len(), 36);
    let start = turtle.segments[0].0;
    let end = turtle.segments[35].1;
    assert!((start.0 - end.0).abs() <= 3 && (start.1 - end.1).abs() <= 3);
    assert_eq!(turtle.x(), end.0);
}

#[test]
fn unmet_expectation_is_reported_with_declaration_site() {
    let mut turtle = MockTurtle::default();
    turtle.calls.expect_call("go_to").with_args(&[&5, &5]);
    Painter::new(&mut turtle).draw_circle(0, 0, 10);

    let err = turtle.calls.verify().unwrap_err();
    let text = err.to_string();
    assert!(text.contains("turtle.go_to(5, 5) expected to be called once, actually called never"));
    assert!(text.contains("mocking.rs"));
}

/// Fixture with a bank server whose balance defaults to 1000.
struct DoDefaultFixture {
    server: MockBankServer,
}

impl Fixture<(u32, i64)> for DoDefaultFixture {
    fn set_up(_case: &(u32, i64)) -> Self {
        let server = MockBankServer::default();
        server.calls.on_call("get_balance").will_by_default(1000_i64);
        Self { server }
    }
}

#[test]
fn atm_withdrawals_against_default_balance() {
    let table = CaseTable::named([
        ("exact", (1234_u32, 1000_i64)),
        ("over", (1234, 1001)),
        ("small", (1, 1)),
    ]);
    let report = CaseRunner::new("DoDefaultTest")
        .run_with_fixture::<_, DoDefaultFixture, _>(&table, |fx, &(account, value), check| {
            let withdrawn = AtmMachine::new(&mut fx.server).withdraw(account, value);
            check.expect_true(withdrawn, "withdraw succeeded");
            fx.server.calls.expect_call("connect");
            fx.server.calls.expect_call("disconnect");
            fx.server.calls.verify_into(check);
            Ok(())
        })
        .unwrap();
    assert_eq!(
        report.outcomes(),
        vec![Outcome::Passed, Outcome::Failed, Outcome::Passed]
    );
}

#[test]
fn atm_calls_the_server_in_order() {
    let mut server = MockBankServer::default();
    server.calls.on_call("get_balance").will_by_default(50_i64);
    server.calls.expect_call("debit").times(Times::never());

    assert!(!AtmMachine::new(&mut server).withdraw(9, 60));
    server.calls.verify().unwrap();
    assert_eq!(
        server.calls.call_sequence(),
        vec!["connect", "get_balance", "disconnect"]
    );
    assert_eq!(server.calls.calls()[1].args, vec!["9"]);
}

#[test]
fn real_server_behaves_like_the_mock_says() {
    let mut server = InMemoryBankServer::default().with_account(1234, 1000);
    assert!(AtmMachine::new(&mut server).withdraw(1234, 1000));
    assert_eq!(server.get_balance(1234), 0);
    assert!(!AtmMachine::new(&mut server).withdraw(1234, 1));
}
