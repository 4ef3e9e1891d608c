//! End-to-end: a use case backed by a repository, built by a small factory
//! and guarded by `RecoveringUseCase`.

use std::collections::HashMap;

use cleanflow_core::{
    BoxError, DomainError, DomainResult, ErrorKind, ResultExt, ValidationIssue, chain_contains,
    find_domain_error,
};
use cleanflow_usecase::{CapturingPresenter, Output, Presenter, RecoveringUseCase, UseCase};
use proptest::prelude::*;

/// Entity with a little logic of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Counter {
    start: i64,
}

impl Counter {
    fn add(&self, amount: i64) -> DomainResult<i64> {
        if amount < 0 {
            return Err(DomainError::invalid_input("amount must be zero or more")
                .with_issue(ValidationIssue::new("$.amount", "negative").with_min(0)));
        }
        Ok(self.start + amount)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("failed to connect to data source")]
struct ConnectionLost;

/// What the use case needs from storage; how it is stored is not its concern.
trait CounterReader {
    fn read(&self, id: &str) -> Result<Counter, BoxError>;
}

struct InMemoryCounters {
    rows: HashMap<String, Counter>,
}

impl CounterReader for InMemoryCounters {
    fn read(&self, id: &str) -> Result<Counter, BoxError> {
        self.rows
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("counter {id}")).into())
    }
}

struct OfflineCounters;

impl CounterReader for OfflineCounters {
    fn read(&self, _id: &str) -> Result<Counter, BoxError> {
        Err(Box::new(ConnectionLost))
    }
}

struct PoisonedCounters;

impl CounterReader for PoisonedCounters {
    fn read(&self, id: &str) -> Result<Counter, BoxError> {
        panic!("storage invariant broken for {id}")
    }
}

struct AddInput {
    counter_id: String,
    amount: i64,
}

struct AddToCounter<R> {
    repo: R,
}

impl<R: CounterReader> UseCase<AddInput, i64> for AddToCounter<R> {
    fn execute(&self, input: AddInput, presenter: &mut dyn Presenter<i64>) {
        let counter = match self.repo.read(&input.counter_id).wrap_err("reading counter") {
            Ok(counter) => counter,
            Err(err) => {
                presenter.present(Output::failed(err));
                return;
            }
        };
        presenter.present(counter.add(input.amount).into());
    }
}

fn guarded<R: CounterReader + 'static>(repo: R) -> Box<dyn UseCase<AddInput, i64>> {
    Box::new(RecoveringUseCase::new(AddToCounter { repo }))
}

fn seeded() -> InMemoryCounters {
    InMemoryCounters {
        rows: HashMap::from([("1000".to_string(), Counter { start: 10 })]),
    }
}

fn run(use_case: &dyn UseCase<AddInput, i64>, counter_id: &str, amount: i64) -> Output<i64> {
    cleanflow_observability::tracing::init_for_tests();
    let mut presenter = CapturingPresenter::new();
    use_case.execute(
        AddInput {
            counter_id: counter_id.to_string(),
            amount,
        },
        &mut presenter,
    );
    assert_eq!(presenter.presentations(), 1, "presenter must be called exactly once");
    presenter.take().expect("output presented")
}

#[test]
fn adds_to_stored_counter() {
    let out = run(guarded(seeded()).as_ref(), "1000", 40);
    assert!(out.is_ok());
    assert_eq!(out.answer, 50);
}

#[test]
fn missing_counter_keeps_not_found_kind_through_wrap() {
    let out = run(guarded(seeded()).as_ref(), "404", 1);
    let err = out.err.as_deref().unwrap();
    assert_eq!(err.to_string(), "reading counter (not found - counter 404)");
    assert_eq!(find_domain_error(err).unwrap().kind(), ErrorKind::NotFound);
}

#[test]
fn infrastructure_failure_becomes_system_error() {
    let out = run(guarded(OfflineCounters).as_ref(), "1000", 1);
    assert_eq!(out.answer, 0);
    let err = out.err.as_deref().unwrap();
    let domain = find_domain_error(err).unwrap();
    assert_eq!(domain.kind(), ErrorKind::System);
    assert!(domain.cause().unwrap().is::<ConnectionLost>());
    assert!(chain_contains(err, &ConnectionLost));
    assert_eq!(
        err.to_string(),
        "reading counter (system - converted error (failed to connect to data source))"
    );
}

#[test]
fn entity_validation_reaches_presenter() {
    let out = run(guarded(seeded()).as_ref(), "1000", -5);
    let domain = out.domain_error().unwrap();
    assert_eq!(domain.kind(), ErrorKind::InvalidInput);
    assert_eq!(domain.issues()[0].min, Some(0));
}

#[test]
fn repository_panic_is_recovered() {
    let out = run(guarded(PoisonedCounters).as_ref(), "1000", 1);
    assert_eq!(out.answer, 0);
    assert_eq!(
        out.err.map(|e| e.to_string()).as_deref(),
        Some("system - wrapper recovery (storage invariant broken for 1000)")
    );
}

#[test]
fn presenter_can_be_a_closure() {
    let use_case = guarded(seeded());
    let mut rendered = String::new();
    use_case.execute(
        AddInput {
            counter_id: "1000".to_string(),
            amount: 5,
        },
        &mut |out: Output<i64>| match out.into_result() {
            Ok(total) => rendered = format!("total: {total}"),
            Err(err) => rendered = format!("failed: {err}"),
        },
    );
    assert_eq!(rendered, "total: 15");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: whatever the amount, the guarded use case presents exactly
    /// once, and a non-negative amount is added unaltered.
    #[test]
    fn presents_exactly_once_for_any_amount(amount in -1_000i64..1_000i64) {
        let out = run(guarded(seeded()).as_ref(), "1000", amount);
        if amount >= 0 {
            prop_assert_eq!(out.answer, 10 + amount);
            prop_assert!(out.is_ok());
        } else {
            prop_assert_eq!(out.answer, 0);
            prop_assert_eq!(out.domain_error().map(|e| e.kind()), Some(ErrorKind::InvalidInput));
        }
    }
}
