//! Behavior of the storage ledger and oracle under constraint pressure.

use time::macros::date;

use gasvault_core::{
    ContractTerms, EngineError, EventKind, ExtrapolationPolicy, StorageEvent, StorageLedger,
    ValidationError, ViolationKind,
};

use gasvault_tests::{natural_gas_curve, seasonal_terms, NATURAL_GAS_OBSERVATIONS};

#[test]
fn overdrawing_storage_reports_the_violating_event() {
    // Given: 50 units in storage and a request to withdraw 60.
    let mut terms = seasonal_terms(0.01);
    terms.max_withdrawal_rate = 80.0;
    let events = vec![
        StorageEvent::inject(date!(2021 - 06 - 30), 50.0).expect("valid event"),
        StorageEvent::withdraw(date!(2021 - 12 - 31), 60.0).expect("valid event"),
    ];

    // When: the schedule is replayed.
    let outcome = StorageLedger::replay(&events, &terms).expect("valid config");

    // Then: the replay halts at the withdrawal with the trajectory up to it.
    assert!(!outcome.accepted());
    assert_eq!(outcome.trajectory.len(), 1);
    assert_eq!(outcome.trajectory[0].volume, 50.0);

    let violation = outcome.violation.expect("violation recorded");
    assert_eq!(violation.event.kind, EventKind::Withdraw);
    assert_eq!(violation.event.date, date!(2021 - 12 - 31));
    assert!(matches!(
        violation.kind,
        ViolationKind::InsufficientInventory { .. }
    ));
}

#[test]
fn events_are_replayed_in_date_order_regardless_of_input_order() {
    let terms = seasonal_terms(0.01);
    // Withdrawal listed before the injection that funds it.
    let events = vec![
        StorageEvent::withdraw(date!(2021 - 12 - 31), 50.0).expect("valid event"),
        StorageEvent::inject(date!(2021 - 06 - 30), 50.0).expect("valid event"),
    ];

    let outcome = StorageLedger::replay(&events, &terms).expect("valid config");
    assert!(outcome.accepted());
    assert_eq!(outcome.events[0].kind, EventKind::Inject);
    assert_eq!(outcome.final_volume(), 0.0);
}

#[test]
fn rate_limits_apply_per_event() {
    let terms = seasonal_terms(0.01);
    let inject = vec![StorageEvent::inject(date!(2021 - 06 - 30), 51.0).expect("valid event")];
    let outcome = StorageLedger::replay(&inject, &terms).expect("valid config");
    assert!(matches!(
        outcome.violation.expect("violation recorded").kind,
        ViolationKind::InjectionRateExceeded { .. }
    ));

    let withdraw = vec![StorageEvent::withdraw(date!(2021 - 06 - 30), 51.0).expect("valid event")];
    let mut terms = seasonal_terms(0.01);
    terms.initial_volume = 100.0;
    let outcome = StorageLedger::replay(&withdraw, &terms).expect("valid config");
    assert!(matches!(
        outcome.violation.expect("violation recorded").kind,
        ViolationKind::WithdrawalRateExceeded { .. }
    ));
}

#[test]
fn malformed_events_fail_before_any_replay() {
    let terms = seasonal_terms(0.01);
    let mut event = StorageEvent::inject(date!(2021 - 06 - 30), 50.0).expect("valid event");
    event.volume = -1.0;

    let err = StorageLedger::replay(&[event], &terms).expect_err("must fail");
    assert!(matches!(err, ValidationError::InvalidEventVolume { .. }));
}

#[test]
fn oracle_is_exact_at_every_observation() {
    let oracle = natural_gas_curve(ExtrapolationPolicy::Reject);
    for &(date, price) in &NATURAL_GAS_OBSERVATIONS {
        assert_eq!(oracle.price_at(date).expect("knot in range"), price);
    }
}

#[test]
fn oracle_brackets_mid_month_queries() {
    let oracle = natural_gas_curve(ExtrapolationPolicy::Reject);
    // Between 9.84 (2021-05-31) and 10.0 (2021-06-30).
    let price = oracle.price_at(date!(2021 - 06 - 15)).expect("in range");
    assert!(price > 9.84 && price < 10.0, "price {price}");
}

#[test]
fn oracle_rejects_dates_outside_the_series() {
    let oracle = natural_gas_curve(ExtrapolationPolicy::Reject);
    let err = oracle
        .price_at(date!(2020 - 01 - 01))
        .expect_err("must fail");
    assert!(matches!(err, EngineError::PriceOutOfRange { .. }));
}

#[test]
fn clamping_oracle_extends_the_endpoints() {
    let oracle = natural_gas_curve(ExtrapolationPolicy::ClampToNearest);
    assert_eq!(
        oracle.price_at(date!(2020 - 01 - 01)).expect("clamped"),
        10.1
    );
    assert_eq!(
        oracle.price_at(date!(2025 - 01 - 01)).expect("clamped"),
        11.8
    );
}

#[test]
fn zero_capacity_is_valid_but_rejects_all_injections() {
    let terms = ContractTerms::new(0.0, 50.0, 50.0, 0.01).expect("zero capacity is legal");
    let events = vec![StorageEvent::inject(date!(2021 - 06 - 30), 1.0).expect("valid event")];
    let outcome = StorageLedger::replay(&events, &terms).expect("valid config");
    assert!(matches!(
        outcome.violation.expect("violation recorded").kind,
        ViolationKind::CapacityExceeded { .. }
    ));
}
