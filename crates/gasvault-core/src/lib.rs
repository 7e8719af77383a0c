//! Core contracts for gasvault.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The interpolating price oracle
//! - The storage ledger (constraint-checked schedule replay)
//! - Cash-flow accounting for validated schedules

pub mod accountant;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod oracle;

pub use accountant::{AccrualPeriod, CashFlowAccountant};
pub use domain::{
    CashFlow, CashFlowMemo, ContractTerms, EventKind, StorageEvent, ValuationWindow,
};
pub use error::{EngineError, ValidationError};
pub use ledger::{
    ConstraintViolation, ReplayOutcome, StorageLedger, StoragePoint, StorageState, ViolationKind,
};
pub use oracle::{ExtrapolationPolicy, PriceOracle, PricePoint};
