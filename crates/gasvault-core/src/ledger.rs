use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use crate::{ContractTerms, EventKind, StorageEvent, ValidationError};

/// Which physical constraint an event breached.
#[derive(Debug, Error, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    #[error("injection of {volume} exceeds max injection rate {limit}")]
    InjectionRateExceeded { volume: f64, limit: f64 },
    #[error("injection of {volume} with {current} stored would exceed capacity {capacity}")]
    CapacityExceeded {
        volume: f64,
        current: f64,
        capacity: f64,
    },
    #[error("withdrawal of {volume} exceeds max withdrawal rate {limit}")]
    WithdrawalRateExceeded { volume: f64, limit: f64 },
    #[error("withdrawal of {volume} exceeds the {current} units in storage")]
    InsufficientInventory { volume: f64, current: f64 },
}

/// A rejected event together with where in the replay it failed.
///
/// Not an error-channel type: replay returns it inside `ReplayOutcome` so the
/// caller keeps the partial trajectory and can decide to drop and retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub event: StorageEvent,
    pub kind: ViolationKind,
    /// Position of the event in replay (sorted) order.
    pub index: usize,
}

/// Volume in storage immediately after one applied event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoragePoint {
    pub date: Date,
    pub volume: f64,
}

/// Mutable state threaded through one replay. Owned exclusively by that
/// replay; never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageState {
    pub volume: f64,
    pub last_event_date: Option<Date>,
}

impl StorageState {
    pub fn starting_at(volume: f64) -> Self {
        Self {
            volume,
            last_event_date: None,
        }
    }
}

/// Result of replaying a schedule: the trajectory of every applied event,
/// plus the first violation if the replay halted early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub initial_volume: f64,
    /// Applied events in replay order; excludes the violating event, if any.
    pub events: Vec<StorageEvent>,
    pub trajectory: Vec<StoragePoint>,
    pub violation: Option<ConstraintViolation>,
}

impl ReplayOutcome {
    pub fn accepted(&self) -> bool {
        self.violation.is_none()
    }

    /// Volume in storage after the last applied event.
    pub fn final_volume(&self) -> f64 {
        self.trajectory
            .last()
            .map_or(self.initial_volume, |point| point.volume)
    }
}

/// Pure transition function: applies one event to the state or reports the
/// violated constraint. Never mutates its inputs.
pub fn apply_event(
    state: StorageState,
    event: &StorageEvent,
    terms: &ContractTerms,
) -> Result<StorageState, ViolationKind> {
    let next_volume = match event.kind {
        EventKind::Inject => {
            if event.volume > terms.max_injection_rate {
                return Err(ViolationKind::InjectionRateExceeded {
                    volume: event.volume,
                    limit: terms.max_injection_rate,
                });
            }
            if state.volume + event.volume > terms.capacity {
                return Err(ViolationKind::CapacityExceeded {
                    volume: event.volume,
                    current: state.volume,
                    capacity: terms.capacity,
                });
            }
            state.volume + event.volume
        }
        EventKind::Withdraw => {
            if event.volume > terms.max_withdrawal_rate {
                return Err(ViolationKind::WithdrawalRateExceeded {
                    volume: event.volume,
                    limit: terms.max_withdrawal_rate,
                });
            }
            if event.volume > state.volume {
                return Err(ViolationKind::InsufficientInventory {
                    volume: event.volume,
                    current: state.volume,
                });
            }
            state.volume - event.volume
        }
    };

    Ok(StorageState {
        volume: next_volume,
        last_event_date: Some(event.date),
    })
}

/// Deterministic, side-effect-free replay of a proposed schedule.
pub struct StorageLedger;

impl StorageLedger {
    /// Sorts a copy of `events` by (date, injections-first) and folds
    /// `apply_event` from `terms.initial_volume`, halting at the first
    /// violation. Terms are validated up front; a bad configuration is fatal
    /// rather than a per-event violation.
    pub fn replay(
        events: &[StorageEvent],
        terms: &ContractTerms,
    ) -> Result<ReplayOutcome, ValidationError> {
        terms.validate()?;
        for event in events {
            if !event.volume.is_finite() || event.volume <= 0.0 {
                return Err(ValidationError::InvalidEventVolume {
                    date: event.date,
                    volume: event.volume,
                });
            }
        }

        let mut ordered = events.to_vec();
        ordered.sort_by(StorageEvent::replay_order);

        let mut state = StorageState::starting_at(terms.initial_volume);
        let mut applied = Vec::with_capacity(ordered.len());
        let mut trajectory = Vec::with_capacity(ordered.len());
        let mut violation = None;

        for (index, event) in ordered.into_iter().enumerate() {
            match apply_event(state, &event, terms) {
                Ok(next) => {
                    state = next;
                    trajectory.push(StoragePoint {
                        date: event.date,
                        volume: state.volume,
                    });
                    applied.push(event);
                }
                Err(kind) => {
                    violation = Some(ConstraintViolation { event, kind, index });
                    break;
                }
            }
        }

        Ok(ReplayOutcome {
            initial_volume: terms.initial_volume,
            events: applied,
            trajectory,
            violation,
        })
    }
}
