use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Direction of a scheduled storage movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "inject")]
    Inject,
    #[serde(rename = "withdraw")]
    Withdraw,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inject => "inject",
            Self::Withdraw => "withdraw",
        }
    }

    /// Same-date ordering: injections apply before withdrawals.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Inject => 0,
            Self::Withdraw => 1,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inject" => Ok(Self::Inject),
            "withdraw" => Ok(Self::Withdraw),
            other => Err(ValidationError::InvalidEventKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// A single scheduled injection or withdrawal. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageEvent {
    pub date: Date,
    pub kind: EventKind,
    pub volume: f64,
}

impl StorageEvent {
    pub fn new(date: Date, kind: EventKind, volume: f64) -> Result<Self, ValidationError> {
        if !volume.is_finite() || volume <= 0.0 {
            return Err(ValidationError::InvalidEventVolume { date, volume });
        }
        Ok(Self { date, kind, volume })
    }

    pub fn inject(date: Date, volume: f64) -> Result<Self, ValidationError> {
        Self::new(date, EventKind::Inject, volume)
    }

    pub fn withdraw(date: Date, volume: f64) -> Result<Self, ValidationError> {
        Self::new(date, EventKind::Withdraw, volume)
    }

    /// Replay ordering key: chronological, injections first on ties.
    pub fn replay_order(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.kind.precedence().cmp(&other.kind.precedence()))
    }
}
