use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Commercial terms of one storage contract. Immutable for a valuation run.
///
/// Rates are per event; a capacity of exactly zero is legal and simply makes
/// every injection a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub capacity: f64,
    pub max_injection_rate: f64,
    pub max_withdrawal_rate: f64,
    /// Holding cost in currency per unit of volume per day.
    pub storage_cost_rate: f64,
    #[serde(default)]
    pub initial_volume: f64,
}

impl ContractTerms {
    pub fn new(
        capacity: f64,
        max_injection_rate: f64,
        max_withdrawal_rate: f64,
        storage_cost_rate: f64,
    ) -> Result<Self, ValidationError> {
        let terms = Self {
            capacity,
            max_injection_rate,
            max_withdrawal_rate,
            storage_cost_rate,
            initial_volume: 0.0,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn with_initial_volume(mut self, volume: f64) -> Result<Self, ValidationError> {
        self.initial_volume = volume;
        self.validate()?;
        Ok(self)
    }

    pub fn with_storage_cost_rate(mut self, rate: f64) -> Result<Self, ValidationError> {
        self.storage_cost_rate = rate;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(ValidationError::InvalidCapacity {
                value: self.capacity,
            });
        }

        if !self.max_injection_rate.is_finite() || self.max_injection_rate <= 0.0 {
            return Err(ValidationError::NonPositiveRate {
                field: "max_injection_rate",
                value: self.max_injection_rate,
            });
        }

        if !self.max_withdrawal_rate.is_finite() || self.max_withdrawal_rate <= 0.0 {
            return Err(ValidationError::NonPositiveRate {
                field: "max_withdrawal_rate",
                value: self.max_withdrawal_rate,
            });
        }

        if !self.storage_cost_rate.is_finite() || self.storage_cost_rate < 0.0 {
            return Err(ValidationError::InvalidStorageCostRate {
                value: self.storage_cost_rate,
            });
        }

        if !self.initial_volume.is_finite()
            || self.initial_volume < 0.0
            || self.initial_volume > self.capacity
        {
            return Err(ValidationError::InitialVolumeOutOfBounds {
                volume: self.initial_volume,
                capacity: self.capacity,
            });
        }

        Ok(())
    }
}

/// Contract window over which holding cost accrues and at whose end any
/// remaining inventory may be liquidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationWindow {
    pub start: Date,
    pub end: Date,
}

impl ValuationWindow {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }
}
