use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;

use gasvault_core::{
    AccrualPeriod, CashFlow, CashFlowAccountant, ConstraintViolation, ContractTerms, EngineError,
    PriceOracle, StorageEvent, StorageLedger, ValidationError, ValuationWindow,
};

/// Candidate injection and withdrawal dates supplied by the caller. Order
/// does not matter; pools are sorted and deduplicated before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePool {
    pub injection_dates: Vec<Date>,
    pub withdrawal_dates: Vec<Date>,
}

impl CandidatePool {
    pub fn new(injection_dates: Vec<Date>, withdrawal_dates: Vec<Date>) -> Self {
        Self {
            injection_dates,
            withdrawal_dates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.injection_dates.is_empty() || self.withdrawal_dates.is_empty()
    }
}

/// Ranking function for candidate pairings. The exact heuristic is
/// configurable; `NetOfHoldingCost` is the default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadPolicy {
    /// Withdrawal price minus injection price minus accrued holding cost
    /// over the holding interval.
    #[default]
    NetOfHoldingCost,
    /// Price difference only; holding cost still hits the final valuation.
    Gross,
}

/// Optimizer configuration. One accrual granularity per run; mixing
/// granularities invalidates comparisons between schedules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub accrual: AccrualPeriod,
    pub window: Option<ValuationWindow>,
    pub spread_policy: SpreadPolicy,
    /// Rank pairings on rayon workers. Results are identical either way;
    /// acceptance is always strictly sequential.
    pub parallel_ranking: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            accrual: AccrualPeriod::default(),
            window: None,
            spread_policy: SpreadPolicy::default(),
            parallel_ranking: true,
        }
    }
}

/// One inject/withdraw pairing with its expected per-unit spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidatePairing {
    pub injection: Date,
    pub withdrawal: Date,
    pub volume: f64,
    pub spread: f64,
}

/// Why a ranked candidate was not accepted. Every rejection is recorded so
/// the heuristic stays auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    NonPositiveSpread,
    DateConsumed,
    Constraint { violation: ConstraintViolation },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub pairing: CandidatePairing,
    pub reason: SkipReason,
}

/// Output of one optimization run. Immutable; deterministic for identical
/// inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub total_value: f64,
    /// Accepted events in replay order.
    pub schedule: Vec<StorageEvent>,
    pub cash_flows: Vec<CashFlow>,
    pub skipped: Vec<SkippedCandidate>,
}

/// Greedy schedule search: rank all pairings by expected spread, then accept
/// them in order whenever the extended schedule still replays cleanly.
///
/// This is a deterministic heuristic, not a global optimizer. Ties in spread
/// break by earliest injection date, then earliest withdrawal date.
pub struct ScheduleOptimizer<'a> {
    oracle: &'a PriceOracle,
    terms: &'a ContractTerms,
    config: OptimizerConfig,
}

impl<'a> ScheduleOptimizer<'a> {
    pub fn new(
        oracle: &'a PriceOracle,
        terms: &'a ContractTerms,
        config: OptimizerConfig,
    ) -> Result<Self, ValidationError> {
        terms.validate()?;
        Ok(Self {
            oracle,
            terms,
            config,
        })
    }

    pub fn optimize(&self, pool: &CandidatePool) -> Result<ValuationResult, EngineError> {
        let volume = self.trade_volume();
        let mut schedule: Vec<StorageEvent> = Vec::new();
        let mut skipped = Vec::new();

        if !pool.is_empty() && volume > 0.0 {
            let ranked = self.rank_pairings(pool, volume)?;
            let mut used_injections: HashSet<Date> = HashSet::new();
            let mut used_withdrawals: HashSet<Date> = HashSet::new();

            for pairing in ranked {
                if pairing.spread <= 0.0 {
                    skipped.push(SkippedCandidate {
                        pairing,
                        reason: SkipReason::NonPositiveSpread,
                    });
                    continue;
                }

                if used_injections.contains(&pairing.injection)
                    || used_withdrawals.contains(&pairing.withdrawal)
                {
                    skipped.push(SkippedCandidate {
                        pairing,
                        reason: SkipReason::DateConsumed,
                    });
                    continue;
                }

                let mut tentative = schedule.clone();
                tentative.push(StorageEvent::inject(pairing.injection, pairing.volume)?);
                tentative.push(StorageEvent::withdraw(pairing.withdrawal, pairing.volume)?);

                let outcome = StorageLedger::replay(&tentative, self.terms)?;
                match outcome.violation {
                    None => {
                        schedule = tentative;
                        used_injections.insert(pairing.injection);
                        used_withdrawals.insert(pairing.withdrawal);
                    }
                    Some(violation) => {
                        skipped.push(SkippedCandidate {
                            pairing,
                            reason: SkipReason::Constraint { violation },
                        });
                    }
                }
            }
        }

        if let Some(window) = self.config.window {
            self.liquidate_remainder(&mut schedule, window)?;
        }

        self.finalize(schedule, skipped)
    }

    /// Phase 1: enumerate pairings (withdrawal strictly after injection) and
    /// score them. Computation may fan out over rayon workers; the sort makes
    /// the result order independent of worker scheduling.
    fn rank_pairings(
        &self,
        pool: &CandidatePool,
        volume: f64,
    ) -> Result<Vec<CandidatePairing>, EngineError> {
        let mut injections = pool.injection_dates.clone();
        injections.sort();
        injections.dedup();
        let mut withdrawals = pool.withdrawal_dates.clone();
        withdrawals.sort();
        withdrawals.dedup();

        let pairs: Vec<(Date, Date)> = injections
            .iter()
            .flat_map(|&inject| {
                withdrawals
                    .iter()
                    .filter(move |&&withdraw| withdraw > inject)
                    .map(move |&withdraw| (inject, withdraw))
            })
            .collect();

        let score = |&(injection, withdrawal): &(Date, Date)| {
            self.score_pairing(injection, withdrawal, volume)
        };

        let mut ranked: Vec<CandidatePairing> = if self.config.parallel_ranking {
            pairs.par_iter().map(score).collect::<Result<_, _>>()?
        } else {
            pairs.iter().map(score).collect::<Result<_, _>>()?
        };

        ranked.sort_by(|a, b| {
            b.spread
                .total_cmp(&a.spread)
                .then_with(|| a.injection.cmp(&b.injection))
                .then_with(|| a.withdrawal.cmp(&b.withdrawal))
        });

        Ok(ranked)
    }

    fn score_pairing(
        &self,
        injection: Date,
        withdrawal: Date,
        volume: f64,
    ) -> Result<CandidatePairing, EngineError> {
        let buy = self.oracle.price_at(injection)?;
        let sell = self.oracle.price_at(withdrawal)?;

        let holding_cost = match self.config.spread_policy {
            SpreadPolicy::NetOfHoldingCost => {
                let days = (withdrawal - injection).whole_days() as f64;
                self.terms.storage_cost_rate * days
            }
            SpreadPolicy::Gross => 0.0,
        };

        Ok(CandidatePairing {
            injection,
            withdrawal,
            volume,
            spread: sell - buy - holding_cost,
        })
    }

    /// Sells whatever is still in storage at the end of the contract window,
    /// capped by the withdrawal rate, if the ledger accepts the extra event.
    fn liquidate_remainder(
        &self,
        schedule: &mut Vec<StorageEvent>,
        window: ValuationWindow,
    ) -> Result<(), EngineError> {
        let outcome = StorageLedger::replay(schedule, self.terms)?;
        let remaining = outcome.final_volume();
        if remaining <= 0.0 {
            return Ok(());
        }

        let volume = remaining.min(self.terms.max_withdrawal_rate);
        let mut tentative = schedule.clone();
        tentative.push(StorageEvent::withdraw(window.end, volume)?);

        if StorageLedger::replay(&tentative, self.terms)?.accepted() {
            *schedule = tentative;
        }
        Ok(())
    }

    fn finalize(
        &self,
        schedule: Vec<StorageEvent>,
        skipped: Vec<SkippedCandidate>,
    ) -> Result<ValuationResult, EngineError> {
        let outcome = StorageLedger::replay(&schedule, self.terms)?;

        let mut accountant = CashFlowAccountant::new(self.config.accrual);
        if let Some(window) = self.config.window {
            accountant = accountant.with_window(window);
        }

        let cash_flows = accountant.price_schedule(&outcome, self.terms, self.oracle)?;
        let total_value = cash_flows.iter().map(|flow| flow.amount).sum();

        Ok(ValuationResult {
            total_value,
            schedule: outcome.events,
            cash_flows,
            skipped,
        })
    }

    fn trade_volume(&self) -> f64 {
        self.terms
            .max_injection_rate
            .min(self.terms.max_withdrawal_rate)
            .min(self.terms.capacity)
    }
}
