use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    CashFlow, ContractTerms, EngineError, EventKind, PriceOracle, ReplayOutcome, ValuationWindow,
};

/// Bucketing granularity for holding-cost flows. The accrued amount is the
/// same either way (volume x rate x days); the period only controls how flows
/// are emitted. One granularity per valuation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualPeriod {
    #[default]
    Daily,
    Monthly,
}

/// Converts a replayed schedule into dated cash flows: purchase and sale
/// proceeds per event, plus holding costs on every interval where volume is
/// in storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowAccountant {
    accrual: AccrualPeriod,
    window: Option<ValuationWindow>,
}

impl CashFlowAccountant {
    pub fn new(accrual: AccrualPeriod) -> Self {
        Self {
            accrual,
            window: None,
        }
    }

    /// Extends holding-cost accrual over the contract window: from
    /// `window.start` on the initial volume and from the last event to
    /// `window.end` on the final volume.
    pub fn with_window(mut self, window: ValuationWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn accrual(&self) -> AccrualPeriod {
        self.accrual
    }

    /// Prices every applied event against the oracle and emits holding-cost
    /// flows per accrual bucket. Output is date-ordered; same-date event
    /// flows precede that date's holding flow. Flows are never merged.
    pub fn price_schedule(
        &self,
        outcome: &ReplayOutcome,
        terms: &ContractTerms,
        oracle: &PriceOracle,
    ) -> Result<Vec<CashFlow>, EngineError> {
        let mut flows = Vec::with_capacity(outcome.events.len());

        for event in &outcome.events {
            let price = oracle.price_at(event.date)?;
            flows.push(match event.kind {
                EventKind::Inject => CashFlow::purchase(event.date, event.volume, price),
                EventKind::Withdraw => CashFlow::sale(event.date, event.volume, price),
            });
        }

        if terms.storage_cost_rate > 0.0 {
            for (start, end, volume) in self.holding_segments(outcome) {
                if volume > 0.0 && end > start {
                    self.emit_holding_flows(&mut flows, start, end, volume, terms);
                }
            }
        }

        flows.sort_by_key(|flow| flow.date);
        Ok(flows)
    }

    /// Intervals `[start, end)` during which a constant `volume` is held.
    fn holding_segments(&self, outcome: &ReplayOutcome) -> Vec<(Date, Date, f64)> {
        let mut segments = Vec::new();

        if let Some(window) = self.window {
            let until = outcome
                .trajectory
                .first()
                .map_or(window.end, |point| point.date);
            segments.push((window.start, until, outcome.initial_volume));
        }

        for pair in outcome.trajectory.windows(2) {
            segments.push((pair[0].date, pair[1].date, pair[0].volume));
        }

        if let Some(window) = self.window {
            if let Some(last) = outcome.trajectory.last() {
                segments.push((last.date, window.end, last.volume));
            }
        }

        segments
    }

    fn emit_holding_flows(
        &self,
        flows: &mut Vec<CashFlow>,
        start: Date,
        end: Date,
        volume: f64,
        terms: &ContractTerms,
    ) {
        let daily_cost = volume * terms.storage_cost_rate;

        match self.accrual {
            AccrualPeriod::Daily => {
                let mut day = start;
                while day < end {
                    let next = day.next_day().expect("date within supported range");
                    flows.push(CashFlow::holding_cost(day, next, daily_cost));
                    day = next;
                }
            }
            AccrualPeriod::Monthly => {
                let mut chunk_start = start;
                while chunk_start < end {
                    let chunk_end = next_month_start(chunk_start).min(end);
                    let days = (chunk_end - chunk_start).whole_days() as f64;
                    flows.push(CashFlow::holding_cost(
                        chunk_start,
                        chunk_end,
                        daily_cost * days,
                    ));
                    chunk_start = chunk_end;
                }
            }
        }
    }
}

fn next_month_start(date: Date) -> Date {
    let month = date.month().next();
    let year = if month == Month::January {
        date.year() + 1
    } else {
        date.year()
    };
    Date::from_calendar_date(year, month, 1).expect("first of month is always valid")
}
