use serde::{Deserialize, Serialize};

use gasvault_core::{CashFlow, CashFlowMemo};

use crate::ValuationResult;

/// Aggregated view of one valuation run, ready for an external collaborator
/// to print or serialize. The per-flow breakdown is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub total_value: f64,
    pub purchase_total: f64,
    pub sale_total: f64,
    pub holding_cost_total: f64,
    pub accepted_events: usize,
    pub skipped_candidates: usize,
    pub flows: Vec<CashFlow>,
}

/// Pure aggregation: sums the breakdown by memo kind. No side effects.
pub fn summarize(result: &ValuationResult) -> ValuationSummary {
    let mut purchase_total = 0.0;
    let mut sale_total = 0.0;
    let mut holding_cost_total = 0.0;

    for flow in &result.cash_flows {
        match flow.memo {
            CashFlowMemo::Purchase { .. } => purchase_total += flow.amount,
            CashFlowMemo::Sale { .. } => sale_total += flow.amount,
            CashFlowMemo::HoldingCost { .. } => holding_cost_total += flow.amount,
        }
    }

    ValuationSummary {
        total_value: result.total_value,
        purchase_total,
        sale_total,
        holding_cost_total,
        accepted_events: result.schedule.len(),
        skipped_candidates: result.skipped.len(),
        flows: result.cash_flows.clone(),
    }
}
