use serde::{Deserialize, Serialize};
use time::Date;

/// What a cash flow is attributable to. Flows are never merged, so every
/// amount in a valuation stays traceable to one event or accrual bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CashFlowMemo {
    Purchase { volume: f64, price: f64 },
    Sale { volume: f64, price: f64 },
    HoldingCost { from: Date, until: Date },
}

/// One dated cash flow. Negative amounts are purchases and holding costs,
/// positive amounts are sale proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: Date,
    pub amount: f64,
    pub memo: CashFlowMemo,
}

impl CashFlow {
    pub fn purchase(date: Date, volume: f64, price: f64) -> Self {
        Self {
            date,
            amount: -(volume * price),
            memo: CashFlowMemo::Purchase { volume, price },
        }
    }

    pub fn sale(date: Date, volume: f64, price: f64) -> Self {
        Self {
            date,
            amount: volume * price,
            memo: CashFlowMemo::Sale { volume, price },
        }
    }

    pub fn holding_cost(from: Date, until: Date, amount: f64) -> Self {
        Self {
            date: from,
            amount: -amount.abs(),
            memo: CashFlowMemo::HoldingCost { from, until },
        }
    }
}
