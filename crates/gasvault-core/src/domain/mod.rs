mod cashflow;
mod event;
mod terms;

pub use cashflow::{CashFlow, CashFlowMemo};
pub use event::{EventKind, StorageEvent};
pub use terms::{ContractTerms, ValuationWindow};
