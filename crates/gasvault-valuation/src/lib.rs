//! Schedule optimization and valuation reporting for gasvault.
//!
//! This crate contains:
//! - The greedy schedule optimizer (parallel ranking, sequential acceptance)
//! - Valuation summaries for external display
//! - Cost-rate sensitivity sweeps

pub mod optimizer;
pub mod report;
pub mod sensitivity;

pub use optimizer::{
    CandidatePairing, CandidatePool, OptimizerConfig, ScheduleOptimizer, SkipReason,
    SkippedCandidate, SpreadPolicy, ValuationResult,
};
pub use report::{summarize, ValuationSummary};
pub use sensitivity::{cost_rate_sensitivity, SensitivityPoint};
