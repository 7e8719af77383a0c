use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use gasvault_core::{ContractTerms, EngineError, PriceOracle};

use crate::{CandidatePool, OptimizerConfig, ScheduleOptimizer};

/// Total contract value under one storage cost rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub storage_cost_rate: f64,
    pub total_value: f64,
}

/// Runs one independent optimization per cost rate and reports the values in
/// input order. Runs share the oracle read-only; each owns its terms copy,
/// so the sweep parallelizes safely.
pub fn cost_rate_sensitivity(
    oracle: &PriceOracle,
    terms: &ContractTerms,
    pool: &CandidatePool,
    config: OptimizerConfig,
    rates: &[f64],
) -> Result<Vec<SensitivityPoint>, EngineError> {
    rates
        .par_iter()
        .map(|&rate| {
            let terms = terms.with_storage_cost_rate(rate)?;
            let optimizer = ScheduleOptimizer::new(oracle, &terms, config)?;
            let result = optimizer.optimize(pool)?;
            Ok(SensitivityPoint {
                storage_cost_rate: rate,
                total_value: result.total_value,
            })
        })
        .collect()
}
