// Shared fixtures for gasvault integration tests.
use time::macros::date;
use time::Date;

use gasvault_core::{ContractTerms, ExtrapolationPolicy, PriceOracle, PricePoint};

/// Four years of month-end natural gas observations, seasonal winters high
/// and summers low.
pub const NATURAL_GAS_OBSERVATIONS: [(Date, f64); 48] = [
    (date!(2020 - 10 - 31), 10.1),
    (date!(2020 - 11 - 30), 10.3),
    (date!(2020 - 12 - 31), 11.0),
    (date!(2021 - 01 - 31), 10.9),
    (date!(2021 - 02 - 28), 10.9),
    (date!(2021 - 03 - 31), 10.9),
    (date!(2021 - 04 - 30), 10.4),
    (date!(2021 - 05 - 31), 9.84),
    (date!(2021 - 06 - 30), 10.0),
    (date!(2021 - 07 - 31), 10.1),
    (date!(2021 - 08 - 31), 10.3),
    (date!(2021 - 09 - 30), 10.2),
    (date!(2021 - 10 - 31), 10.1),
    (date!(2021 - 11 - 30), 11.2),
    (date!(2021 - 12 - 31), 11.4),
    (date!(2022 - 01 - 31), 11.5),
    (date!(2022 - 02 - 28), 11.8),
    (date!(2022 - 03 - 31), 11.5),
    (date!(2022 - 04 - 30), 10.7),
    (date!(2022 - 05 - 31), 10.7),
    (date!(2022 - 06 - 30), 10.4),
    (date!(2022 - 07 - 31), 10.5),
    (date!(2022 - 08 - 31), 10.4),
    (date!(2022 - 09 - 30), 10.8),
    (date!(2022 - 10 - 31), 11.0),
    (date!(2022 - 11 - 30), 11.6),
    (date!(2022 - 12 - 31), 11.6),
    (date!(2023 - 01 - 31), 12.1),
    (date!(2023 - 02 - 28), 11.7),
    (date!(2023 - 03 - 31), 12.0),
    (date!(2023 - 04 - 30), 11.5),
    (date!(2023 - 05 - 31), 11.2),
    (date!(2023 - 06 - 30), 10.9),
    (date!(2023 - 07 - 31), 11.4),
    (date!(2023 - 08 - 31), 11.1),
    (date!(2023 - 09 - 30), 11.5),
    (date!(2023 - 10 - 31), 11.8),
    (date!(2023 - 11 - 30), 12.2),
    (date!(2023 - 12 - 31), 12.8),
    (date!(2024 - 01 - 31), 12.6),
    (date!(2024 - 02 - 29), 12.4),
    (date!(2024 - 03 - 31), 12.7),
    (date!(2024 - 04 - 30), 12.1),
    (date!(2024 - 05 - 31), 11.4),
    (date!(2024 - 06 - 30), 11.5),
    (date!(2024 - 07 - 31), 11.6),
    (date!(2024 - 08 - 31), 11.5),
    (date!(2024 - 09 - 30), 11.8),
];

pub fn natural_gas_curve(policy: ExtrapolationPolicy) -> PriceOracle {
    let points = NATURAL_GAS_OBSERVATIONS
        .iter()
        .map(|&(date, price)| PricePoint::new(date, price))
        .collect();
    PriceOracle::new(points, policy).expect("fixture series is valid")
}

/// Terms matching the reference seasonal scenario: 100 units of capacity,
/// 50 units per event either direction.
pub fn seasonal_terms(storage_cost_rate: f64) -> ContractTerms {
    ContractTerms::new(100.0, 50.0, 50.0, storage_cost_rate).expect("fixture terms are valid")
}
