//! Insurance and risk transfer.

/// Replacement-cost estimate of the sum insured.
pub fn sum_insured_from_replacement_cost(bua_m2: f64, cost_rate_per_m2: f64) -> f64 {
    bua_m2 * cost_rate_per_m2
}

/// Expected annual cost after applying a per-claim deductible.
///
/// Each expected claim is reduced by the deductible, capped at the expected
/// claim size. With no expected claims the cost is returned unchanged.
pub fn deductible_effect_expected_cost(
    expected_annual_claim: f64,
    deductible: f64,
    claim_count_per_year: f64,
) -> f64 {
    if claim_count_per_year <= 0.0 {
        return expected_annual_claim;
    }
    let expected_per_claim = expected_annual_claim / claim_count_per_year;
    let reduction = deductible.min(expected_per_claim) * claim_count_per_year;
    (expected_annual_claim - reduction).max(0.0)
}
