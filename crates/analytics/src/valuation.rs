//! Valuation and investment metrics.

/// Annualized net operating income: `(rent + other income - opex) * 12`.
///
/// All three inputs are monthly figures.
pub fn noi(rent_monthly_sum: f64, other_income_monthly: f64, opex_monthly: f64) -> f64 {
    (rent_monthly_sum + other_income_monthly - opex_monthly) * 12.0
}

/// Cap rate = NOI / value. Returns `0.0` when the value is not positive.
pub fn cap_rate(noi_annual: f64, value: f64) -> f64 {
    if value <= 0.0 { 0.0 } else { noi_annual / value }
}

/// Value implied by a market cap rate: NOI / cap rate.
///
/// A non-positive cap rate yields `f64::INFINITY`.
pub fn value_from_cap(noi_annual: f64, market_cap_rate: f64) -> f64 {
    if market_cap_rate <= 0.0 {
        f64::INFINITY
    } else {
        noi_annual / market_cap_rate
    }
}

/// Debt service coverage ratio: NOI / annual debt service.
pub fn dscr(noi_annual: f64, annual_debt_service: f64) -> f64 {
    if annual_debt_service <= 0.0 {
        0.0
    } else {
        noi_annual / annual_debt_service
    }
}

pub fn equity_multiple(total_distributions: f64, total_equity_invested: f64) -> f64 {
    if total_equity_invested <= 0.0 {
        0.0
    } else {
        total_distributions / total_equity_invested
    }
}

/// Stabilized NOI over total project cost.
pub fn yield_on_cost(stabilized_noi_annual: f64, total_project_cost: f64) -> f64 {
    if total_project_cost <= 0.0 {
        0.0
    } else {
        stabilized_noi_annual / total_project_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noi_annualizes_monthly_figures() {
        assert_relative_eq!(noi(5000.0, 0.0, 0.0), 60_000.0);
        assert_relative_eq!(noi(5000.0, 500.0, 1500.0), 48_000.0);
    }

    #[test]
    fn test_cap_rate_non_positive_value() {
        assert_eq!(cap_rate(60_000.0, 0.0), 0.0);
        assert_eq!(cap_rate(-60_000.0, -1.0), 0.0);
        assert_relative_eq!(cap_rate(60_000.0, 1_000_000.0), 0.06);
    }

    #[test]
    fn test_value_from_cap() {
        assert_relative_eq!(value_from_cap(60_000.0, 0.06), 1_000_000.0, epsilon = 1e-6);
        assert_eq!(value_from_cap(60_000.0, 0.0), f64::INFINITY);
        assert_eq!(value_from_cap(-10.0, -0.05), f64::INFINITY);
    }

    #[test]
    fn test_coverage_and_return_ratios() {
        assert_relative_eq!(dscr(120_000.0, 100_000.0), 1.2);
        assert_eq!(dscr(120_000.0, 0.0), 0.0);
        assert_relative_eq!(equity_multiple(250_000.0, 100_000.0), 2.5);
        assert_eq!(equity_multiple(250_000.0, 0.0), 0.0);
        assert_relative_eq!(yield_on_cost(70_000.0, 1_000_000.0), 0.07);
        assert_eq!(yield_on_cost(70_000.0, -5.0), 0.0);
    }
}
