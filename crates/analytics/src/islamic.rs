//! Islamic finance structures (Murabaha, Ijara).
//!
//! These carry no interest mechanics: the Murabaha markup is a profit agreed up
//! front and the Ijara rent is a flat proxy on the asset cost.

/// Equal monthly installments of a Murabaha sale price.
///
/// The sale price is `cost_price * (1 + profit_markup)`. With no installment
/// months the whole price is returned as a single payment.
pub fn murabaha_equal_installments_schedule(cost_price: f64, profit_markup: f64, months: i32) -> Vec<f64> {
    let total_price = cost_price * (1.0 + profit_markup);
    if months <= 0 {
        return vec![total_price];
    }
    let installment = total_price / f64::from(months);
    vec![installment; months as usize]
}

/// Monthly Ijara rent proxy: `asset_cost * annual_profit_rate / 12`.
///
/// The lease term does not change the monthly figure.
pub fn ijara_monthly_rent(asset_cost: f64, annual_profit_rate: f64, _months: i32) -> f64 {
    asset_cost * annual_profit_rate / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_murabaha_twelve_months() {
        let schedule = murabaha_equal_installments_schedule(100_000.0, 0.1, 12);
        assert_eq!(schedule.len(), 12);
        for installment in &schedule {
            assert_relative_eq!(*installment, 110_000.0 / 12.0, epsilon = 1e-6);
        }
        assert_relative_eq!(schedule.iter().sum::<f64>(), 110_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_murabaha_without_months_is_single_payment() {
        let schedule = murabaha_equal_installments_schedule(100_000.0, 0.1, 0);
        assert_eq!(schedule.len(), 1);
        assert_relative_eq!(schedule[0], 110_000.0, epsilon = 1e-6);
        assert_eq!(murabaha_equal_installments_schedule(50.0, 0.0, -3), vec![50.0]);
    }

    #[test]
    fn test_ijara_rent() {
        assert_relative_eq!(ijara_monthly_rent(1_200_000.0, 0.06, 60), 6_000.0, epsilon = 1e-6);
    }
}
