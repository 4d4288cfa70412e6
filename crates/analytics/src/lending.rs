//! Lending and borrower affordability ratios.

/// Loan-to-value. Returns `0.0` when the property value is not positive.
pub fn ltv(current_loan_balance: f64, property_value: f64) -> f64 {
    if property_value <= 0.0 {
        0.0
    } else {
        current_loan_balance / property_value
    }
}

/// Combined loan-to-value over the balance of every recorded lien.
pub fn cltv(total_liens_balance: f64, property_value: f64) -> f64 {
    if property_value <= 0.0 {
        0.0
    } else {
        total_liens_balance / property_value
    }
}

/// Debt-to-income on monthly figures.
pub fn dti(monthly_debt_obligations: f64, monthly_gross_income: f64) -> f64 {
    if monthly_gross_income <= 0.0 {
        0.0
    } else {
        monthly_debt_obligations / monthly_gross_income
    }
}

pub fn residual_income(monthly_income: f64, monthly_expenses_ex_debt: f64, monthly_debt: f64) -> f64 {
    monthly_income - (monthly_expenses_ex_debt + monthly_debt)
}
