//! Closed-form time-value-of-money helpers

use crate::household::non_negative;

/// Savings needed to fund `monthly_expenses` net of benefits at the given
/// annual withdrawal rate (0.04 for the 4% rule)
pub fn nest_egg_target(monthly_expenses: f64, monthly_benefits: f64, withdrawal_rate: f64) -> f64 {
    let net_spend = (non_negative(monthly_expenses) - non_negative(monthly_benefits)).max(0.0);
    if net_spend == 0.0 {
        return 0.0;
    }
    net_spend * 12.0 / withdrawal_rate
}

/// Future value of `principal` plus a level monthly `payment` after `months`
///
/// `FV = P(1+r)^n + PMT((1+r)^n - 1)/r`, or `P + PMT*n` when `r == 0`.
pub fn future_value(principal: f64, payment: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return principal + payment * n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    principal * growth + payment * (growth - 1.0) / monthly_rate
}

/// Level monthly contribution that grows to `gap` after `months`
pub fn required_monthly_contribution(gap: f64, monthly_rate: f64, months: u32) -> f64 {
    if gap <= 0.0 || months == 0 {
        return 0.0;
    }
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return gap / n;
    }
    gap * monthly_rate / ((1.0 + monthly_rate).powf(n) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_four_percent_rule_target() {
        assert_relative_eq!(nest_egg_target(4000.0, 0.0, 0.04), 1_200_000.0);
    }

    #[test]
    fn test_benefits_reduce_target() {
        assert_relative_eq!(nest_egg_target(4000.0, 1000.0, 0.04), 900_000.0);
        assert_eq!(nest_egg_target(1500.0, 1813.0, 0.04), 0.0);
        assert_eq!(nest_egg_target(0.0, 0.0, 0.04), 0.0);
    }

    #[test]
    fn test_future_value_zero_rate_is_linear() {
        assert_relative_eq!(future_value(10_000.0, 500.0, 0.0, 24), 22_000.0);
    }

    #[test]
    fn test_future_value_matches_monthly_loop() {
        let rate = 0.05 / 12.0;
        let mut balance = 25_000.0;
        for _ in 0..120 {
            balance += balance * rate;
            balance += 800.0;
        }
        assert_relative_eq!(future_value(25_000.0, 800.0, rate, 120), balance, max_relative = 1e-10);
    }

    #[test]
    fn test_contribution_closes_gap() {
        let rate = 0.05 / 12.0;
        let payment = required_monthly_contribution(100_000.0, rate, 120);
        assert_abs_diff_eq!(future_value(0.0, payment, rate, 120), 100_000.0, epsilon = 1e-6);

        assert_relative_eq!(required_monthly_contribution(12_000.0, 0.0, 12), 1000.0);
        assert_eq!(required_monthly_contribution(-5.0, rate, 12), 0.0);
        assert_eq!(required_monthly_contribution(5.0, rate, 0), 0.0);
    }
}
