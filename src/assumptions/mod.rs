//! Planning and market assumptions shared by the engine and goal solvers
//!
//! The rule-of-thumb constants (4% withdrawal, 5% quick-estimate return, 3%
//! target inflation) live here and are passed into solver functions.

use std::env;

use crate::error::AssumptionError;

/// Sustainable withdrawal rate of the 4% rule
pub const DEFAULT_WITHDRAWAL_RATE: f64 = 0.04;

/// Annual return used by the closed-form "years to retire" estimates
pub const DEFAULT_QUICK_ANNUAL_RETURN: f64 = 0.05;

/// Annual growth applied to the nest-egg target in the retirement scans
pub const DEFAULT_TARGET_INFLATION: f64 = 0.03;

/// Default annual rate of return (%) for full projections
pub const DEFAULT_ANNUAL_RETURN_PCT: f64 = 5.0;

/// Default annual inflation (%) for full projections
pub const DEFAULT_ANNUAL_INFLATION_PCT: f64 = 3.0;

/// Constants used by the goal solvers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningAssumptions {
    /// Fraction of the portfolio withdrawn per year (0.04 = 4%)
    pub withdrawal_rate: f64,

    /// Annual return for quick estimates, as a fraction (0.05 = 5%)
    pub quick_annual_return: f64,

    /// Annual growth of the nest-egg target, as a fraction
    pub target_inflation: f64,

    /// Cap on the years-until-retirement scan
    pub max_scan_years: u32,

    /// Cap on the retire-later scan
    pub max_retirement_age: u32,

    /// Iterations of the sustainable-spend bisection
    pub bisection_iterations: u32,

    /// Minimum upper bound of the sustainable-spend bisection
    pub bisection_floor: f64,

    /// Horizon used for the "retire in N years" options when none is implied
    pub default_target_years: u32,
}

impl Default for PlanningAssumptions {
    fn default() -> Self {
        Self {
            withdrawal_rate: DEFAULT_WITHDRAWAL_RATE,
            quick_annual_return: DEFAULT_QUICK_ANNUAL_RETURN,
            target_inflation: DEFAULT_TARGET_INFLATION,
            max_scan_years: 100,
            max_retirement_age: 100,
            bisection_iterations: 20,
            bisection_floor: 100_000.0,
            default_target_years: 10,
        }
    }
}

impl PlanningAssumptions {
    /// Create assumptions with custom rates, validating their ranges
    pub fn new(
        withdrawal_rate: f64,
        quick_annual_return: f64,
        target_inflation: f64,
        bisection_iterations: u32,
    ) -> Result<Self, AssumptionError> {
        let assumptions = Self {
            withdrawal_rate,
            quick_annual_return,
            target_inflation,
            bisection_iterations,
            ..Self::default()
        };
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Defaults overridden by WITHDRAWAL_RATE, QUICK_ANNUAL_RETURN,
    /// TARGET_INFLATION and BISECTION_ITERATIONS when set
    pub fn from_env() -> Result<Self, AssumptionError> {
        let defaults = Self::default();
        Self::new(
            env_or("WITHDRAWAL_RATE", defaults.withdrawal_rate)?,
            env_or("QUICK_ANNUAL_RETURN", defaults.quick_annual_return)?,
            env_or("TARGET_INFLATION", defaults.target_inflation)?,
            env_or("BISECTION_ITERATIONS", defaults.bisection_iterations)?,
        )
    }

    pub fn validate(&self) -> Result<(), AssumptionError> {
        check_rate("withdrawal_rate", self.withdrawal_rate)?;
        check_rate("quick_annual_return", self.quick_annual_return)?;
        // Zero target inflation is allowed
        if !(0.0..=1.0).contains(&self.target_inflation) {
            return Err(AssumptionError::RateOutOfRange {
                name: "target_inflation",
                value: self.target_inflation,
            });
        }
        if self.bisection_iterations == 0 {
            return Err(AssumptionError::NoIterations);
        }
        Ok(())
    }

    /// Monthly rate for the closed-form estimates (annual / 12)
    pub fn quick_monthly_rate(&self) -> f64 {
        self.quick_annual_return / 12.0
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), AssumptionError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(AssumptionError::RateOutOfRange { name, value })
    }
}

fn env_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, AssumptionError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| AssumptionError::BadEnvVar { var, value }),
        Err(_) => Ok(default),
    }
}

/// Market rates for a full projection, in percent per year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketAssumptions {
    pub annual_return_pct: f64,
    pub annual_inflation_pct: f64,
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            annual_return_pct: DEFAULT_ANNUAL_RETURN_PCT,
            annual_inflation_pct: DEFAULT_ANNUAL_INFLATION_PCT,
        }
    }
}

impl MarketAssumptions {
    pub fn new(annual_return_pct: f64, annual_inflation_pct: f64) -> Self {
        Self {
            annual_return_pct,
            annual_inflation_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let assumptions = PlanningAssumptions::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.withdrawal_rate, 0.04);
        assert_eq!(assumptions.bisection_iterations, 20);
    }

    #[test]
    fn test_out_of_range_rates_rejected() {
        assert_eq!(
            PlanningAssumptions::new(0.0, 0.05, 0.03, 20),
            Err(AssumptionError::RateOutOfRange { name: "withdrawal_rate", value: 0.0 })
        );
        assert!(PlanningAssumptions::new(0.04, 1.5, 0.03, 20).is_err());
        assert!(PlanningAssumptions::new(0.04, 0.05, -0.01, 20).is_err());
        assert_eq!(PlanningAssumptions::new(0.04, 0.05, 0.03, 0), Err(AssumptionError::NoIterations));
        assert!(PlanningAssumptions::new(0.035, 0.06, 0.0, 30).is_ok());
    }

    #[test]
    fn test_quick_monthly_rate() {
        let assumptions = PlanningAssumptions::default();
        assert!((assumptions.quick_monthly_rate() - 0.05 / 12.0).abs() < 1e-15);
    }
}
