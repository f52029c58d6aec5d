use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::{AccrualWindow, DayCountConvention, InterestCalculation};

/// simple (non-compounding) interest calculator for credit purchases
///
/// The monthly rate is applied once per elapsed month. Inputs are taken as
/// given: the calculator never validates amounts or rates and never fails.
/// A window ending before it starts accrues nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterestCalculator {
    pub convention: DayCountConvention,
}

impl InterestCalculator {
    pub fn new(convention: DayCountConvention) -> Self {
        Self { convention }
    }

    /// days elapsed between the dates under the configured convention
    pub fn elapsed_days(&self, start_date: NaiveDate, end_date: NaiveDate) -> u32 {
        self.convention.days(start_date, end_date)
    }

    /// fractional months elapsed between the dates, never negative and never rounded
    pub fn elapsed_months(&self, start_date: NaiveDate, end_date: NaiveDate) -> Decimal {
        let days = self.elapsed_days(start_date, end_date);
        self.convention.months_for_days(days)
    }

    /// accrued interest at full precision
    pub fn interest_amount(
        &self,
        principal: Money,
        monthly_rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Money {
        let days = self.elapsed_days(start_date, end_date);
        self.interest_for_days(principal, monthly_rate, days)
    }

    /// principal plus accrued interest
    pub fn total_with_interest(
        &self,
        principal: Money,
        monthly_rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Money {
        principal + self.interest_amount(principal, monthly_rate, start_date, end_date)
    }

    /// evaluate an accrual window, resolving an open end against `today`
    pub fn calculate(
        &self,
        principal: Money,
        monthly_rate: Rate,
        window: AccrualWindow,
        today: NaiveDate,
    ) -> InterestCalculation {
        let end_date = window.end_or(today);
        let days = self.elapsed_days(window.start, end_date);
        let interest = self.interest_for_days(principal, monthly_rate, days);

        tracing::debug!(
            start = %window.start,
            end = %end_date,
            days,
            convention = self.convention.label(),
            "interest evaluated"
        );

        InterestCalculation {
            principal,
            monthly_rate,
            start_date: window.start,
            end_date,
            open_ended: window.end.is_none(),
            elapsed_days: days,
            elapsed_months: self.convention.months_for_days(days),
            interest_amount: interest,
            total_with_interest: principal + interest,
            convention: self.convention,
        }
    }

    // multiply before dividing so whole-day spans stay exact
    fn interest_for_days(&self, principal: Money, monthly_rate: Rate, days: u32) -> Money {
        let numerator = principal.as_decimal()
            * monthly_rate.as_decimal()
            * Decimal::from(days)
            * Decimal::from(12);
        Money::from_decimal(numerator / Decimal::from(self.convention.year_basis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_elapsed_months_whole_months() {
        let calc = InterestCalculator::default();

        assert_eq!(calc.elapsed_months(date(2024, 1, 1), date(2024, 2, 1)), dec!(1));
        assert_eq!(calc.elapsed_months(date(2024, 1, 15), date(2024, 2, 15)), dec!(1));
        assert_eq!(calc.elapsed_months(date(2024, 1, 31), date(2024, 3, 31)), dec!(2));
        assert_eq!(calc.elapsed_months(date(2024, 1, 1), date(2025, 1, 1)), dec!(12));
    }

    #[test]
    fn test_elapsed_months_same_day_is_zero() {
        let calc = InterestCalculator::default();
        for d in [date(2024, 1, 1), date(2024, 2, 29), date(2023, 12, 31)] {
            assert_eq!(calc.elapsed_months(d, d), Decimal::ZERO);
        }
    }

    #[test]
    fn test_end_before_start_accrues_nothing() {
        let calc = InterestCalculator::default();
        let start = date(2024, 5, 10);
        let end = date(2024, 1, 10);

        assert_eq!(calc.elapsed_months(start, end), Decimal::ZERO);
        assert_eq!(
            calc.interest_amount(Money::from_major(1_000), Rate::from_percentage(3), start, end),
            Money::ZERO
        );
        assert_eq!(
            calc.total_with_interest(Money::from_major(1_000), Rate::from_percentage(3), start, end),
            Money::from_major(1_000)
        );
    }

    #[test]
    fn test_three_month_scenario() {
        let calc = InterestCalculator::default();
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(3);
        let start = date(2024, 1, 1);
        let end = date(2024, 4, 1);

        assert_eq!(calc.elapsed_months(start, end), dec!(3));

        let interest = calc.interest_amount(principal, rate, start, end);
        assert_eq!(interest.round_dp(2), Money::from_cents(9_000));

        let total = calc.total_with_interest(principal, rate, start, end);
        assert_eq!(total.round_dp(2), Money::from_cents(109_000));
    }

    #[test]
    fn test_open_window_uses_injected_today() {
        let calc = InterestCalculator::default();
        let window = AccrualWindow::open(date(2024, 1, 1));

        let result = calc.calculate(
            Money::from_major(500),
            Rate::from_percentage(3),
            window,
            date(2024, 1, 16),
        );

        assert!(result.open_ended);
        assert_eq!(result.end_date, date(2024, 1, 16));
        assert_eq!(result.elapsed_days, 15);
        assert_eq!(result.elapsed_months, dec!(0.5));
        assert_eq!(result.interest_amount.round_dp(2), Money::from_cents(750));
    }

    #[test]
    fn test_closed_window_ignores_today() {
        let calc = InterestCalculator::default();
        let window = AccrualWindow::closed(date(2024, 1, 1), date(2024, 4, 1));

        let early = calc.calculate(Money::from_major(1_000), Rate::from_percentage(3), window, date(2024, 4, 2));
        let late = calc.calculate(Money::from_major(1_000), Rate::from_percentage(3), window, date(2030, 1, 1));

        assert!(!early.open_ended);
        assert_eq!(early, late);
        assert_eq!(early.interest_amount, Money::from_major(90));
    }

    #[test]
    fn test_interest_is_not_compounded() {
        let calc = InterestCalculator::default();
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(10);

        // 12 months at 10% simple interest is exactly 120% of principal
        let interest = calc.interest_amount(principal, rate, date(2024, 1, 1), date(2025, 1, 1));
        assert_eq!(interest, Money::from_major(1_200));
    }

    #[test]
    fn test_monotonic_in_end_date() {
        let calc = InterestCalculator::default();
        let start = date(2024, 1, 31);
        let mut previous = Decimal::ZERO;
        let mut end = start;

        for _ in 0..400 {
            let months = calc.elapsed_months(start, end);
            assert!(months >= previous, "{} went backwards at {}", months, end);
            previous = months;
            end = end.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_fixed_end_is_repeatable() {
        let calc = InterestCalculator::default();
        let principal = Money::from_str_exact("1234.56").unwrap();
        let rate = Rate::from_percent(dec!(2.75));
        let start = date(2023, 7, 19);
        let end = date(2024, 2, 3);

        let first = calc.interest_amount(principal, rate, start, end);
        for _ in 0..10 {
            let again = calc.interest_amount(principal, rate, start, end);
            assert_eq!(again.as_decimal().serialize(), first.as_decimal().serialize());
        }
    }

    #[test]
    fn test_garbage_in_still_computes() {
        let calc = InterestCalculator::default();

        let interest = calc.interest_amount(
            Money::from_major(-100),
            Rate::from_percentage(150),
            date(2024, 1, 1),
            date(2024, 2, 1),
        );
        assert_eq!(interest, Money::from_major(-150));
    }

    #[test]
    fn test_actual_conventions() {
        let start = date(2024, 1, 1);
        let end = date(2024, 2, 1);
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(3);

        let actual_360 = InterestCalculator::new(DayCountConvention::Actual360);
        assert_eq!(actual_360.elapsed_days(start, end), 31);
        assert_eq!(actual_360.interest_amount(principal, rate, start, end), Money::from_major(31));

        let actual_365 = InterestCalculator::new(DayCountConvention::Actual365);
        let months = actual_365.elapsed_months(start, end);
        assert!(months > dec!(1.01) && months < dec!(1.02));
    }
}
