pub mod accrual;
pub mod day_count;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

pub use accrual::InterestCalculator;
pub use day_count::{days_30_360, DayCountConvention};

/// interest calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCalculation {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub start_date: NaiveDate,
    /// resolved end of the window; today when the window was open
    pub end_date: NaiveDate,
    pub open_ended: bool,
    pub elapsed_days: u32,
    pub elapsed_months: Decimal,
    pub interest_amount: Money,
    pub total_with_interest: Money,
    pub convention: DayCountConvention,
}

/// period over which a purchase accrues interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualWindow {
    pub start: NaiveDate,
    /// payment date, `None` while the credit is still open
    pub end: Option<NaiveDate>,
}

impl AccrualWindow {
    /// window still accruing
    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// window closed by a payment
    pub fn closed(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end: Some(end) }
    }

    /// end date, or `today` for an open window
    pub fn end_or(&self, today: NaiveDate) -> NaiveDate {
        self.end.unwrap_or(today)
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// current calendar date according to the time provider
pub fn current_date(time_provider: &SafeTimeProvider) -> NaiveDate {
    time_provider.now().date_naive()
}

/// months elapsed under 30/360
pub fn elapsed_months(start_date: NaiveDate, end_date: NaiveDate) -> Decimal {
    InterestCalculator::default().elapsed_months(start_date, end_date)
}

/// simple interest accrued under 30/360
pub fn interest_amount(
    principal: Money,
    monthly_rate: Rate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Money {
    InterestCalculator::default().interest_amount(principal, monthly_rate, start_date, end_date)
}

/// principal plus simple interest accrued under 30/360
pub fn total_with_interest(
    principal: Money,
    monthly_rate: Rate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Money {
    InterestCalculator::default().total_with_interest(principal, monthly_rate, start_date, end_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_free_functions_use_30_360() {
        assert_eq!(elapsed_months(date(2024, 1, 1), date(2024, 2, 1)), dec!(1));
        assert_eq!(
            interest_amount(Money::from_major(1_000), Rate::from_percentage(3), date(2024, 1, 1), date(2024, 4, 1)),
            Money::from_major(90)
        );
        assert_eq!(
            total_with_interest(Money::from_major(1_000), Rate::from_percentage(3), date(2024, 1, 1), date(2024, 4, 1)),
            Money::from_major(1_090)
        );
    }

    #[test]
    fn test_total_is_principal_plus_interest() {
        let principal = Money::from_str_exact("749.99").unwrap();
        let rate = Rate::from_percent(dec!(3.5));
        let start = date(2024, 3, 17);

        let mut end = start;
        for _ in 0..120 {
            let interest = interest_amount(principal, rate, start, end);
            assert!(!interest.is_negative());
            assert_eq!(total_with_interest(principal, rate, start, end), principal + interest);
            end += Duration::days(7);
        }
    }

    #[test]
    fn test_window_resolution() {
        let today = date(2024, 6, 1);

        let open = AccrualWindow::open(date(2024, 1, 1));
        assert!(open.is_open());
        assert_eq!(open.end_or(today), today);

        let closed = AccrualWindow::closed(date(2024, 1, 1), date(2024, 3, 1));
        assert!(!closed.is_open());
        assert_eq!(closed.end_or(today), date(2024, 3, 1));
    }

    #[test]
    fn test_current_date_follows_controlled_clock() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap()
        ));
        let control = time.test_control().unwrap();

        assert_eq!(current_date(&time), date(2024, 1, 1));

        control.advance(Duration::days(15));
        assert_eq!(current_date(&time), date(2024, 1, 16));

        let window = AccrualWindow::open(date(2024, 1, 1));
        let result = InterestCalculator::default().calculate(
            Money::from_major(500),
            Rate::from_percentage(3),
            window,
            current_date(&time),
        );
        assert_eq!(result.elapsed_months, dec!(0.5));
        assert_eq!(result.interest_amount, Money::from_cents(750));
    }
}
