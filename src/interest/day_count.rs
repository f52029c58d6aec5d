use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// day count convention for interest calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 30 days per month / 360 days per year, day 31 treated as day 30 on both ends
    #[default]
    Thirty360,
    /// actual days / 360
    Actual360,
    /// actual days / 365
    Actual365,
}

impl DayCountConvention {
    /// signed day count between two dates, negative when `end` precedes `start`
    pub fn signed_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        match self {
            DayCountConvention::Thirty360 => days_30_360(start, end),
            DayCountConvention::Actual360 | DayCountConvention::Actual365 => {
                (end - start).num_days()
            }
        }
    }

    /// day count clamped to zero
    pub fn days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        self.signed_days(start, end).max(0) as u32
    }

    /// days in the convention's year
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Thirty360 | DayCountConvention::Actual360 => 360,
            DayCountConvention::Actual365 => 365,
        }
    }

    /// convert a day count into months; a month is one twelfth of the year basis
    pub fn months_for_days(&self, days: u32) -> Decimal {
        Decimal::from(days) * Decimal::from(12) / Decimal::from(self.year_basis())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Actual360 => "Actual/360",
            DayCountConvention::Actual365 => "Actual/365",
        }
    }
}

/// 30/360 day count between two dates
///
/// Day 31 on the start date becomes 30, then day 31 on the end date becomes 30.
/// The end date is clamped whatever the start day is, unlike US bond basis which
/// only clamps it when the start day is 30 or 31: Jan 15 to Jan 31 counts 15
/// days here, 16 under bond basis. Jan 31 to Mar 1 counts 31 days, so it is not
/// a whole month. The result is signed; callers clamp.
pub fn days_30_360(start: NaiveDate, end: NaiveDate) -> i64 {
    let y1 = start.year() as i64;
    let y2 = end.year() as i64;
    let m1 = start.month() as i64;
    let m2 = end.month() as i64;
    let d1 = start.day().min(30) as i64;
    let d2 = end.day().min(30) as i64;

    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}
