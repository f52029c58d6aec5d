use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{DisplayConfig, MONEY_DECIMAL_PLACES};
use crate::decimal::Money;
use crate::types::{PaymentMethod, PurchaseStatus, UserId};
use crate::valuation::PurchaseValuation;

/// column headers in export order
pub const EXPORT_HEADERS: [&str; 10] = [
    "Customer",
    "Buy Date",
    "Due Date",
    "Total Amount",
    "Payment Method",
    "Deposit %",
    "Remaining",
    "Months",
    "Interest Amount",
    "Total with Interest",
];

/// one formatted spreadsheet row
///
/// This is the only place figures are rounded: money to cents, months to the
/// configured number of places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Buy Date")]
    pub buy_date: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
    #[serde(rename = "Total Amount")]
    pub total_amount: String,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
    #[serde(rename = "Deposit %")]
    pub deposit_percentage: String,
    #[serde(rename = "Remaining")]
    pub remaining: String,
    #[serde(rename = "Months")]
    pub months: String,
    #[serde(rename = "Interest Amount")]
    pub interest_amount: String,
    #[serde(rename = "Total with Interest")]
    pub total_with_interest: String,
}

impl ExportRow {
    /// format a valuation; a missing customer name shows the placeholder
    pub fn from_valuation(
        valuation: &PurchaseValuation,
        customer: Option<&str>,
        display: &DisplayConfig,
    ) -> Self {
        // settled purchases show as paid, whatever deposit they started with
        let settled = valuation.payment_method == PaymentMethod::Immediate
            || valuation.status == PurchaseStatus::Paid;

        let (payment_method, deposit_percentage, remaining) = if settled {
            (
                PaymentMethod::Immediate.label().to_string(),
                display.placeholder.clone(),
                display.placeholder.clone(),
            )
        } else {
            (
                PaymentMethod::Deposit.label().to_string(),
                format!("{}%", valuation.deposit_percentage.normalize()),
                format_money(valuation.remaining_amount, display),
            )
        };

        ExportRow {
            customer: customer.map_or_else(|| display.placeholder.clone(), str::to_string),
            buy_date: format_date(Some(valuation.buy_date), display),
            due_date: format_date(valuation.due_date, display),
            total_amount: format_money(valuation.principal, display),
            payment_method,
            deposit_percentage,
            remaining,
            months: format_months(valuation.elapsed_months, display),
            interest_amount: format_money(valuation.interest_amount, display),
            total_with_interest: format_money(valuation.total_with_interest, display),
        }
    }

    /// cells in header order
    pub fn cells(&self) -> [&str; 10] {
        [
            self.customer.as_str(),
            self.buy_date.as_str(),
            self.due_date.as_str(),
            self.total_amount.as_str(),
            self.payment_method.as_str(),
            self.deposit_percentage.as_str(),
            self.remaining.as_str(),
            self.months.as_str(),
            self.interest_amount.as_str(),
            self.total_with_interest.as_str(),
        ]
    }
}

/// format every valuation for export, naming customers through `customer_name`
pub fn export_rows<F>(
    valuations: &[PurchaseValuation],
    customer_name: F,
    display: &DisplayConfig,
) -> Vec<ExportRow>
where
    F: Fn(UserId) -> Option<String>,
{
    valuations
        .iter()
        .map(|v| {
            let customer = customer_name(v.user_id);
            ExportRow::from_valuation(v, customer.as_deref(), display)
        })
        .collect()
}

/// money with the currency symbol and exactly two decimal places
pub fn format_money(amount: Money, display: &DisplayConfig) -> String {
    amount.format_fixed(&display.currency_symbol, MONEY_DECIMAL_PLACES)
}

/// months with the configured fixed number of decimal places
pub fn format_months(months: Decimal, display: &DisplayConfig) -> String {
    let dp = display.months_decimal_places;
    let rounded = months.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

pub fn format_date(date: Option<NaiveDate>, display: &DisplayConfig) -> String {
    let Some(d) = date else {
        return display.placeholder.clone();
    };

    let mut out = String::new();
    match write!(out, "{}", d.format(&display.date_format)) {
        Ok(()) => out,
        Err(_) => display.placeholder.clone(),
    }
}
