use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::{DayCountConvention, InterestCalculator};
use crate::purchase::Purchase;
use crate::types::{PaymentMethod, PurchaseId, PurchaseStatus, UserId};

/// serializable snapshot of a purchase with its derived figures
///
/// Figures are at full precision. An outstanding purchase is valued against
/// `as_of`, so a valuation is only current for the day it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseValuation {
    pub purchase_id: PurchaseId,
    pub user_id: UserId,
    pub as_of: NaiveDate,
    pub buy_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub paid_on: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub status: PurchaseStatus,
    pub principal: Money,
    pub deposit_percentage: Decimal,
    pub deposit_amount: Money,
    pub remaining_amount: Money,
    pub monthly_rate: Rate,
    pub elapsed_months: Decimal,
    pub interest_amount: Money,
    pub total_with_interest: Money,
    pub convention: DayCountConvention,
}

impl PurchaseValuation {
    /// value a purchase; `today` closes the accrual window of unpaid purchases
    pub fn evaluate(purchase: &Purchase, calculator: &InterestCalculator, today: NaiveDate) -> Self {
        let interest = calculator.calculate(
            purchase.principal(),
            purchase.monthly_rate,
            purchase.accrual_window(),
            today,
        );

        PurchaseValuation {
            purchase_id: purchase.id,
            user_id: purchase.user_id,
            as_of: today,
            buy_date: purchase.buy_date,
            due_date: purchase.due_date,
            paid_on: purchase.paid_on,
            payment_method: purchase.payment_method,
            status: purchase.status(),
            principal: purchase.principal(),
            deposit_percentage: purchase.deposit_percentage,
            deposit_amount: purchase.deposit_amount(),
            remaining_amount: purchase.remaining_amount(),
            monthly_rate: purchase.monthly_rate,
            elapsed_months: interest.elapsed_months,
            interest_amount: interest.interest_amount,
            total_with_interest: interest.total_with_interest,
            convention: calculator.convention,
        }
    }

    /// true when the due date has passed and the purchase is still open
    pub fn is_overdue(&self) -> bool {
        self.status == PurchaseStatus::Outstanding
            && self.due_date.map(|due| due < self.as_of).unwrap_or(false)
    }

    /// serialize to json
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// totals across a set of valuations, e.g. one user's purchases
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub purchase_count: usize,
    pub outstanding_count: usize,
    pub total_principal: Money,
    pub total_remaining: Money,
    pub total_interest: Money,
    pub total_with_interest: Money,
}

impl ValuationSummary {
    pub fn from_valuations<'a, I>(valuations: I) -> Self
    where
        I: IntoIterator<Item = &'a PurchaseValuation>,
    {
        valuations
            .into_iter()
            .fold(ValuationSummary::default(), |mut summary, v| {
                summary.purchase_count += 1;
                if v.status == PurchaseStatus::Outstanding {
                    summary.outstanding_count += 1;
                }
                summary.total_principal += v.principal;
                summary.total_remaining += v.remaining_amount;
                summary.total_interest += v.interest_amount;
                summary.total_with_interest += v.total_with_interest;
                summary
            })
    }
}
