use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ShopError};
use crate::interest::{current_date, AccrualWindow};
use crate::types::{PaymentMethod, PurchaseId, PurchaseStatus, UserId};

/// a purchase made by a shop user, possibly on credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub buy_date: NaiveDate,
    pub payment_method: PaymentMethod,
    /// share of the total paid up front, 0..=100
    pub deposit_percentage: Decimal,
    pub total_amount: Money,
    pub due_date: Option<NaiveDate>,
    pub monthly_rate: Rate,
    /// date the purchase was settled in full
    pub paid_on: Option<NaiveDate>,
}

impl Purchase {
    pub fn builder() -> PurchaseBuilder {
        PurchaseBuilder::new()
    }

    /// check the record against the shop's input rules
    pub fn validate(&self) -> Result<()> {
        if !self.total_amount.is_positive() {
            return Err(ShopError::InvalidAmount {
                amount: self.total_amount,
            });
        }

        if self.deposit_percentage < Decimal::ZERO
            || self.deposit_percentage > Decimal::ONE_HUNDRED
        {
            return Err(ShopError::InvalidDepositPercentage {
                percentage: self.deposit_percentage,
            });
        }

        if !self.monthly_rate.is_valid_percentage() {
            return Err(ShopError::InvalidInterestRate {
                rate: self.monthly_rate,
            });
        }

        if self.payment_method == PaymentMethod::Deposit {
            let due_date = self.due_date.ok_or(ShopError::MissingDueDate)?;
            if due_date < self.buy_date {
                return Err(ShopError::DueBeforeBuyDate {
                    buy_date: self.buy_date,
                    due_date,
                });
            }
        }

        Ok(())
    }

    /// principal the interest is charged on
    pub fn principal(&self) -> Money {
        self.total_amount
    }

    /// amount paid up front
    pub fn deposit_amount(&self) -> Money {
        self.total_amount.percentage(self.deposit_percentage)
    }

    /// amount still owed after the deposit, zero once paid
    pub fn remaining_amount(&self) -> Money {
        if self.is_paid() {
            return Money::ZERO;
        }
        self.total_amount - self.deposit_amount()
    }

    pub fn is_paid(&self) -> bool {
        self.paid_on.is_some()
    }

    pub fn status(&self) -> PurchaseStatus {
        if self.is_paid() {
            PurchaseStatus::Paid
        } else {
            PurchaseStatus::Outstanding
        }
    }

    /// accrual runs from the buy date to the payment date, or stays open
    pub fn accrual_window(&self) -> AccrualWindow {
        AccrualWindow {
            start: self.buy_date,
            end: self.paid_on,
        }
    }

    /// record full payment on the given date
    ///
    /// A payment date before the buy date is accepted; such a purchase
    /// simply accrues no interest.
    pub fn mark_as_paid(&mut self, on: NaiveDate) -> Result<()> {
        if let Some(paid_on) = self.paid_on {
            return Err(ShopError::PurchaseAlreadyPaid { id: self.id, paid_on });
        }
        if on < self.buy_date {
            tracing::warn!(purchase = %self.id, buy_date = %self.buy_date, paid_on = %on, "payment recorded before buy date");
        }
        self.paid_on = Some(on);
        Ok(())
    }

    /// serialize to json
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// builder for purchases; validates on build
pub struct PurchaseBuilder {
    id: Option<PurchaseId>,
    user_id: Option<UserId>,
    buy_date: Option<NaiveDate>,
    payment_method: PaymentMethod,
    deposit_percentage: Decimal,
    total_amount: Option<Money>,
    due_date: Option<NaiveDate>,
    monthly_rate: Rate,
    paid_on: Option<NaiveDate>,
}

impl Default for PurchaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            user_id: None,
            buy_date: None,
            payment_method: PaymentMethod::Immediate,
            deposit_percentage: Decimal::ZERO,
            total_amount: None,
            due_date: None,
            monthly_rate: crate::config::DEFAULT_MONTHLY_RATE,
            paid_on: None,
        }
    }

    pub fn id(mut self, id: PurchaseId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn buy_date(mut self, date: NaiveDate) -> Self {
        self.buy_date = Some(date);
        self
    }

    pub fn total_amount(mut self, amount: Money) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// paid in full at the till
    pub fn immediate(mut self) -> Self {
        self.payment_method = PaymentMethod::Immediate;
        self
    }

    /// deposit now, rest due on `due_date`
    pub fn deposit(mut self, percentage: Decimal, due_date: NaiveDate) -> Self {
        self.payment_method = PaymentMethod::Deposit;
        self.deposit_percentage = percentage;
        self.due_date = Some(due_date);
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn deposit_percentage(mut self, percentage: Decimal) -> Self {
        self.deposit_percentage = percentage;
        self
    }

    pub fn due_date(mut self, date: Option<NaiveDate>) -> Self {
        self.due_date = date;
        self
    }

    pub fn monthly_rate(mut self, rate: Rate) -> Self {
        self.monthly_rate = rate;
        self
    }

    /// purchase already settled on the given date
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.paid_on = Some(date);
        self
    }

    /// build with the buy date defaulting to today on the given clock
    pub fn build_with_time(mut self, time_provider: &SafeTimeProvider) -> Result<Purchase> {
        if self.buy_date.is_none() {
            self.buy_date = Some(current_date(time_provider));
        }
        self.build()
    }

    pub fn build(self) -> Result<Purchase> {
        let buy_date = self.buy_date.ok_or(ShopError::MissingField { field: "buy_date" })?;
        let total_amount = self
            .total_amount
            .ok_or(ShopError::MissingField { field: "total_amount" })?;

        // immediate purchases carry no deposit or due date and settle on the buy date
        let (deposit_percentage, due_date, paid_on) = match self.payment_method {
            PaymentMethod::Immediate => (Decimal::ZERO, None, Some(self.paid_on.unwrap_or(buy_date))),
            PaymentMethod::Deposit => (self.deposit_percentage, self.due_date, self.paid_on),
        };

        let purchase = Purchase {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: self.user_id.unwrap_or_else(Uuid::nil),
            buy_date,
            payment_method: self.payment_method,
            deposit_percentage,
            total_amount,
            due_date,
            monthly_rate: self.monthly_rate,
            paid_on,
        };

        purchase.validate()?;
        Ok(purchase)
    }
}
