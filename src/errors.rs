use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::PurchaseId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    #[error("invalid amount: {amount}, total amount must be a positive number")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid deposit percentage: {percentage}, must be between 0 and 100")]
    InvalidDepositPercentage {
        percentage: Decimal,
    },

    #[error("invalid interest rate: {rate}, must be between 0% and 100%")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("deposit purchase requires a due date")]
    MissingDueDate,

    #[error("due date {due_date} is before buy date {buy_date}")]
    DueBeforeBuyDate {
        buy_date: NaiveDate,
        due_date: NaiveDate,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("purchase not found: {id}")]
    PurchaseNotFound {
        id: PurchaseId,
    },

    #[error("purchase already paid: {id} on {paid_on}")]
    PurchaseAlreadyPaid {
        id: PurchaseId,
        paid_on: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, ShopError>;
