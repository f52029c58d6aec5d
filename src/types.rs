use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a purchase
pub type PurchaseId = Uuid;

/// unique identifier for a shop user
pub type UserId = Uuid;

/// how the customer settles the purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// paid in full at the till
    Immediate,
    /// part paid up front, the rest on credit until the due date
    Deposit,
}

impl PaymentMethod {
    /// label shown in listings and exports
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Immediate => "Paid",
            PaymentMethod::Deposit => "Deposit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// purchase settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// credit still open, interest accrues up to today
    Outstanding,
    /// fully paid, interest frozen at the payment date
    Paid,
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseStatus::Outstanding => f.pad("Outstanding"),
            PurchaseStatus::Paid => f.pad("Paid"),
        }
    }
}
