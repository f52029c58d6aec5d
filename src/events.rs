use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{PaymentMethod, PurchaseId, UserId};

/// change notifications emitted by the purchase ledger
///
/// Views holding derived figures drain these to know when to re-evaluate,
/// instead of re-fetching everything on a timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PurchaseRecorded {
        purchase_id: PurchaseId,
        user_id: UserId,
        total_amount: Money,
        payment_method: PaymentMethod,
        buy_date: NaiveDate,
    },
    PurchaseUpdated {
        purchase_id: PurchaseId,
        user_id: UserId,
    },
    PurchaseMarkedPaid {
        purchase_id: PurchaseId,
        user_id: UserId,
        paid_on: NaiveDate,
        /// interest frozen at the payment date
        final_interest: Money,
    },
    PurchaseRemoved {
        purchase_id: PurchaseId,
        user_id: UserId,
    },
}

impl Event {
    pub fn purchase_id(&self) -> PurchaseId {
        match self {
            Event::PurchaseRecorded { purchase_id, .. }
            | Event::PurchaseUpdated { purchase_id, .. }
            | Event::PurchaseMarkedPaid { purchase_id, .. }
            | Event::PurchaseRemoved { purchase_id, .. } => *purchase_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Event::PurchaseRecorded { user_id, .. }
            | Event::PurchaseUpdated { user_id, .. }
            | Event::PurchaseMarkedPaid { user_id, .. }
            | Event::PurchaseRemoved { user_id, .. } => *user_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
