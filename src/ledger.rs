use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::info;

use crate::errors::{Result, ShopError};
use crate::events::{Event, EventStore};
use crate::interest::{current_date, InterestCalculator};
use crate::purchase::Purchase;
use crate::types::{PurchaseId, UserId};
use crate::valuation::PurchaseValuation;

/// in-memory set of purchases backing list and detail views
///
/// Every mutation emits an [`Event`]; consumers drain them with
/// [`PurchaseLedger::take_events`] to know which cached rows are stale.
#[derive(Debug, Default)]
pub struct PurchaseLedger {
    purchases: Vec<Purchase>,
    events: EventStore,
}

impl PurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    /// add a purchase after validating it
    pub fn record(&mut self, purchase: Purchase) -> Result<PurchaseId> {
        purchase.validate()?;

        let id = purchase.id;
        info!(purchase = %id, user = %purchase.user_id, total = %purchase.total_amount, "purchase recorded");

        self.events.emit(Event::PurchaseRecorded {
            purchase_id: id,
            user_id: purchase.user_id,
            total_amount: purchase.total_amount,
            payment_method: purchase.payment_method,
            buy_date: purchase.buy_date,
        });
        self.purchases.push(purchase);
        Ok(id)
    }

    pub fn get(&self, id: PurchaseId) -> Result<&Purchase> {
        self.purchases
            .iter()
            .find(|p| p.id == id)
            .ok_or(ShopError::PurchaseNotFound { id })
    }

    /// apply an edit; the purchase is left untouched if the result is invalid
    pub fn update<F>(&mut self, id: PurchaseId, edit: F) -> Result<&Purchase>
    where
        F: FnOnce(&mut Purchase),
    {
        let index = self.index_of(id)?;

        let mut edited = self.purchases[index].clone();
        edit(&mut edited);
        // the id is the ledger key
        edited.id = id;
        edited.validate()?;

        info!(purchase = %id, "purchase updated");
        self.events.emit(Event::PurchaseUpdated {
            purchase_id: id,
            user_id: edited.user_id,
        });
        self.purchases[index] = edited;
        Ok(&self.purchases[index])
    }

    pub fn remove(&mut self, id: PurchaseId) -> Result<Purchase> {
        let index = self.index_of(id)?;
        let removed = self.purchases.remove(index);

        info!(purchase = %id, "purchase removed");
        self.events.emit(Event::PurchaseRemoved {
            purchase_id: id,
            user_id: removed.user_id,
        });
        Ok(removed)
    }

    /// settle a purchase today according to the time provider
    pub fn mark_as_paid(
        &mut self,
        id: PurchaseId,
        calculator: &InterestCalculator,
        time_provider: &SafeTimeProvider,
    ) -> Result<&Purchase> {
        self.mark_as_paid_on(id, calculator, current_date(time_provider))
    }

    /// settle a purchase on an explicit date
    pub fn mark_as_paid_on(
        &mut self,
        id: PurchaseId,
        calculator: &InterestCalculator,
        paid_on: NaiveDate,
    ) -> Result<&Purchase> {
        let index = self.index_of(id)?;
        let purchase = &mut self.purchases[index];
        purchase.mark_as_paid(paid_on)?;

        let final_interest = calculator.interest_amount(
            purchase.principal(),
            purchase.monthly_rate,
            purchase.buy_date,
            paid_on,
        );

        info!(purchase = %id, paid_on = %paid_on, interest = %final_interest, "purchase marked as paid");
        self.events.emit(Event::PurchaseMarkedPaid {
            purchase_id: id,
            user_id: purchase.user_id,
            paid_on,
            final_interest,
        });
        Ok(&self.purchases[index])
    }

    /// all purchases, newest buy date first
    pub fn purchases(&self) -> Vec<&Purchase> {
        let mut list: Vec<&Purchase> = self.purchases.iter().collect();
        list.sort_by(|a, b| b.buy_date.cmp(&a.buy_date));
        list
    }

    /// one user's purchases, newest buy date first
    pub fn purchases_for_user(&self, user_id: UserId) -> Vec<&Purchase> {
        self.purchases()
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect()
    }

    /// value every purchase as of `today`, newest buy date first
    pub fn valuations(&self, calculator: &InterestCalculator, today: NaiveDate) -> Vec<PurchaseValuation> {
        self.purchases()
            .into_iter()
            .map(|p| PurchaseValuation::evaluate(p, calculator, today))
            .collect()
    }

    /// value one purchase as of `today`
    pub fn valuation(
        &self,
        id: PurchaseId,
        calculator: &InterestCalculator,
        today: NaiveDate,
    ) -> Result<PurchaseValuation> {
        let purchase = self.get(id)?;
        Ok(PurchaseValuation::evaluate(purchase, calculator, today))
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn index_of(&self, id: PurchaseId) -> Result<usize> {
        self.purchases
            .iter()
            .position(|p| p.id == id)
            .ok_or(ShopError::PurchaseNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn credit(user_id: UserId, buy_date: NaiveDate, total: i64) -> Purchase {
        Purchase::builder()
            .user_id(user_id)
            .buy_date(buy_date)
            .total_amount(Money::from_major(total))
            .deposit(dec!(10), buy_date + Duration::days(60))
            .build()
            .unwrap()
    }

    #[test]
    fn test_record_and_list_newest_first() {
        let mut ledger = PurchaseLedger::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let old = ledger.record(credit(alice, date(2024, 1, 1), 100)).unwrap();
        let new = ledger.record(credit(bob, date(2024, 3, 1), 200)).unwrap();
        let mid = ledger.record(credit(alice, date(2024, 2, 1), 300)).unwrap();

        let ids: Vec<PurchaseId> = ledger.purchases().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![new, mid, old]);

        let alices: Vec<PurchaseId> = ledger.purchases_for_user(alice).iter().map(|p| p.id).collect();
        assert_eq!(alices, vec![mid, old]);

        let events = ledger.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::PurchaseRecorded { .. }));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let mut ledger = PurchaseLedger::new();
        let id = Uuid::new_v4();

        assert_eq!(ledger.get(id).unwrap_err(), ShopError::PurchaseNotFound { id });
        assert!(ledger.remove(id).is_err());
        assert!(ledger
            .mark_as_paid_on(id, &InterestCalculator::default(), date(2024, 1, 1))
            .is_err());
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_update_rejects_invalid_edit() {
        let mut ledger = PurchaseLedger::new();
        let id = ledger.record(credit(Uuid::new_v4(), date(2024, 1, 1), 100)).unwrap();
        ledger.take_events();

        let err = ledger
            .update(id, |p| p.deposit_percentage = dec!(150))
            .unwrap_err();
        assert!(matches!(err, ShopError::InvalidDepositPercentage { .. }));
        assert_eq!(ledger.get(id).unwrap().deposit_percentage, dec!(10));
        assert!(ledger.events().is_empty());

        let updated = ledger
            .update(id, |p| p.total_amount = Money::from_major(120))
            .unwrap();
        assert_eq!(updated.total_amount, Money::from_major(120));
        assert!(matches!(ledger.events()[0], Event::PurchaseUpdated { .. }));
    }

    #[test]
    fn test_mark_as_paid_with_controlled_clock() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
        ));
        let control = time.test_control().unwrap();
        let calc = InterestCalculator::default();

        let mut ledger = PurchaseLedger::new();
        let id = ledger
            .record(credit(Uuid::new_v4(), current_date(&time), 1_000))
            .unwrap();

        // valuations follow the clock while the purchase is open
        control.advance(Duration::days(15));
        let half = ledger.valuation(id, &calc, current_date(&time)).unwrap();
        assert_eq!(half.interest_amount, Money::from_major(15));

        control.advance(Duration::days(76));
        ledger.mark_as_paid(id, &calc, &time).unwrap();

        let events = ledger.take_events();
        let paid = events.last().unwrap();
        assert_eq!(
            *paid,
            Event::PurchaseMarkedPaid {
                purchase_id: id,
                user_id: ledger.get(id).unwrap().user_id,
                paid_on: date(2024, 4, 1),
                final_interest: Money::from_major(90),
            }
        );

        // and stop moving once it is paid
        control.advance(Duration::days(365));
        let frozen = ledger.valuation(id, &calc, current_date(&time)).unwrap();
        assert_eq!(frozen.interest_amount, Money::from_major(90));

        let err = ledger.mark_as_paid(id, &calc, &time).unwrap_err();
        assert!(matches!(err, ShopError::PurchaseAlreadyPaid { .. }));
    }

    #[test]
    fn test_remove() {
        let mut ledger = PurchaseLedger::new();
        let id = ledger.record(credit(Uuid::new_v4(), date(2024, 1, 1), 100)).unwrap();

        let removed = ledger.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.is_empty());
        assert!(matches!(ledger.events().last(), Some(Event::PurchaseRemoved { .. })));
    }

    #[test]
    fn test_valuations_cover_every_purchase() {
        let mut ledger = PurchaseLedger::new();
        let user = Uuid::new_v4();
        ledger.record(credit(user, date(2024, 1, 1), 1_000)).unwrap();
        ledger.record(credit(user, date(2024, 2, 1), 500)).unwrap();

        let rows = ledger.valuations(&InterestCalculator::default(), date(2024, 4, 1));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].interest_amount, Money::from_major(30));
        assert_eq!(rows[1].interest_amount, Money::from_major(90));
    }
}
