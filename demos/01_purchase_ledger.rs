/// purchase ledger - record, list and settle purchases with change events
use shop_credit::{
    current_date, PurchaseLedger, Money, SafeTimeProvider, ShopConfig, TimeSource, Uuid,
};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== purchase ledger example ===\n");

    // production: use system time
    let time = SafeTimeProvider::new(TimeSource::System);
    let config = ShopConfig::default();
    let calculator = config.calculator();
    let today = current_date(&time);

    let customer = Uuid::new_v4();
    let mut ledger = PurchaseLedger::new();

    let fridge = ledger.record(
        config
            .purchase_builder()
            .user_id(customer)
            .buy_date(today - chrono::Duration::days(45))
            .total_amount(Money::from_major(1_200))
            .deposit(dec!(25), today + chrono::Duration::days(30))
            .build()?,
    )?;

    ledger.record(
        config
            .purchase_builder()
            .user_id(customer)
            .total_amount(Money::from_str_exact("89.90")?)
            .immediate()
            .build_with_time(&time)?,
    )?;

    for row in ledger.valuations(&calculator, today) {
        println!(
            "{} {:>8} months={:.2} interest={:.2} total={:.2}",
            row.buy_date,
            row.status,
            row.elapsed_months,
            row.interest_amount.as_decimal(),
            row.total_with_interest.as_decimal()
        );
    }

    ledger.mark_as_paid(fridge, &calculator, &time)?;

    // views refresh only what changed
    for event in ledger.take_events() {
        println!("changed: {:?}", event);
    }

    Ok(())
}
