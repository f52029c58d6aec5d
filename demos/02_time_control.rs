/// time control - deterministic valuations with a controlled clock
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use shop_credit::{
    current_date, InterestCalculator, Money, Purchase, PurchaseValuation, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();
    let calculator = InterestCalculator::default();

    let mut purchase = Purchase::builder()
        .total_amount(Money::from_major(500))
        .deposit(dec!(10), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build_with_time(&time)?;

    // open purchases move with the clock
    for _ in 0..4 {
        controller.advance(Duration::days(15));
        let row = PurchaseValuation::evaluate(&purchase, &calculator, current_date(&time));
        println!(
            "{}: months={} interest={}",
            row.as_of,
            row.elapsed_months.round_dp(2),
            row.interest_amount.round_dp(2)
        );
    }

    purchase.mark_as_paid(current_date(&time))?;
    println!("\npaid on {}", current_date(&time));

    // paid purchases do not
    controller.advance(Duration::days(365));
    let row = PurchaseValuation::evaluate(&purchase, &calculator, current_date(&time));
    println!("{}: interest={} (frozen)", row.as_of, row.interest_amount.round_dp(2));

    Ok(())
}
