/// export rows - fixed-precision rows for the spreadsheet export
use chrono::NaiveDate;
use shop_credit::{export_rows, Money, Purchase, PurchaseLedger, ShopConfig, Uuid, EXPORT_HEADERS};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_json(r#"{ "display": { "months_decimal_places": 1 } }"#)?;
    let calculator = config.calculator();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("bad date");

    let customer = Uuid::new_v4();

    let mut ledger = PurchaseLedger::new();
    ledger.record(
        Purchase::builder()
            .user_id(customer)
            .buy_date(date(2024, 1, 1)?)
            .total_amount(Money::from_major(1_000))
            .deposit(dec!(20), date(2024, 3, 1)?)
            .build()?,
    )?;
    ledger.record(
        Purchase::builder()
            .buy_date(date(2024, 2, 14)?)
            .total_amount(Money::from_str_exact("249.99")?)
            .immediate()
            .build()?,
    )?;

    let valuations = ledger.valuations(&calculator, date(2024, 4, 1)?);

    println!("{}", EXPORT_HEADERS.join(" | "));
    // user records live outside the ledger; unknown users get the placeholder
    let names = |user: Uuid| (user == customer).then(|| "Ada Lovelace".to_string());

    for row in export_rows(&valuations, names, &config.display) {
        println!("{}", row.cells().join(" | "));
    }

    Ok(())
}
