/// quick start - interest on a single credit purchase
use chrono::NaiveDate;
use shop_credit::{interest_amount, elapsed_months, total_with_interest, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let buy_date = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let paid_on = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?;

    let principal = Money::from_major(1_000);
    let rate = Rate::from_percentage(3);

    println!("months:   {}", elapsed_months(buy_date, paid_on));
    println!("interest: {}", interest_amount(principal, rate, buy_date, paid_on).round_dp(2));
    println!("total:    {}", total_with_interest(principal, rate, buy_date, paid_on).round_dp(2));

    Ok(())
}
