pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod export;
pub mod interest;
pub mod ledger;
pub mod purchase;
pub mod types;
pub mod valuation;

// re-export key types
pub use config::{DisplayConfig, InterestConfig, ShopConfig, DEFAULT_MONTHLY_RATE};
pub use decimal::{Money, Rate};
pub use errors::{Result, ShopError};
pub use events::{Event, EventStore};
pub use export::{export_rows, ExportRow, EXPORT_HEADERS};
pub use interest::{
    current_date, elapsed_months, interest_amount, total_with_interest, AccrualWindow,
    DayCountConvention, InterestCalculation, InterestCalculator,
};
pub use ledger::PurchaseLedger;
pub use purchase::{Purchase, PurchaseBuilder};
pub use types::{PaymentMethod, PurchaseId, PurchaseStatus, UserId};
pub use valuation::{PurchaseValuation, ValuationSummary};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
