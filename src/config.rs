use chrono::format::{Item, StrftimeItems};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{Result, ShopError};
use crate::interest::{DayCountConvention, InterestCalculator};
use crate::purchase::{Purchase, PurchaseBuilder};

/// monthly rate charged on credit purchases unless configured otherwise
pub const DEFAULT_MONTHLY_RATE: Rate = Rate::from_decimal(dec!(0.03));

/// money is always shown in whole cents
pub const MONEY_DECIMAL_PLACES: u32 = 2;

// decimal supports at most 28 fractional digits
const MAX_DECIMAL_PLACES: u32 = 28;

/// shop configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub interest: InterestConfig,
    pub display: DisplayConfig,
}

/// interest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    pub day_count_convention: DayCountConvention,
    pub default_monthly_rate: Rate,
}

/// presentation settings for listings and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub months_decimal_places: u32,
    /// chrono format string, `Jan 05, 2024` by default
    pub date_format: String,
    /// shown for values that do not apply to a row
    pub placeholder: String,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            day_count_convention: DayCountConvention::Thirty360,
            default_monthly_rate: DEFAULT_MONTHLY_RATE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            months_decimal_places: 2,
            date_format: "%b %d, %Y".to_string(),
            placeholder: "-".to_string(),
        }
    }
}

impl ShopConfig {
    /// parse from json; missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ShopConfig =
            serde_json::from_str(json).map_err(|e| ShopError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.interest.default_monthly_rate.is_valid_percentage() {
            return Err(ShopError::InvalidInterestRate {
                rate: self.interest.default_monthly_rate,
            });
        }

        if self.display.months_decimal_places > MAX_DECIMAL_PLACES {
            return Err(ShopError::InvalidConfiguration {
                message: format!(
                    "months decimal places out of range: {}",
                    self.display.months_decimal_places
                ),
            });
        }

        if self.display.date_format.trim().is_empty() {
            return Err(ShopError::InvalidConfiguration {
                message: "date format must not be empty".to_string(),
            });
        }

        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ShopError::InvalidConfiguration {
                message: format!("invalid date format: {}", self.display.date_format),
            });
        }

        Ok(())
    }

    /// calculator for the configured day count convention
    pub fn calculator(&self) -> InterestCalculator {
        InterestCalculator::new(self.interest.day_count_convention)
    }

    /// purchase builder charging the configured monthly rate
    pub fn purchase_builder(&self) -> PurchaseBuilder {
        Purchase::builder().monthly_rate(self.interest.default_monthly_rate)
    }
}
