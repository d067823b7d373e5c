//! Selling fee calculator

use crate::config::PricingConfig;
use crate::format::{format_gbp, MAX_EXACT_AMOUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fraction of the sale price, e.g. `0.10` for 10%.
    pub rate: f64,
    /// Floor applied when the percentage comes out lower. Zero disables it.
    pub minimum_fee: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub sale_price: f64,
    pub fee: f64,
    pub you_receive: f64,
    pub minimum_applied: bool,
}

impl FeeQuote {
    pub fn display(&self) -> FeeQuoteDisplay {
        FeeQuoteDisplay {
            sale_price: format_gbp(self.sale_price),
            fee: format_gbp(self.fee),
            you_receive: format_gbp(self.you_receive),
        }
    }
}

/// Quote amounts as the calculator widget shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuoteDisplay {
    pub sale_price: String,
    pub fee: String,
    pub you_receive: String,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        PricingConfig::default().into()
    }
}

impl From<PricingConfig> for FeeSchedule {
    fn from(config: PricingConfig) -> Self {
        Self {
            rate: config.rate,
            minimum_fee: config.minimum_fee,
        }
    }
}

impl FeeSchedule {
    pub fn new(rate: f64, minimum_fee: f64) -> Self {
        Self { rate, minimum_fee }
    }

    /// Plain percentage with no floor.
    pub fn percentage(rate: f64) -> Self {
        Self::new(rate, 0.0)
    }

    /// `None` for negative, non-finite or implausibly large prices.
    pub fn quote(&self, sale_price: f64) -> Option<FeeQuote> {
        if !(0.0..=MAX_EXACT_AMOUNT).contains(&sale_price) {
            return None;
        }

        let percentage_fee = sale_price * self.rate;
        let minimum_applied = percentage_fee < self.minimum_fee;
        let fee = if minimum_applied { self.minimum_fee } else { percentage_fee };

        Some(FeeQuote {
            sale_price,
            fee,
            you_receive: sale_price - fee,
            minimum_applied,
        })
    }

    /// Parses a price typed into the calculator, ignoring `£` and separators.
    pub fn quote_input(&self, input: &str) -> Option<FeeQuote> {
        let cleaned: String = input
            .chars()
            .filter(|c| !matches!(c, '£' | ',') && !c.is_whitespace())
            .collect();
        self.quote(cleaned.parse().ok()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_percent_with_floor() -> FeeSchedule {
        FeeSchedule::new(0.10, 350.0)
    }

    #[test]
    fn test_minimum_fee_applies_below_threshold() {
        let quote = ten_percent_with_floor().quote(1000.0).unwrap();
        assert_eq!(quote.fee, 350.0);
        assert_eq!(quote.you_receive, 650.0);
        assert!(quote.minimum_applied);
    }

    #[test]
    fn test_percentage_applies_above_threshold() {
        let quote = ten_percent_with_floor().quote(10000.0).unwrap();
        assert_eq!(quote.fee, 1000.0);
        assert_eq!(quote.you_receive, 9000.0);
        assert!(!quote.minimum_applied);
    }

    #[test]
    fn test_percentage_only_schedule() {
        let schedule = FeeSchedule::percentage(0.05);
        assert_eq!(schedule.quote(1000.0).map(|q| q.fee), Some(50.0));
        assert_eq!(schedule.quote(0.0).map(|q| q.fee), Some(0.0));
    }

    #[test]
    fn test_invalid_prices() {
        let schedule = ten_percent_with_floor();
        assert!(schedule.quote(-1.0).is_none());
        assert!(schedule.quote(f64::NAN).is_none());
        assert!(schedule.quote(f64::INFINITY).is_none());
        assert!(schedule.quote(1e20).is_none());
        assert!(schedule.quote_input("1e20").is_none());
        assert!(schedule.quote_input("a lot").is_none());
    }

    #[test]
    fn test_quote_input_and_display() {
        let quote = ten_percent_with_floor().quote_input("£12,500").unwrap();
        assert_eq!(quote.fee, 1250.0);

        let display = quote.display();
        assert_eq!(display.sale_price, "£12,500");
        assert_eq!(display.fee, "£1,250");
        assert_eq!(display.you_receive, "£11,250");
    }

    #[test]
    fn test_default_schedule_matches_config() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule, ten_percent_with_floor());
    }
}
