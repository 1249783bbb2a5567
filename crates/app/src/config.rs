//! Runtime configuration.
//!
//! Everything tunable comes in through CLI flags with env-var fallbacks,
//! after a `.env` pass. The shipping constants stay strings here and go
//! through the money boundary validation when the policy is built.

use clap::Parser;

use candela_core::{
    money::{self, AmountError},
    pricing::ShippingPolicy,
};

/// Candela storefront runtime configuration.
#[derive(Debug, Parser)]
#[command(name = "candela", about = "Candela storefront services", long_about = None)]
pub struct AppConfig {
    /// Subtotals strictly above this ship free.
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value = "100.00")]
    pub free_shipping_threshold: String,

    /// Flat shipping fee below the threshold.
    #[arg(long, env = "FLAT_SHIPPING_FEE", default_value = "15.00")]
    pub flat_shipping_fee: String,

    /// Additional attempts after an order-number collision.
    #[arg(long, env = "ORDER_NUMBER_RETRIES", default_value_t = 3)]
    pub order_number_retries: u32,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Builds the shipping policy from the configured constants.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] when a configured amount is not a valid
    /// two-place decimal.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy, AmountError> {
        Ok(ShippingPolicy {
            free_shipping_threshold: money::parse_amount(&self.free_shipping_threshold)?,
            flat_fee: money::parse_amount(&self.flat_shipping_fee)?,
        })
    }
}
