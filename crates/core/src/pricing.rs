//! Pricing engine.
//!
//! Pure functions over a cart and a shipping policy. Line math is exact
//! decimal; the two-place rounding happens once, on the final total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::Cart, money};

/// Shipping cost policy: a flat fee waived above a subtotal threshold.
///
/// The constants are configuration, not law — swap the values (or the whole
/// policy) without touching the pricing functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,

    /// Flat fee charged otherwise.
    pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
    /// Free shipping strictly above 100.00, otherwise a flat 15.00.
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(100_00, 2),
            flat_fee: Decimal::new(15_00, 2),
        }
    }
}

/// A priced-out cart: subtotal, shipping, and the final total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Sum of `unit_price × quantity` across lines.
    pub subtotal: Decimal,

    /// Shipping cost under the policy.
    pub shipping_cost: Decimal,

    /// `subtotal + shipping_cost`, rounded to two places.
    pub total: Decimal,
}

/// Exact-decimal sum of `unit_price × quantity` over the cart.
#[must_use]
pub fn subtotal(cart: &Cart) -> Decimal {
    cart.items()
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum()
}

/// Shipping cost for a given subtotal.
///
/// Zero if and only if the subtotal is strictly greater than the free
/// threshold; at exactly the threshold the flat fee still applies.
#[must_use]
pub fn shipping_cost(subtotal: Decimal, policy: &ShippingPolicy) -> Decimal {
    if subtotal > policy.free_shipping_threshold {
        Decimal::ZERO
    } else {
        policy.flat_fee
    }
}

/// Prices out a cart under the policy.
///
/// An empty cart quotes as all zeroes: there is nothing to ship, so the
/// flat fee the threshold rule would produce is suppressed. This is a
/// deliberate special case, not a fall-through of the generic formula.
#[must_use]
pub fn quote(cart: &Cart, policy: &ShippingPolicy) -> PriceQuote {
    if cart.is_empty() {
        return PriceQuote {
            subtotal: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            total: Decimal::ZERO,
        };
    }

    let subtotal = subtotal(cart);
    let shipping = shipping_cost(subtotal, policy);

    PriceQuote {
        subtotal,
        shipping_cost: shipping,
        total: money::round_total(subtotal + shipping),
    }
}
