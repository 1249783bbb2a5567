//! Guest checkout: input validation and order building.
//!
//! Validation runs before anything else and collects every failing field,
//! so a form can mark all of them in one round trip. Building an order
//! never touches the cart — clearing it is the caller's job, and only
//! after persistence has been confirmed.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::Cart,
    orders::{Address, Customer, Order, OrderItem, OrderNumber, OrderStatus, PaymentStatus},
    pricing::{self, ShippingPolicy},
};

/// Raw checkout form input, as submitted.
///
/// Fields arrive untrimmed; validation normalizes them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    /// Customer full name.
    pub customer_name: String,

    /// Customer email.
    pub customer_email: String,

    /// Optional phone / WhatsApp contact.
    #[serde(default)]
    pub customer_phone: Option<String>,

    /// Street name.
    pub address_street: String,

    /// Street number.
    pub address_number: String,

    /// Optional complement.
    #[serde(default)]
    pub address_complement: Option<String>,

    /// City.
    pub address_city: String,

    /// Two-letter state code.
    pub address_state: String,

    /// Postal code.
    pub address_zip: String,
}

/// The checkout form fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutField {
    /// `customerName`
    CustomerName,
    /// `customerEmail`
    CustomerEmail,
    /// `addressStreet`
    AddressStreet,
    /// `addressNumber`
    AddressNumber,
    /// `addressCity`
    AddressCity,
    /// `addressState`
    AddressState,
    /// `addressZip`
    AddressZip,
}

impl CheckoutField {
    /// The wire name of the field, matching the submitted payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::CustomerEmail => "customerEmail",
            Self::AddressStreet => "addressStreet",
            Self::AddressNumber => "addressNumber",
            Self::AddressCity => "addressCity",
            Self::AddressState => "addressState",
            Self::AddressZip => "addressZip",
        }
    }
}

impl Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure carrying every rejected field with its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("checkout input rejected: {} field(s) failed validation", .fields.len())]
pub struct ValidationError {
    /// Field → message, for field-scoped rendering.
    pub fields: BTreeMap<CheckoutField, String>,
}

/// Errors from building an order out of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more input fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn require(
    errors: &mut BTreeMap<CheckoutField, String>,
    field: CheckoutField,
    value: &str,
    message: &str,
) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors.insert(field, message.to_string());
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToString::to_string)
}

/// Minimal syntactic email check: exactly one `@`, both sides non-empty.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Validates raw checkout input into normalized customer and address data.
///
/// All rules are evaluated; the error carries the full field → message
/// mapping rather than stopping at the first failure.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every rejected field.
pub fn validate(details: &CheckoutDetails) -> Result<(Customer, Address), ValidationError> {
    let mut errors = BTreeMap::new();

    let name = require(
        &mut errors,
        CheckoutField::CustomerName,
        &details.customer_name,
        "name is required",
    );

    let email = match details.customer_email.trim() {
        trimmed if trimmed.is_empty() || !looks_like_email(trimmed) => {
            errors.insert(
                CheckoutField::CustomerEmail,
                "a valid email is required".to_string(),
            );
            None
        }
        trimmed => Some(trimmed.to_string()),
    };

    let street = require(
        &mut errors,
        CheckoutField::AddressStreet,
        &details.address_street,
        "street is required",
    );
    let number = require(
        &mut errors,
        CheckoutField::AddressNumber,
        &details.address_number,
        "street number is required",
    );
    let city = require(
        &mut errors,
        CheckoutField::AddressCity,
        &details.address_city,
        "city is required",
    );
    let state = require(
        &mut errors,
        CheckoutField::AddressState,
        &details.address_state,
        "state is required",
    );
    let zip = require(
        &mut errors,
        CheckoutField::AddressZip,
        &details.address_zip,
        "postal code is required",
    );

    match (name, email, street, number, city, state, zip) {
        (Some(name), Some(email), Some(street), Some(number), Some(city), Some(state), Some(zip))
            if errors.is_empty() =>
        {
            Ok((
                Customer {
                    name,
                    email,
                    phone: optional(details.customer_phone.as_deref()),
                },
                Address {
                    street,
                    number,
                    complement: optional(details.address_complement.as_deref()),
                    city,
                    state,
                    zip,
                },
            ))
        }
        _ => Err(ValidationError { fields: errors }),
    }
}

/// Builds an immutable [`Order`] from a cart and checkout input.
///
/// Validation happens first — no side effects on invalid input. On
/// success the order is a full snapshot: a fresh [`OrderNumber`], item
/// lines with unit prices fixed as of now, and totals from the pricing
/// engine. Status starts at `pending` for both fulfillment and payment.
///
/// The cart is not consumed and not mutated; the caller clears it only
/// after the order has been durably persisted, so a failed submission
/// leaves everything in place for a retry.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: nothing to order.
/// - [`CheckoutError::Validation`]: input failed validation.
pub fn build_order(
    cart: &Cart,
    details: &CheckoutDetails,
    policy: &ShippingPolicy,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let (customer, address) = validate(details)?;
    let quote = pricing::quote(cart, policy);

    Ok(Order {
        order_number: OrderNumber::generate(),
        customer,
        address,
        items: cart.items().iter().map(OrderItem::snapshot).collect(),
        total_amount: quote.total,
        shipping_cost: quote.shipping_cost,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        created_at: Timestamp::now(),
    })
}
