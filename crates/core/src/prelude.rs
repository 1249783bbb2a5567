//! Candela prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartItem},
    catalog::{CatalogProduct, ProductId},
    checkout::{CheckoutDetails, CheckoutError, ValidationError, build_order, validate},
    money::{format_brl, parse_amount, round_total},
    orders::{
        Address, Customer, Order, OrderId, OrderItem, OrderNumber, OrderStatus, PaymentStatus,
    },
    pricing::{PriceQuote, ShippingPolicy, quote, shipping_cost, subtotal},
};
