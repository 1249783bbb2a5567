//! Test Helpers

use candela_core::{
    cart::Cart,
    catalog::{CatalogProduct, ProductId},
    checkout::CheckoutDetails,
};

/// A complete, valid checkout form.
pub(crate) fn checkout_details() -> CheckoutDetails {
    CheckoutDetails {
        customer_name: "Ana Souza".to_string(),
        customer_email: "ana@example.com".to_string(),
        customer_phone: Some("(11) 9 0000-0000".to_string()),
        address_street: "Rua das Flores".to_string(),
        address_number: "123".to_string(),
        address_complement: None,
        address_city: "São Paulo".to_string(),
        address_state: "SP".to_string(),
        address_zip: "01234-567".to_string(),
    }
}

/// A catalog entry that exists only for cart-building.
pub(crate) fn catalog_product(name: &str, price: &str) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::generate(),
        name: name.to_string(),
        price: price.parse().unwrap_or_default(),
        image_url: None,
        is_active: true,
    }
}

/// A cart holding one line per `(price, quantity)` pair.
pub(crate) fn cart_with(lines: &[(&str, u32)]) -> Cart {
    let mut cart = Cart::new();

    for (price, quantity) in lines {
        cart.add_item(&catalog_product("Candle", price), *quantity);
    }

    cart
}
