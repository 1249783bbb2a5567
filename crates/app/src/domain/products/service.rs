//! Products service.
//!
//! Public catalog reads; admin-gated writes. Deletion is a soft
//! deactivation so stored orders keep resolvable product references.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use candela_core::{catalog::ProductId, money};

use crate::{
    auth::{SessionProvider, require_admin},
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::ProductRecord,
        repository::{ProductPatch, ProductsRepository},
    },
};

pub struct StoreProductsService {
    repository: Arc<dyn ProductsRepository>,
    session: Arc<dyn SessionProvider>,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            repository,
            session,
        }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut records = self.repository.list_products().await?;
        records.retain(|record| record.is_active);
        records.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(records)
    }

    async fn list_all_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        require_admin(self.session.as_ref())?;

        let mut records = self.repository.list_products().await?;
        records.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(records)
    }

    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        require_admin(self.session.as_ref())?;

        let price = money::parse_amount(&product.price)?;
        let now = Timestamp::now();

        let record = ProductRecord {
            id: ProductId::generate(),
            name: product.name,
            description: product.description,
            price,
            image_url: product.image_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert_product(record).await?;

        tracing::info!(product = %created.id, name = %created.name, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        require_admin(self.session.as_ref())?;

        let price = update
            .price
            .as_deref()
            .map(money::parse_amount)
            .transpose()?;

        let updated = self
            .repository
            .update_product(
                id,
                ProductPatch {
                    name: update.name,
                    description: update.description,
                    price,
                    image_url: update.image_url,
                    is_active: None,
                },
            )
            .await?;

        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError> {
        require_admin(self.session.as_ref())?;

        self.repository
            .update_product(
                id,
                ProductPatch {
                    is_active: Some(false),
                    ..ProductPatch::default()
                },
            )
            .await?;

        tracing::info!(product = %id, "product deactivated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Active products, sorted by name. Public.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Every product including deactivated ones. Admin only.
    async fn list_all_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// One product by id. Public.
    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product. Admin only.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Partially updates a product. Admin only.
    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product by deactivating it. Admin only.
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use candela_core::money::AmountError;

    use crate::{auth::AuthError, test::TestContext};

    use super::*;

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: price.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_product_parses_the_price() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx
            .products
            .create_product(new_product("Lavender Candle", "30.00"))
            .await?;

        assert_eq!(created.price, Decimal::new(30_00, 2));
        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_bad_prices() {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .create_product(new_product("Broken", "abc"))
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::InvalidPrice(AmountError::Unparseable(_)))
            ),
            "expected price rejection, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_requires_an_admin() {
        let ctx = TestContext::new();
        ctx.session.sign_out();

        let result = ctx
            .products
            .create_product(new_product("Sneaky", "1.00"))
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::Auth(AuthError::Unauthenticated))
            ),
            "guests may not create products, got {result:?}"
        );
    }

    #[tokio::test]
    async fn public_listing_hides_deactivated_products() -> TestResult {
        let ctx = TestContext::new();

        let keep = ctx
            .products
            .create_product(new_product("Keep", "10.00"))
            .await?;
        let retired = ctx
            .products
            .create_product(new_product("Retired", "10.00"))
            .await?;

        ctx.products.delete_product(retired.id).await?;

        ctx.session.sign_out();
        let listed = ctx.products.list_products().await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|record| record.id), Some(keep.id));

        Ok(())
    }

    #[tokio::test]
    async fn admin_listing_includes_deactivated_products() -> TestResult {
        let ctx = TestContext::new();

        ctx.products
            .create_product(new_product("Keep", "10.00"))
            .await?;
        let retired = ctx
            .products
            .create_product(new_product("Retired", "10.00"))
            .await?;
        ctx.products.delete_product(retired.id).await?;

        let listed = ctx.products.list_all_products().await?;

        assert_eq!(listed.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn public_listing_is_sorted_by_name() -> TestResult {
        let ctx = TestContext::new();

        ctx.products
            .create_product(new_product("Vanilla", "10.00"))
            .await?;
        ctx.products
            .create_product(new_product("Amber", "10.00"))
            .await?;

        let listed = ctx.products.list_products().await?;
        let names: Vec<_> = listed.iter().map(|record| record.name.as_str()).collect();

        assert_eq!(names, ["Amber", "Vanilla"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_the_given_fields() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx
            .products
            .create_product(new_product("Citrus Candle", "20.00"))
            .await?;

        let updated = ctx
            .products
            .update_product(
                created.id,
                ProductUpdate {
                    price: Some("25.50".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.price, Decimal::new(25_50, 2));
        assert_eq!(updated.name, "Citrus Candle");
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_of_unknown_product_reads_as_not_found() {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .update_product(ProductId::generate(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_product_is_still_fetchable_by_id() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx
            .products
            .create_product(new_product("Retired", "10.00"))
            .await?;
        ctx.products.delete_product(created.id).await?;

        let fetched = ctx.products.get_product(created.id).await?;

        assert!(!fetched.is_active, "soft delete deactivates, not removes");

        Ok(())
    }
}
