//! Product service - business logic layer

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductQuery, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer validates documents before they reach the store and
/// coerces client-facing ids into store ids.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a batch of products, one insert per element in input order.
    ///
    /// A validation failure stops the batch before the offending element is
    /// inserted; earlier inserts are not rolled back.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_many(&self, inputs: Vec<CreateProduct>) -> ProductResult<Vec<ObjectId>> {
        let mut ids = Vec::with_capacity(inputs.len());

        for input in inputs {
            let product = Product::new(input);
            product
                .validate()
                .map_err(|e| ProductError::Validation(e.to_string()))?;

            self.repository.insert(&product).await?;
            ids.push(product.id);
        }

        Ok(ids)
    }

    /// Find products matching the filter.
    ///
    /// A malformed `_id` filter value is a validation error; store failures
    /// propagate rather than degrading to an empty result.
    #[instrument(skip(self))]
    pub async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let id = filter
            .id
            .map(|raw| {
                ObjectId::parse_str(&raw)
                    .map_err(|_| ProductError::Validation(format!("Invalid product id: {}", raw)))
            })
            .transpose()?;

        let query = ProductQuery {
            id,
            name: filter.name,
            price: filter.price,
            currency: filter.currency,
            vendor: filter.vendor,
            is_essential: filter.is_essential,
        };

        self.repository.find(query).await
    }

    /// Get a single product by id. A malformed id reads as "no such
    /// product", same as a miss.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> ProductResult<Product> {
        let oid =
            ObjectId::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))?;

        self.repository
            .get(oid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Update a product: fetch, overlay the provided fields, re-validate
    /// the full document, then replace it in the store.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let oid =
            ObjectId::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))?;

        let mut product = self
            .repository
            .get(oid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.apply_update(input);
        product
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.replace(&product).await?;
        Ok(product)
    }

    /// Delete a product by id, returning the deleted count (0 or 1).
    /// Deleting an absent id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<u64> {
        let oid = ObjectId::parse_str(id)
            .map_err(|_| ProductError::Internal(format!("Invalid product id: {}", id)))?;

        self.repository.delete(oid).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 500,
            currency: "USD".to_string(),
            discount: None,
            vendor: "acme".to_string(),
            accessories: vec!["cable".to_string()],
            is_essential: None,
        }
    }

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::new())
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let service = service();

        let mut input = create_input("kindle");
        input.discount = Some(50);
        input.is_essential = Some(true);

        let ids = service.create_many(vec![input]).await.unwrap();
        assert_eq!(ids.len(), 1);

        let product = service.find_one(&ids[0].to_hex()).await.unwrap();
        assert_eq!(product.id, ids[0]);
        assert_eq!(product.name, "kindle");
        assert_eq!(product.price, 500);
        assert_eq!(product.currency, "USD");
        assert_eq!(product.discount, Some(50));
        assert_eq!(product.vendor, "acme");
        assert_eq!(product.accessories, vec!["cable".to_string()]);
        assert_eq!(product.is_essential, Some(true));
    }

    #[tokio::test]
    async fn test_batch_stops_at_first_invalid_element() {
        let service = service();

        let mut bad = create_input("way too long a name");
        bad.price = 500;

        let result = service
            .create_many(vec![create_input("first"), bad, create_input("third")])
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));

        // The element before the failure was inserted; the one after was not
        let all = service.find(ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "first");
    }

    #[tokio::test]
    async fn test_batch_stops_when_an_insert_fails() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_mock = Arc::clone(&calls);

        let mut repository = MockProductRepository::new();
        // First insert lands, the second fails; the third element must
        // never reach the store
        repository.expect_insert().times(2).returning(move |_| {
            if calls_in_mock.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(())
            } else {
                Err(ProductError::Database("insert failed".to_string()))
            }
        });

        let service = ProductService::new(repository);
        let result = service
            .create_many(vec![
                create_input("first"),
                create_input("second"),
                create_input("third"),
            ])
            .await;

        assert!(matches!(result, Err(ProductError::Database(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_find_filters_by_vendor() {
        let service = service();
        let mut other = create_input("pixel");
        other.vendor = "google".to_string();

        service
            .create_many(vec![create_input("kindle"), other])
            .await
            .unwrap();

        let filter = ProductFilter {
            vendor: Some("google".to_string()),
            ..Default::default()
        };
        let found = service.find(filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "pixel");
    }

    #[tokio::test]
    async fn test_find_rejects_malformed_id_filter() {
        let service = service();
        let filter = ProductFilter {
            id: Some("not-a-hex-id".to_string()),
            ..Default::default()
        };

        let result = service.find(filter).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_propagates_store_errors() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_find()
            .returning(|_| Err(ProductError::Database("cursor failed".to_string())));

        let service = ProductService::new(repository);
        let result = service.find(ProductFilter::default()).await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }

    #[tokio::test]
    async fn test_find_one_malformed_id_reads_as_not_found() {
        let result = service().find_one("garbage").await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_one_missing_id_is_not_found() {
        let result = service().find_one(&ObjectId::new().to_hex()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_overlays_partial_fields() {
        let service = service();
        let ids = service
            .create_many(vec![create_input("kindle")])
            .await
            .unwrap();
        let id = ids[0].to_hex();

        let updated = service
            .update(
                &id,
                UpdateProduct {
                    price: Some(999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 999);
        assert_eq!(updated.name, "kindle");
        assert_eq!(updated.vendor, "acme");

        // The replacement is persisted
        let fetched = service.find_one(&id).await.unwrap();
        assert_eq!(fetched.price, 999);
    }

    #[tokio::test]
    async fn test_update_revalidates_full_document() {
        let service = service();
        let ids = service
            .create_many(vec![create_input("kindle")])
            .await
            .unwrap();

        let result = service
            .update(
                &ids[0].to_hex(),
                UpdateProduct {
                    price: Some(5000),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));

        // The stored document is unchanged
        let fetched = service.find_one(&ids[0].to_hex()).await.unwrap();
        assert_eq!(fetched.price, 500);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let result = service()
            .update(&ObjectId::new().to_hex(), UpdateProduct::default())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_count() {
        let service = service();
        let ids = service
            .create_many(vec![create_input("kindle")])
            .await
            .unwrap();

        assert_eq!(service.delete(&ids[0].to_hex()).await.unwrap(), 1);
        // Deleting an absent id yields 0, not an error
        assert_eq!(service.delete(&ids[0].to_hex()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_malformed_id_is_internal_error() {
        let result = service().delete("garbage").await;
        assert!(matches!(result, Err(ProductError::Internal(_))));
    }
}
