use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductQuery};

/// Repository trait for Product persistence
///
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a single product
    async fn insert(&self, product: &Product) -> ProductResult<()>;

    /// Get a product by id
    async fn get(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Find products matching a query
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Replace the stored document with the given product (matched by id)
    async fn replace(&self, product: &Product) -> ProductResult<()>;

    /// Delete a product by id, returning the number of removed documents
    async fn delete(&self, id: ObjectId) -> ProductResult<u64>;
}

/// In-memory implementation backed by a HashMap, for tests and local runs
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ObjectId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(product: &Product, query: &ProductQuery) -> bool {
    if let Some(id) = query.id {
        if product.id != id {
            return false;
        }
    }
    if let Some(ref name) = query.name {
        if &product.name != name {
            return false;
        }
    }
    if let Some(price) = query.price {
        if product.price != price {
            return false;
        }
    }
    if let Some(ref currency) = query.currency {
        if &product.currency != currency {
            return false;
        }
    }
    if let Some(ref vendor) = query.vendor {
        if &product.vendor != vendor {
            return false;
        }
    }
    if let Some(is_essential) = query.is_essential {
        if product.is_essential != Some(is_essential) {
            return false;
        }
    }
    true
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| matches(p, &query))
            .cloned()
            .collect())
    }

    async fn replace(&self, product: &Product) -> ProductResult<()> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<u64> {
        match self.products.write().await.remove(&id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }
}
