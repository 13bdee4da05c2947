//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductQuery};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Build a MongoDB filter document from a ProductQuery
    fn build_filter(query: &ProductQuery) -> mongodb::bson::Document {
        let mut filter = doc! {};

        if let Some(id) = query.id {
            filter.insert("_id", id);
        }
        if let Some(ref name) = query.name {
            filter.insert("name", name);
        }
        if let Some(price) = query.price {
            filter.insert("price", price);
        }
        if let Some(ref currency) = query.currency {
            filter.insert("currency", currency);
        }
        if let Some(ref vendor) = query.vendor {
            filter.insert("vendor", vendor);
        }
        if let Some(is_essential) = query.is_essential {
            filter.insert("is_essential", is_essential);
        }

        filter
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.collection.insert_one(product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let filter = Self::build_filter(&query);
        let cursor = self.collection.find(filter).await?;

        // Cursor failures surface as errors, never as an empty result
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> ProductResult<()> {
        self.collection
            .replace_one(doc! { "_id": product.id }, product)
            .await?;

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        tracing::info!(product_id = %id, deleted = result.deleted_count, "Product delete executed");
        Ok(result.deleted_count)
    }
}
