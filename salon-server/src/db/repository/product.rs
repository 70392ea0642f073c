//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Product;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        self.base.find_all_newest_first(PRODUCT_TABLE).await
    }

    /// Products whose category equals `category` exactly (case-sensitive), newest first
    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE category = $category ORDER BY created_at DESC")
            .bind(("category", category.to_string()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by pure key
    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, key)).await?;
        Ok(product)
    }

    /// Insert a new product; the database assigns the key
    pub async fn create(&self, product: Product) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create(PRODUCT_TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".into()))
    }

    /// Replace a product read at `expected_version`
    pub async fn save(&self, key: &str, product: Product, expected_version: u64) -> RepoResult<Product> {
        self.base
            .replace_if_version(PRODUCT_TABLE, key, product, expected_version)
            .await
    }

    /// Hard delete, returning the removed record (`None` if it did not exist)
    pub async fn delete(&self, key: &str) -> RepoResult<Option<Product>> {
        let deleted: Option<Product> = self.base.db().delete((PRODUCT_TABLE, key)).await?;
        Ok(deleted)
    }
}
