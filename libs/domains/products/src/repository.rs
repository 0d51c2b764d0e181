use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};

/// Repository trait for Product persistence
///
/// Lookups that match nothing return `Ok(None)`; only store failures are
/// errors. Handlers never see an implementation, only this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Products in insertion order, `page_size` per page, `page` 1-based
    async fn find_all_paginated(&self, page: u64, page_size: u64) -> ProductResult<ProductPage>;

    /// Store a new product, assigning its id and creation time
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Apply the present fields and return the updated record
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>>;

    /// Remove the record and return it as it was
    async fn delete_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;
}
