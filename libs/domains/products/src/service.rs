//! Product Service - outcome classification between handlers and the store

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct, PAGE_SIZE};
use crate::repository::ProductRepository;

/// Product service
///
/// Each operation issues exactly one repository call and turns its outcome
/// into success, [`ProductError::Validation`] or [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List one page of products, [`PAGE_SIZE`] per page
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: u64) -> ProductResult<ProductPage> {
        if page == 0 {
            return Err(ProductError::Validation("page must be at least 1".into()));
        }

        self.repository.find_all_paginated(page, PAGE_SIZE).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository.insert(input).await
    }

    /// Update the fields present in `input`; an empty update returns the
    /// record unchanged.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        input.validate()?;

        self.repository
            .update_by_id(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning the removed record
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .delete_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
