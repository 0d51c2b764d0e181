//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};
use crate::repository::ProductRepository;

/// Collection holding product documents
pub const COLLECTION_NAME: &str = "products";

/// Stored shape of a product.
///
/// Extra fields written by other clients (such as `__v`) are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "createdAd")]
    pub created_ad: bson::DateTime,
}

impl ProductDocument {
    fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new(),
            title: input.title,
            description: input.description,
            url: input.url,
            created_ad: bson::DateTime::now(),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            url: doc.url,
            created_ad: DateTime::<Utc>::from_timestamp_millis(doc.created_ad.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

/// `$set` document for the fields present in `input`.
fn set_document(input: &UpdateProduct) -> Document {
    let mut set = Document::new();
    if let Some(ref title) = input.title {
        set.insert("title", title.as_str());
    }
    if let Some(ref description) = input.description {
        set.insert("description", description.as_str());
    }
    if let Some(ref url) = input.url {
        set.insert("url", url.as_str());
    }
    set
}

/// Insertion-ordered slice for `page`.
fn page_options(page: u64, page_size: u64) -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "_id": 1 })
        .skip(ProductPage::offset(page, page_size))
        .limit(i64::try_from(page_size).unwrap_or(i64::MAX))
        .build()
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_all_paginated(&self, page: u64, page_size: u64) -> ProductResult<ProductPage> {
        let total_docs = self.collection.count_documents(doc! {}).await?;

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(page_options(page, page_size))
            .await?;
        let docs: Vec<ProductDocument> = cursor.try_collect().await?;

        Ok(ProductPage::new(
            docs.into_iter().map(Product::from).collect(),
            total_docs,
            page,
            page_size,
        ))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let document = ProductDocument::new(input);

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created");
        Ok(document.into())
    }

    #[instrument(skip(self, input), fields(product_id = %id))]
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let set = set_document(&input);

        // MongoDB rejects an empty $set.
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .with_options(options)
            .await?;

        if updated.is_some() {
            tracing::info!("Product updated");
        }
        Ok(updated.map(Product::from))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if deleted.is_some() {
            tracing::info!("Product deleted");
        }
        Ok(deleted.map(Product::from))
    }
}
