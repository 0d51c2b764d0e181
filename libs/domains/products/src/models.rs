use axum_helpers::errors::messages;
use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Fixed number of products per page
pub const PAGE_SIZE: u64 = 10;

/// Largest skip the driver can encode (BSON int64)
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, a 24-character hex string
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Creation time, set by the store
    pub created_ad: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// All three fields are required and must be non-empty. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[schema(example = "Rust in Action")]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    #[schema(example = "Systems programming book")]
    pub description: String,
    #[validate(length(min = 1, message = "url must not be empty"))]
    #[schema(example = "https://example.com/rust-in-action")]
    pub url: String,
}

/// DTO for updating an existing product
///
/// Absent (or `null`) fields are left unchanged. Fields outside this set,
/// including `id` and `createdAd`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: Option<String>,
}

impl UpdateProduct {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.url.is_none()
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    #[validate(range(min = 1, message = "page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

/// One page of products plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub docs: Vec<Product>,
    pub total_docs: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: u64,
    /// 1-based position of the first document of this page
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

impl ProductPage {
    /// Build the page metadata for `docs`, the slice at `page` of a
    /// collection holding `total_docs` documents.
    pub fn new(docs: Vec<Product>, total_docs: u64, page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        // An empty collection still reports one (empty) page.
        let total_pages = total_docs.div_ceil(limit).max(1);
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            docs,
            total_docs,
            limit,
            page,
            total_pages,
            paging_counter: (page - 1).saturating_mul(limit).saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }

    /// Number of documents to skip to reach `page`, capped at what the
    /// store accepts. Any page that far out is past the end anyway.
    pub fn offset(page: u64, limit: u64) -> u64 {
        page.saturating_sub(1).saturating_mul(limit).min(MAX_OFFSET)
    }
}

/// `{"message": "ok", "product": {...}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = "ok")]
    pub message: String,
    pub product: Product,
}

impl ProductResponse {
    pub fn ok(product: Product) -> Self {
        Self {
            message: messages::OK.to_string(),
            product,
        }
    }
}

/// `{"message": "ok", "products": {page}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    #[schema(example = "ok")]
    pub message: String,
    pub products: ProductPage,
}

impl ProductListResponse {
    pub fn ok(products: ProductPage) -> Self {
        Self {
            message: messages::OK.to_string(),
            products,
        }
    }
}

/// `{"message": "ok"}`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "ok")]
    pub message: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            message: messages::OK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Product {
        Product {
            id: ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
            title: "A".into(),
            description: "B".into(),
            url: "C".into(),
            created_ad: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn test_product_serializes_with_hex_id_and_created_ad() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "507f1f77bcf86cd799439011",
                "title": "A",
                "description": "B",
                "url": "C",
                "createdAd": "2023-11-14T22:13:20Z"
            })
        );
    }

    #[test]
    fn test_create_product_requires_every_field() {
        let err = serde_json::from_value::<CreateProduct>(json!({ "title": "A", "url": "C" }));
        assert!(err.is_err());
    }

    #[test]
    fn test_create_product_rejects_empty_strings() {
        let input: CreateProduct =
            serde_json::from_value(json!({ "title": "", "description": "B", "url": "C" }))
                .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_create_product_ignores_unknown_fields() {
        let input: CreateProduct = serde_json::from_value(
            json!({ "title": "A", "description": "B", "url": "C", "price": 10 }),
        )
        .unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_product_ignores_immutable_fields() {
        let input: UpdateProduct = serde_json::from_value(json!({
            "id": "507f1f77bcf86cd799439011",
            "_id": "507f1f77bcf86cd799439011",
            "createdAd": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(input.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_product_rejects_present_empty_field() {
        let input: UpdateProduct = serde_json::from_value(json!({ "url": "" })).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_page_metadata_first_page() {
        let page = ProductPage::new(vec![], 25, 1, PAGE_SIZE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.paging_counter, 1);
        assert!(!page.has_prev_page);
        assert!(page.has_next_page);
        assert_eq!(page.prev_page, None);
        assert_eq!(page.next_page, Some(2));
    }

    #[test]
    fn test_page_metadata_last_page() {
        let page = ProductPage::new(vec![], 25, 3, PAGE_SIZE);
        assert_eq!(page.paging_counter, 21);
        assert!(page.has_prev_page);
        assert!(!page.has_next_page);
        assert_eq!(page.prev_page, Some(2));
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_page_metadata_empty_collection() {
        let page = ProductPage::new(vec![], 0, 1, PAGE_SIZE);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.paging_counter, 1);
        assert!(!page.has_prev_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_page_metadata_far_past_the_end() {
        let page = ProductPage::new(vec![], 3, u64::MAX, PAGE_SIZE);
        assert_eq!(page.page, u64::MAX);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(u64::MAX - 1));
        assert_eq!(page.paging_counter, u64::MAX);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let value = serde_json::to_value(ProductPage::new(vec![], 0, 1, PAGE_SIZE)).unwrap();
        assert_eq!(
            value,
            json!({
                "docs": [],
                "totalDocs": 0,
                "limit": 10,
                "page": 1,
                "totalPages": 1,
                "pagingCounter": 1,
                "hasPrevPage": false,
                "hasNextPage": false,
                "prevPage": null,
                "nextPage": null
            })
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(ProductPage::offset(1, PAGE_SIZE), 0);
        assert_eq!(ProductPage::offset(3, PAGE_SIZE), 20);
        assert_eq!(
            ProductPage::offset(922_337_203_685_477_581, PAGE_SIZE),
            9_223_372_036_854_775_800
        );
        assert_eq!(
            ProductPage::offset(922_337_203_685_477_582, PAGE_SIZE),
            i64::MAX as u64
        );
        assert_eq!(ProductPage::offset(u64::MAX, PAGE_SIZE), i64::MAX as u64);
    }
}
