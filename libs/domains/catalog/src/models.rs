use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
/// Largest page a caller can request; bigger values are corrected down.
pub const MAX_PAGE_SIZE: u64 = 50;

/// A product brand (reference data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: i32,
    pub name: String,
}

/// A product type (reference data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
}

/// A catalog product with its brand and type always materialized.
///
/// The brand and type are plain fields rather than options: every query
/// path that produces a `Product` hydrates both, so a partially populated
/// product cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub picture_url: String,
    pub brand: Brand,
    pub product_type: ProductType,
}

/// Sort orders accepted by the product list endpoint.
///
/// The wire values are kebab-case (`name-asc`, `price-asc`, `price-desc`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
    /// Alphabetical by name; the default.
    #[default]
    NameAsc,
    PriceAsc,
    PriceDesc,
}

/// Query parameters for the product list endpoint.
///
/// Paging inputs are corrected rather than rejected: a page index below 1
/// becomes 1, a page size below 1 becomes the default, and a page size
/// above [`MAX_PAGE_SIZE`] is capped. The raw values stay private; callers
/// read the clamped accessors.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductParams {
    /// Restrict to a single brand
    pub brand_id: Option<i32>,
    /// Restrict to a single product type
    pub type_id: Option<i32>,
    /// Case-insensitive substring match on the product name
    pub search: Option<String>,
    /// Sort order, `name-asc` when omitted
    pub sort: SortKey,
    /// 1-based page index
    page_index: Option<i64>,
    /// Items per page, capped at 50
    page_size: Option<i64>,
}

impl ProductParams {
    pub fn new(
        brand_id: Option<i32>,
        type_id: Option<i32>,
        search: Option<String>,
        sort: SortKey,
        page_index: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            brand_id,
            type_id,
            search,
            sort,
            page_index,
            page_size,
        }
    }

    /// Effective 1-based page index.
    pub fn page_index(&self) -> u64 {
        match self.page_index {
            Some(i) if i >= 1 => i as u64,
            _ => 1,
        }
    }

    /// Effective page size after default and cap correction.
    pub fn page_size(&self) -> u64 {
        match self.page_size {
            Some(s) if s >= 1 => (s as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Rows to skip for the effective page. Saturates rather than
    /// overflowing for absurdly large page indices.
    pub fn skip(&self) -> u64 {
        self.page_size().saturating_mul(self.page_index() - 1)
    }
}

/// Envelope for paged list responses.
///
/// `count` is the size of the whole filtered set, not of this page; it
/// must come from an unpaged count query over the same filters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination<T> {
    pub page_index: u64,
    pub page_size: u64,
    pub count: u64,
    pub data: Vec<T>,
}

impl<T> Pagination<T> {
    pub fn new(page_index: u64, page_size: u64, count: u64, data: Vec<T>) -> Self {
        Self {
            page_index,
            page_size,
            count,
            data,
        }
    }
}

/// Product representation returned over HTTP.
///
/// Flattens the brand and type to their names and resolves the picture
/// URL against the configured public asset base.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub picture_url: String,
    pub product_brand: String,
    pub product_type: String,
}

impl ProductResponse {
    pub fn from_entity(product: &Product, assets_base_url: &str) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            picture_url: format!("{}{}", assets_base_url, product.picture_url),
            product_brand: product.brand.name.clone(),
            product_type: product.product_type.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with_paging(page_index: Option<i64>, page_size: Option<i64>) -> ProductParams {
        ProductParams::new(None, None, None, SortKey::default(), page_index, page_size)
    }

    #[test]
    fn test_defaults_apply_when_paging_omitted() {
        let params = params_with_paging(None, None);
        assert_eq!(params.page_index(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_oversized_page_size_is_capped() {
        let params = params_with_paging(None, Some(1000));
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_non_positive_paging_is_corrected() {
        let params = params_with_paging(Some(0), Some(-3));
        assert_eq!(params.page_index(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);

        let params = params_with_paging(Some(-5), Some(0));
        assert_eq!(params.page_index(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_skip_counts_full_preceding_pages() {
        let params = params_with_paging(Some(3), Some(10));
        assert_eq!(params.skip(), 20);
    }

    #[test]
    fn test_huge_page_index_saturates_instead_of_overflowing() {
        let params = params_with_paging(Some(i64::MAX), Some(50));
        assert_eq!(params.page_index(), i64::MAX as u64);
        assert_eq!(params.skip(), u64::MAX);
    }

    #[test]
    fn test_sort_key_wire_values() {
        assert_eq!(
            serde_json::from_str::<SortKey>("\"price-desc\"").unwrap(),
            SortKey::PriceDesc
        );
        assert_eq!(SortKey::NameAsc.to_string(), "name-asc");
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let page = Pagination::new(2, 6, 17, vec![1, 2, 3]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageIndex"], 2);
        assert_eq!(json["pageSize"], 6);
        assert_eq!(json["count"], 17);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_product_response_resolves_picture_url() {
        let product = Product {
            id: 1,
            name: "Wool Beanie".to_string(),
            description: "Warm".to_string(),
            price: 19.99,
            picture_url: "images/products/hat-beanie.png".to_string(),
            brand: Brand {
                id: 1,
                name: "Northcrest".to_string(),
            },
            product_type: ProductType {
                id: 4,
                name: "Hats".to_string(),
            },
        };

        let response = ProductResponse::from_entity(&product, "https://cdn.example.com/");
        assert_eq!(
            response.picture_url,
            "https://cdn.example.com/images/products/hat-beanie.png"
        );
        assert_eq!(response.product_brand, "Northcrest");
        assert_eq!(response.product_type, "Hats");
    }
}
