use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Brand, Pagination, Product, ProductParams, ProductType};
use crate::repository::Repository;
use crate::specification::Specification;

/// Service layer for catalog read operations.
///
/// Holds one repository per entity behind trait objects so the HTTP layer
/// is indifferent to the backing store.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn Repository<Product>>,
    brands: Arc<dyn Repository<Brand>>,
    types: Arc<dyn Repository<ProductType>>,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn Repository<Product>>,
        brands: Arc<dyn Repository<Brand>>,
        types: Arc<dyn Repository<ProductType>>,
    ) -> Self {
        Self {
            products,
            brands,
            types,
        }
    }

    /// One page of products plus the total count of the filtered set.
    ///
    /// Builds the count and page specifications from the same params, so
    /// the envelope's `count` always describes the same filtered set the
    /// page was cut from. Either query failing fails the operation.
    pub async fn list_products(
        &self,
        params: &ProductParams,
    ) -> CatalogResult<Pagination<Product>> {
        let count_spec = Specification::product_count(params);
        let page_spec = Specification::product_page(params);

        let count = self.products.count(&count_spec).await?;
        let data = self.products.list(&page_spec).await?;

        tracing::debug!(
            count,
            page_index = params.page_index(),
            page_size = params.page_size(),
            "Listed products"
        );

        Ok(Pagination::new(
            params.page_index(),
            params.page_size(),
            count,
            data,
        ))
    }

    /// A single product with brand and type hydrated.
    pub async fn get_product(&self, id: i32) -> CatalogResult<Product> {
        let spec = Specification::product_by_id(id);
        self.products
            .get_entity_with_spec(&spec)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// All brands, ordered by id.
    pub async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
        self.brands.list_all().await
    }

    /// All product types, ordered by id.
    pub async fn list_types(&self) -> CatalogResult<Vec<ProductType>> {
        self.types.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;
    use crate::models::SortKey;
    use crate::repository::MockRepository;
    use mockall::predicate::always;

    fn service_with_products(products: MockRepository<Product>) -> CatalogService {
        CatalogService::new(
            Arc::new(products),
            Arc::new(MockRepository::<Brand>::new()),
            Arc::new(MockRepository::<ProductType>::new()),
        )
    }

    #[tokio::test]
    async fn test_list_products_combines_count_and_page() {
        let mut products = MockRepository::<Product>::new();
        products
            .expect_count()
            .with(always())
            .returning(|_| Ok(17));
        products
            .expect_list()
            .with(always())
            .returning(|_| Ok(vec![product(1, "A", 10.0, 1, 1), product(2, "B", 12.5, 1, 1)]));

        let service = service_with_products(products);
        let params = ProductParams::new(None, None, None, SortKey::default(), Some(2), Some(2));
        let page = service.list_products(&params).await.unwrap();

        assert_eq!(page.page_index, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.count, 17);
        assert_eq!(page.data.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_reports_clamped_paging() {
        let mut products = MockRepository::<Product>::new();
        products.expect_count().returning(|_| Ok(0));
        products.expect_list().returning(|_| Ok(vec![]));

        let service = service_with_products(products);
        let params =
            ProductParams::new(None, None, None, SortKey::default(), Some(-2), Some(1000));
        let page = service.list_products(&params).await.unwrap();

        assert_eq!(page.page_index, 1);
        assert_eq!(page.page_size, 50);
    }

    #[tokio::test]
    async fn test_get_product_maps_absence_to_not_found() {
        let mut products = MockRepository::<Product>::new();
        products
            .expect_get_entity_with_spec()
            .returning(|_| Ok(None));

        let service = service_with_products(products);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(CatalogError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_count_failure_fails_the_listing() {
        let mut products = MockRepository::<Product>::new();
        products
            .expect_count()
            .returning(|_| Err(CatalogError::Internal("store down".to_string())));

        let service = service_with_products(products);
        let result = service.list_products(&ProductParams::default()).await;

        assert!(result.is_err());
    }
}
