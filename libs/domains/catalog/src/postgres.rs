//! Postgres repositories translating specifications to sea-orm queries.
//!
//! The translation mirrors the in-memory evaluator step for step: filter
//! condition, then joins for the registered includes, then ordering, then
//! the paging window. Count queries stop after the filter.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, JoinType};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::entity::{brands, product_types, products};
use crate::error::CatalogResult;
use crate::models::{Brand, Product, ProductType, SortKey};
use crate::repository::Repository;
use crate::specification::{Filter, Include, Specification};

/// Escape LIKE wildcards so a search term only ever matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Flat row produced by the joined product query.
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: f64,
    picture_url: String,
    brand_id: i32,
    type_id: i32,
    brand_name: String,
    type_name: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            picture_url: row.picture_url,
            brand: Brand {
                id: row.brand_id,
                name: row.brand_name,
            },
            product_type: ProductType {
                id: row.type_id,
                name: row.type_name,
            },
        }
    }
}

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn condition(filters: &[Filter]) -> Condition {
        let mut cond = Condition::all();
        for filter in filters {
            cond = match filter {
                Filter::Id(id) => cond.add(products::Column::Id.eq(*id)),
                Filter::BrandId(id) => cond.add(products::Column::BrandId.eq(*id)),
                Filter::TypeId(id) => cond.add(products::Column::TypeId.eq(*id)),
                Filter::NameContains(term) => cond.add(
                    Expr::col((products::Entity, products::Column::Name))
                        .ilike(format!("%{}%", escape_like(term))),
                ),
            };
        }
        cond
    }

    /// Row-producing query for a specification.
    ///
    /// Requires both includes on the specification; the product spec
    /// constructors always register them, so the joined name columns are
    /// present for hydration.
    fn select(spec: &Specification<Product>) -> Select<products::Entity> {
        let mut query = products::Entity::find().filter(Self::condition(spec.filters()));

        for include in spec.includes() {
            query = match include {
                Include::Brand => query
                    .join(JoinType::InnerJoin, products::Relation::Brand.def())
                    .column_as(brands::Column::Name, "brand_name"),
                Include::ProductType => query
                    .join(JoinType::InnerJoin, products::Relation::ProductType.def())
                    .column_as(product_types::Column::Name, "type_name"),
            };
        }

        query = match spec.sort().unwrap_or_default() {
            SortKey::NameAsc => query.order_by_asc(products::Column::Name),
            SortKey::PriceAsc => query.order_by_asc(products::Column::Price),
            SortKey::PriceDesc => query.order_by_desc(products::Column::Price),
        };
        // Id tie-break keeps page windows stable under equal keys
        query = query.order_by_asc(products::Column::Id);

        if let Some(paging) = spec.paging() {
            query = query.offset(paging.skip).limit(paging.take);
        }

        query
    }
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
    async fn list(&self, spec: &Specification<Product>) -> CatalogResult<Vec<Product>> {
        let rows = Self::select(spec)
            .into_model::<ProductRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count(&self, spec: &Specification<Product>) -> CatalogResult<u64> {
        // Filter only: ordering and paging never reach the count query
        let count = products::Entity::find()
            .filter(Self::condition(spec.filters()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn get_entity_with_spec(
        &self,
        spec: &Specification<Product>,
    ) -> CatalogResult<Option<Product>> {
        let row = Self::select(spec)
            .into_model::<ProductRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        self.list(&Specification::new()
            .include(Include::Brand)
            .include(Include::ProductType))
            .await
    }
}

pub struct PgBrandRepository {
    db: DatabaseConnection,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn condition(filters: &[Filter]) -> Condition {
        let mut cond = Condition::all();
        for filter in filters {
            cond = match filter {
                Filter::Id(id) => cond.add(brands::Column::Id.eq(*id)),
                Filter::NameContains(term) => cond.add(
                    Expr::col((brands::Entity, brands::Column::Name))
                        .ilike(format!("%{}%", escape_like(term))),
                ),
                // Product-only dimensions match no brand
                Filter::BrandId(_) | Filter::TypeId(_) => cond.add(Expr::value(false)),
            };
        }
        cond
    }
}

#[async_trait]
impl Repository<Brand> for PgBrandRepository {
    async fn list(&self, spec: &Specification<Brand>) -> CatalogResult<Vec<Brand>> {
        let mut query = brands::Entity::find()
            .filter(Self::condition(spec.filters()))
            .order_by_asc(brands::Column::Name)
            .order_by_asc(brands::Column::Id);

        if let Some(paging) = spec.paging() {
            query = query.offset(paging.skip).limit(paging.take);
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Brand::from).collect())
    }

    async fn count(&self, spec: &Specification<Brand>) -> CatalogResult<u64> {
        let count = brands::Entity::find()
            .filter(Self::condition(spec.filters()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn get_entity_with_spec(
        &self,
        spec: &Specification<Brand>,
    ) -> CatalogResult<Option<Brand>> {
        let model = brands::Entity::find()
            .filter(Self::condition(spec.filters()))
            .one(&self.db)
            .await?;

        Ok(model.map(Brand::from))
    }

    async fn list_all(&self) -> CatalogResult<Vec<Brand>> {
        let models = brands::Entity::find()
            .order_by_asc(brands::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Brand::from).collect())
    }
}

pub struct PgTypeRepository {
    db: DatabaseConnection,
}

impl PgTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn condition(filters: &[Filter]) -> Condition {
        let mut cond = Condition::all();
        for filter in filters {
            cond = match filter {
                Filter::Id(id) => cond.add(product_types::Column::Id.eq(*id)),
                Filter::NameContains(term) => cond.add(
                    Expr::col((product_types::Entity, product_types::Column::Name))
                        .ilike(format!("%{}%", escape_like(term))),
                ),
                Filter::BrandId(_) | Filter::TypeId(_) => cond.add(Expr::value(false)),
            };
        }
        cond
    }
}

#[async_trait]
impl Repository<ProductType> for PgTypeRepository {
    async fn list(&self, spec: &Specification<ProductType>) -> CatalogResult<Vec<ProductType>> {
        let mut query = product_types::Entity::find()
            .filter(Self::condition(spec.filters()))
            .order_by_asc(product_types::Column::Name)
            .order_by_asc(product_types::Column::Id);

        if let Some(paging) = spec.paging() {
            query = query.offset(paging.skip).limit(paging.take);
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(ProductType::from).collect())
    }

    async fn count(&self, spec: &Specification<ProductType>) -> CatalogResult<u64> {
        let count = product_types::Entity::find()
            .filter(Self::condition(spec.filters()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn get_entity_with_spec(
        &self,
        spec: &Specification<ProductType>,
    ) -> CatalogResult<Option<ProductType>> {
        let model = product_types::Entity::find()
            .filter(Self::condition(spec.filters()))
            .one(&self.db)
            .await?;

        Ok(model.map(ProductType::from))
    }

    async fn list_all(&self) -> CatalogResult<Vec<ProductType>> {
        let models = product_types::Entity::find()
            .order_by_asc(product_types::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ProductType::from).collect())
    }
}

#[cfg(test)]
mod tests {
    // Deliberately no glob import: `PgExpr`'s blanket impl would shadow
    // `str::contains` in the assertions below.
    use super::{PgBrandRepository, PgProductRepository};
    use crate::entity::{brands, products};
    use crate::models::{Brand, Product, ProductParams, SortKey};
    use crate::specification::{Filter, Specification};
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(spec: &Specification<Product>) -> String {
        PgProductRepository::select(spec)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_page_spec_translates_filters_joins_order_and_window() {
        let params = ProductParams::new(
            Some(2),
            Some(3),
            Some("board".to_string()),
            SortKey::PriceDesc,
            Some(2),
            Some(6),
        );
        let sql = sql(&Specification::product_page(&params));

        assert!(sql.contains("\"products\".\"brand_id\" = 2"));
        assert!(sql.contains("\"products\".\"type_id\" = 3"));
        assert!(sql.contains("ILIKE '%board%'"));
        assert!(sql.contains("INNER JOIN \"product_brands\""));
        assert!(sql.contains("INNER JOIN \"product_types\""));
        assert!(sql.contains("\"products\".\"price\" DESC"));
        assert!(sql.contains("\"products\".\"id\" ASC"));
        assert!(sql.contains("LIMIT 6"));
        assert!(sql.contains("OFFSET 6"));
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let sql = sql(&Specification::product_page(&ProductParams::default()));
        assert!(sql.contains("\"products\".\"name\" ASC"));
    }

    #[test]
    fn test_by_id_spec_has_no_window() {
        let sql = sql(&Specification::product_by_id(7));
        assert!(sql.contains("\"products\".\"id\" = 7"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_count_query_ignores_paging_and_joins() {
        let params =
            ProductParams::new(Some(1), None, None, SortKey::PriceAsc, Some(3), Some(5));
        let spec = Specification::product_count(&params);

        let sql = products::Entity::find()
            .filter(PgProductRepository::condition(spec.filters()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("\"products\".\"brand_id\" = 1"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
        assert!(!sql.contains("JOIN"));
    }

    #[test]
    fn test_search_wildcards_are_escaped() {
        let params = ProductParams::new(
            None,
            None,
            Some("100%_wool".to_string()),
            SortKey::default(),
            None,
            None,
        );
        // sea-query renders the escaped term as an E-string, doubling
        // the backslashes in the literal
        let sql = sql(&Specification::product_page(&params));
        assert!(sql.contains(r"E'%100\\%\\_wool%'"));
    }

    #[test]
    fn test_product_only_filters_exclude_all_brands() {
        let spec = Specification::<Brand>::new().filter(Filter::BrandId(1));
        let sql = brands::Entity::find()
            .filter(PgBrandRepository::condition(spec.filters()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.to_uppercase().contains("FALSE"));
    }
}
