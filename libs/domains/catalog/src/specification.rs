//! Query specifications for catalog reads.
//!
//! A [`Specification`] is an immutable description of a query: which rows
//! to keep, which related data to hydrate, how to order, and which page to
//! cut. It carries plain data rather than closures so the same value can
//! drive both the in-memory evaluator and the SQL translation.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::models::{Brand, Product, ProductParams, ProductType, SortKey};

/// One filter condition. Conditions on a specification are conjoined.
///
/// This is a closed set on purpose: every variant has a direct SQL
/// translation, so no runtime-composed predicates can reach the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Primary key equality
    Id(i32),
    /// Brand foreign key equality
    BrandId(i32),
    /// Type foreign key equality
    TypeId(i32),
    /// Case-insensitive substring match on the name
    NameContains(String),
}

/// Related data to hydrate alongside the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Brand,
    ProductType,
}

/// An absolute window into the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub skip: u64,
    pub take: u64,
}

/// An entity the specification machinery can evaluate in memory.
///
/// `matches` decides a single [`Filter`] condition; a condition that does
/// not apply to the entity (e.g. a brand filter on a brand list) matches
/// nothing. `cmp_by` must be a total order; implementations break ties on
/// the id so pagination windows are stable.
pub trait CatalogEntity: Send + Sync {
    fn id(&self) -> i32;
    fn matches(&self, filter: &Filter) -> bool;
    fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering;
}

/// An immutable query description, built once and then only read.
///
/// Construction goes through the chained refine steps ([`filter`],
/// [`include`], [`order_by`], [`paged`]), each consuming the value, so a
/// specification observed by a repository can no longer change.
///
/// [`filter`]: Specification::filter
/// [`include`]: Specification::include
/// [`order_by`]: Specification::order_by
/// [`paged`]: Specification::paged
#[derive(Debug, Clone)]
pub struct Specification<T> {
    filters: Vec<Filter>,
    includes: Vec<Include>,
    sort: Option<SortKey>,
    paging: Option<Paging>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Default for Specification<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Specification<T> {
    /// An unrestricted specification: matches everything, no ordering,
    /// no paging.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            includes: Vec::new(),
            sort: None,
            paging: None,
            _entity: PhantomData,
        }
    }

    /// Add a filter condition. Conditions are conjoined.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Register related data for hydration. Duplicates are ignored.
    pub fn include(mut self, include: Include) -> Self {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
        self
    }

    /// Set the sort order. The last call wins.
    pub fn order_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Enable paging for the given 1-based page.
    ///
    /// `page_index` and `page_size` are taken as already corrected;
    /// `skip = page_size * (page_index - 1)`, saturating so an extreme
    /// page index lands past the end of the set instead of wrapping.
    pub fn paged(mut self, page_index: u64, page_size: u64) -> Self {
        let index = page_index.max(1);
        self.paging = Some(Paging {
            skip: page_size.saturating_mul(index - 1),
            take: page_size,
        });
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn paging(&self) -> Option<Paging> {
        self.paging
    }
}

impl<T: CatalogEntity> Specification<T> {
    /// Whether an entity satisfies every filter condition.
    pub fn is_satisfied_by(&self, entity: &T) -> bool {
        self.filters.iter().all(|f| entity.matches(f))
    }
}

impl Specification<Product> {
    /// Filters shared by the page and count specifications.
    fn product_filters(params: &ProductParams) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(brand_id) = params.brand_id {
            filters.push(Filter::BrandId(brand_id));
        }
        if let Some(type_id) = params.type_id {
            filters.push(Filter::TypeId(type_id));
        }
        if let Some(search) = params.search.as_deref() {
            if !search.is_empty() {
                filters.push(Filter::NameContains(search.to_string()));
            }
        }
        filters
    }

    /// Specification for one page of products: filters from the params,
    /// ordering from the sort key, both relations hydrated, paging with
    /// the corrected page window.
    pub fn product_page(params: &ProductParams) -> Self {
        let mut spec = Self::new();
        for filter in Self::product_filters(params) {
            spec = spec.filter(filter);
        }
        spec.include(Include::Brand)
            .include(Include::ProductType)
            .order_by(params.sort)
            .paged(params.page_index(), params.page_size())
    }

    /// Specification counting the whole filtered set: same filters as
    /// [`product_page`], no ordering, no paging.
    ///
    /// [`product_page`]: Specification::product_page
    pub fn product_count(params: &ProductParams) -> Self {
        let mut spec = Self::new();
        for filter in Self::product_filters(params) {
            spec = spec.filter(filter);
        }
        spec
    }

    /// Specification for a single product by id, with both relations.
    pub fn product_by_id(id: i32) -> Self {
        Self::new()
            .filter(Filter::Id(id))
            .include(Include::Brand)
            .include(Include::ProductType)
    }
}

impl CatalogEntity for Product {
    fn id(&self) -> i32 {
        self.id
    }

    fn matches(&self, filter: &Filter) -> bool {
        match filter {
            Filter::Id(id) => self.id == *id,
            Filter::BrandId(brand_id) => self.brand.id == *brand_id,
            Filter::TypeId(type_id) => self.product_type.id == *type_id,
            Filter::NameContains(term) => {
                self.name.to_lowercase().contains(&term.to_lowercase())
            }
        }
    }

    fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering {
        let primary = match key {
            SortKey::NameAsc => self.name.cmp(&other.name),
            SortKey::PriceAsc => self.price.total_cmp(&other.price),
            SortKey::PriceDesc => other.price.total_cmp(&self.price),
        };
        primary.then_with(|| self.id.cmp(&other.id))
    }
}

impl CatalogEntity for Brand {
    fn id(&self) -> i32 {
        self.id
    }

    fn matches(&self, filter: &Filter) -> bool {
        match filter {
            Filter::Id(id) => self.id == *id,
            Filter::NameContains(term) => {
                self.name.to_lowercase().contains(&term.to_lowercase())
            }
            // Product-only dimensions match no brand
            Filter::BrandId(_) | Filter::TypeId(_) => false,
        }
    }

    fn cmp_by(&self, other: &Self, _key: SortKey) -> Ordering {
        self.name.cmp(&other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl CatalogEntity for ProductType {
    fn id(&self) -> i32 {
        self.id
    }

    fn matches(&self, filter: &Filter) -> bool {
        match filter {
            Filter::Id(id) => self.id == *id,
            Filter::NameContains(term) => {
                self.name.to_lowercase().contains(&term.to_lowercase())
            }
            Filter::BrandId(_) | Filter::TypeId(_) => false,
        }
    }

    fn cmp_by(&self, other: &Self, _key: SortKey) -> Ordering {
        self.name.cmp(&other.name).then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;
    use crate::models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

    #[test]
    fn test_product_page_spec_from_full_params() {
        let params = ProductParams::new(
            Some(2),
            Some(3),
            Some("board".to_string()),
            SortKey::PriceDesc,
            Some(2),
            Some(10),
        );
        let spec = Specification::product_page(&params);

        assert_eq!(
            spec.filters(),
            &[
                Filter::BrandId(2),
                Filter::TypeId(3),
                Filter::NameContains("board".to_string()),
            ]
        );
        assert_eq!(spec.includes(), &[Include::Brand, Include::ProductType]);
        assert_eq!(spec.sort(), Some(SortKey::PriceDesc));
        assert_eq!(spec.paging(), Some(Paging { skip: 10, take: 10 }));
    }

    #[test]
    fn test_count_spec_shares_filters_but_never_pages() {
        let params = ProductParams::new(
            Some(1),
            None,
            None,
            SortKey::default(),
            Some(4),
            Some(10),
        );
        let page = Specification::product_page(&params);
        let count = Specification::product_count(&params);

        assert_eq!(page.filters(), count.filters());
        assert!(count.paging().is_none());
        assert!(count.sort().is_none());
    }

    #[test]
    fn test_absent_params_add_no_filters() {
        let params = ProductParams::default();
        let spec = Specification::product_page(&params);

        assert!(spec.filters().is_empty());
        assert_eq!(
            spec.paging(),
            Some(Paging {
                skip: 0,
                take: DEFAULT_PAGE_SIZE
            })
        );
    }

    #[test]
    fn test_extreme_page_index_saturates_the_window() {
        let params =
            ProductParams::new(None, None, None, SortKey::default(), Some(i64::MAX), Some(50));
        let spec = Specification::product_page(&params);

        let paging = spec.paging().unwrap();
        assert_eq!(paging.skip, u64::MAX);
        assert_eq!(paging.take, 50);
    }

    #[test]
    fn test_oversized_page_size_flows_in_capped() {
        let params =
            ProductParams::new(None, None, None, SortKey::default(), Some(1), Some(1000));
        let spec = Specification::product_page(&params);
        assert_eq!(spec.paging().unwrap().take, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_conditions_are_conjoined() {
        let spec = Specification::<Product>::new()
            .filter(Filter::BrandId(1))
            .filter(Filter::TypeId(2));

        assert!(spec.is_satisfied_by(&product(1, "a", 1.0, 1, 2)));
        assert!(!spec.is_satisfied_by(&product(2, "b", 1.0, 1, 3)));
        assert!(!spec.is_satisfied_by(&product(3, "c", 1.0, 2, 2)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let spec = Specification::<Product>::new()
            .filter(Filter::NameContains("BOARD".to_string()));

        assert!(spec.is_satisfied_by(&product(1, "Speed Board", 1.0, 1, 1)));
        assert!(!spec.is_satisfied_by(&product(2, "Wool Beanie", 1.0, 1, 1)));
    }

    #[test]
    fn test_product_only_filters_match_no_reference_rows() {
        let brand = Brand {
            id: 1,
            name: "Northcrest".to_string(),
        };
        assert!(!brand.matches(&Filter::BrandId(1)));
        assert!(!brand.matches(&Filter::TypeId(1)));
        assert!(brand.matches(&Filter::Id(1)));
    }

    #[test]
    fn test_price_ordering_breaks_ties_on_id() {
        let a = product(1, "a", 10.0, 1, 1);
        let b = product(2, "b", 10.0, 1, 1);
        assert_eq!(a.cmp_by(&b, SortKey::PriceAsc), Ordering::Less);
        assert_eq!(b.cmp_by(&a, SortKey::PriceDesc), Ordering::Greater);
    }

    #[test]
    fn test_duplicate_includes_collapse() {
        let spec = Specification::<Product>::new()
            .include(Include::Brand)
            .include(Include::Brand);
        assert_eq!(spec.includes(), &[Include::Brand]);
    }
}
