//! Pure, store-free application of a specification to an entity slice.
//!
//! The Postgres repositories perform the same transformation against a
//! `Select` in the same fixed order (filter, order, skip/take); keeping the
//! two paths in lockstep is what makes the in-memory repository a faithful
//! stand-in for the real store in tests.

use crate::models::SortKey;
use crate::specification::{CatalogEntity, Specification};

pub struct SpecificationEvaluator;

impl SpecificationEvaluator {
    /// Apply a specification to a snapshot of entities.
    ///
    /// Steps run in a fixed order: filter, then sort (defaulting to
    /// name-ascending when the specification does not order), then the
    /// paging window iff paging is enabled. Includes never change the row
    /// count; hydration is the repository's concern.
    pub fn apply<T: CatalogEntity + Clone>(items: &[T], spec: &Specification<T>) -> Vec<T> {
        let mut result: Vec<T> = items
            .iter()
            .filter(|item| spec.is_satisfied_by(item))
            .cloned()
            .collect();

        let key = spec.sort().unwrap_or(SortKey::NameAsc);
        result.sort_by(|a, b| a.cmp_by(b, key));

        if let Some(paging) = spec.paging() {
            result = result
                .into_iter()
                .skip(paging.skip as usize)
                .take(paging.take as usize)
                .collect();
        }

        result
    }

    /// Size of the filtered set. Ordering and paging on the specification
    /// are ignored by contract.
    pub fn matching_count<T: CatalogEntity>(items: &[T], spec: &Specification<T>) -> u64 {
        items.iter().filter(|item| spec.is_satisfied_by(item)).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;
    use crate::models::Product;
    use crate::specification::Filter;

    fn inventory() -> Vec<Product> {
        vec![
            product(1, "Speed Board", 249.99, 1, 1),
            product(2, "Park Board", 199.00, 2, 1),
            product(3, "Alpine Boots", 179.50, 3, 2),
            product(4, "Wool Beanie", 19.99, 1, 4),
            product(5, "Grip Gloves", 25.00, 2, 3),
        ]
    }

    #[test]
    fn test_default_order_is_name_ascending() {
        let items = inventory();
        let spec = Specification::new();
        let result = SpecificationEvaluator::apply(&items, &spec);

        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Alpine Boots",
                "Grip Gloves",
                "Park Board",
                "Speed Board",
                "Wool Beanie"
            ]
        );
    }

    #[test]
    fn test_pages_are_disjoint_and_ordered() {
        let items = inventory();

        let page1 = SpecificationEvaluator::apply(&items, &Specification::new().paged(1, 2));
        let page2 = SpecificationEvaluator::apply(&items, &Specification::new().paged(2, 2));
        let page3 = SpecificationEvaluator::apply(&items, &Specification::new().paged(3, 2));

        assert_eq!(page1.len(), 2);
        assert_eq!(page2.len(), 2);
        assert_eq!(page3.len(), 1);

        let mut all: Vec<i32> = page1
            .iter()
            .chain(page2.iter())
            .chain(page3.iter())
            .map(|p| p.id)
            .collect();
        let total = all.len();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let items = inventory();
        let spec = Specification::new().paged(9, 2);
        assert!(SpecificationEvaluator::apply(&items, &spec).is_empty());
    }

    #[test]
    fn test_count_ignores_paging() {
        let items = inventory();
        let spec = Specification::new()
            .filter(Filter::BrandId(2))
            .paged(1, 1);

        assert_eq!(SpecificationEvaluator::matching_count(&items, &spec), 2);
        assert_eq!(SpecificationEvaluator::apply(&items, &spec).len(), 1);
    }

    #[test]
    fn test_filter_runs_before_paging() {
        let items = inventory();
        // Brand 1 has two products; page 1 of size 1 must pick the first
        // of the filtered set, not of the whole inventory.
        let spec = Specification::new()
            .filter(Filter::BrandId(1))
            .paged(1, 1);
        let result = SpecificationEvaluator::apply(&items, &spec);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Speed Board");
    }

    #[test]
    fn test_price_sort_orders_strictly() {
        let items = inventory();
        let spec = Specification::new().order_by(crate::models::SortKey::PriceAsc);
        let result = SpecificationEvaluator::apply(&items, &spec);

        let prices: Vec<f64> = result.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![19.99, 25.00, 179.50, 199.00, 249.99]);
    }
}
