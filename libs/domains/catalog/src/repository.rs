use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogResult;
use crate::evaluator::SpecificationEvaluator;
use crate::specification::{CatalogEntity, Specification};

/// Read-only repository over a catalog entity, driven by specifications.
///
/// Implementations never treat an empty result as a failure: `list`
/// returns an empty vec and `get_entity_with_spec` returns `None`. Errors
/// are reserved for store faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<T: CatalogEntity + 'static>: Send + Sync {
    /// Entities matching the specification, ordered and paged by it.
    async fn list(&self, spec: &Specification<T>) -> CatalogResult<Vec<T>>;

    /// Size of the set matching the specification's filters. Ordering and
    /// paging on the specification are ignored.
    async fn count(&self, spec: &Specification<T>) -> CatalogResult<u64>;

    /// The single entity matching the specification, if any.
    async fn get_entity_with_spec(&self, spec: &Specification<T>) -> CatalogResult<Option<T>>;

    /// Every entity, ordered by id. For reference data.
    async fn list_all(&self) -> CatalogResult<Vec<T>>;
}

/// In-memory implementation of [`Repository`] (for development/testing).
///
/// Entities live in a `BTreeMap` keyed by id, so `list_all` comes out in
/// id order for free.
#[derive(Debug, Default)]
pub struct InMemoryRepository<T> {
    items: Arc<RwLock<BTreeMap<i32, T>>>,
}

impl<T: CatalogEntity + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let map: BTreeMap<i32, T> = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, item: T) {
        self.items.write().await.insert(item.id(), item);
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

#[async_trait]
impl<T: CatalogEntity + Clone + 'static> Repository<T> for InMemoryRepository<T> {
    async fn list(&self, spec: &Specification<T>) -> CatalogResult<Vec<T>> {
        let items = self.items.read().await;
        let snapshot: Vec<T> = items.values().cloned().collect();
        Ok(SpecificationEvaluator::apply(&snapshot, spec))
    }

    async fn count(&self, spec: &Specification<T>) -> CatalogResult<u64> {
        let items = self.items.read().await;
        let snapshot: Vec<T> = items.values().cloned().collect();
        Ok(SpecificationEvaluator::matching_count(&snapshot, spec))
    }

    async fn get_entity_with_spec(&self, spec: &Specification<T>) -> CatalogResult<Option<T>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|item| spec.is_satisfied_by(item))
            .cloned())
    }

    async fn list_all(&self) -> CatalogResult<Vec<T>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }
}
