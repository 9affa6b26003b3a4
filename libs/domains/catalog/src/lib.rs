//! Catalog Domain
//!
//! Read-only catalog of products with brand/type classifications, queried
//! through specifications.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐
//! │   Handlers    │  ← HTTP endpoints, DTO mapping
//! └───────┬───────┘
//!         │
//! ┌───────▼───────┐
//! │    Service    │  ← Combines count + page queries
//! └───────┬───────┘
//!         │
//! ┌───────▼───────┐
//! │  Repository   │  ← Data access (trait + in-memory + Postgres)
//! └───────┬───────┘
//!         │
//! ┌───────▼───────┐
//! │ Specification │  ← What to fetch: filters, includes, order, page
//! └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::{
//!     handlers::{self, CatalogState},
//!     repository::InMemoryRepository,
//!     service::CatalogService,
//! };
//!
//! let service = CatalogService::new(
//!     Arc::new(InMemoryRepository::new()),
//!     Arc::new(InMemoryRepository::new()),
//!     Arc::new(InMemoryRepository::new()),
//! );
//! let router = handlers::router(CatalogState::new(service, ""));
//! ```

pub mod entity;
pub mod error;
pub mod evaluator;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod specification;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use evaluator::SpecificationEvaluator;
pub use handlers::{ApiDoc, CatalogState};
pub use models::{
    Brand, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination, Product, ProductParams, ProductResponse,
    ProductType, SortKey,
};
pub use postgres::{PgBrandRepository, PgProductRepository, PgTypeRepository};
pub use repository::{InMemoryRepository, Repository};
pub use service::CatalogService;
pub use specification::{CatalogEntity, Filter, Include, Paging, Specification};
