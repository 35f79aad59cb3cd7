use std::sync::Arc;
use tokio::sync::RwLock;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::{Catalog, SharedCatalog};
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// Reads the stored document and materializes books, authors and publishers from it.
pub async fn load_catalog(book_repository: &dyn BookRepository) -> LibraryResult<Catalog> {
    let records = book_repository.load().await?;
    Catalog::from_records(&records)
}

pub async fn create_shared_catalog(book_repository: &dyn BookRepository) -> LibraryResult<SharedCatalog> {
    let catalog = load_catalog(book_repository).await?;
    Ok(Arc::new(RwLock::new(catalog)))
}

pub fn create_catalog_service(config: &Configuration, catalog: SharedCatalog,
                              book_repository: Arc<dyn BookRepository>,
                              publisher: Arc<dyn EventPublisher>) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(config, catalog, book_repository, publisher))
}
