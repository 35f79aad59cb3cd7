use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::{AuthorDto, BookDto, PublisherDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::{Catalog, SharedCatalog};
use crate::catalog::domain::search::search;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, SearchField};
use crate::gateway::events::EventPublisher;

pub struct CatalogServiceImpl {
    branch_id: String,
    catalog: SharedCatalog,
    book_repository: Arc<dyn BookRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, catalog: SharedCatalog, book_repository: Arc<dyn BookRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            catalog,
            book_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn load_catalog(&self) -> LibraryResult<usize> {
        let records = self.book_repository.load().await?;
        let loaded = Catalog::from_records(&records)?;
        let mut catalog = self.catalog.write().await;
        *catalog = loaded;
        tracing::info!(branch = self.branch_id.as_str(), location = self.book_repository.location().as_str(),
            books = catalog.len(), authors = catalog.authors().len(), publishers = catalog.publishers().len(),
            "catalog loaded");
        Ok(catalog.len())
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.books().iter().map(|b| catalog.to_dto(b)).collect())
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        let catalog = self.catalog.read().await;
        catalog.find(id).and_then(|key| catalog.book(key)).map(|b| catalog.to_dto(b))
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn search(&self, query: &str, field: SearchField) -> LibraryResult<Vec<BookDto>> {
        let catalog = self.catalog.read().await;
        let found = search(&catalog, catalog.books(), query, field);
        tracing::debug!(query, field = field.to_string().as_str(), matches = found.len(), "catalog search");
        Ok(found.into_iter().map(|b| catalog.to_dto(b)).collect())
    }

    async fn register_book(&self, record: &BookDto) -> LibraryResult<BookDto> {
        record.validate_for_registration()?;
        let mut catalog = self.catalog.write().await;
        if catalog.find(record.id.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(
                format!("book id {} already registered", record.id).as_str()));
        }
        // stored first, so a failed write leaves the in-memory catalog untouched
        let stored = self.book_repository.register(record).await?;
        let key = catalog.insert(&stored)?;
        let book = catalog.book(key).map(|b| catalog.to_dto(b))
            .ok_or_else(|| LibraryError::runtime(format!("registered book {} vanished", stored.id).as_str(), None))?;
        drop(catalog);
        tracing::info!(book_id = book.id.as_str(), publisher = book.publisher.as_str(), "book registered");

        let metadata = HashMap::from([("branch_id".to_string(), self.branch_id.to_string())]);
        match DomainEvent::added("book_added", "books", book.id.as_str(), &metadata, &book) {
            Ok(event) => {
                if let Err(err) = self.events_publisher.publish(&event).await {
                    tracing::warn!(book_id = book.id.as_str(), error = %err, "failed to publish book_added");
                }
            }
            Err(err) => tracing::warn!(book_id = book.id.as_str(), error = %err, "failed to build book_added"),
        }
        Ok(book)
    }

    async fn describe(&self, id: &str) -> LibraryResult<String> {
        self.find_book_by_id(id).await.map(|b| b.describe())
    }

    async fn list_authors(&self) -> LibraryResult<Vec<AuthorDto>> {
        Ok(self.catalog.read().await.author_summaries())
    }

    async fn list_publishers(&self) -> LibraryResult<Vec<PublisherDto>> {
        Ok(self.catalog.read().await.publisher_summaries())
    }
}
