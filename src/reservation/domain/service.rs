use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::books::domain::model::Book;
use crate::books::repository::BookRepository;
use crate::catalog::domain::model::SharedCatalog;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::reservation::domain::ReservationService;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Reserve,
    Cancel,
}

impl Action {
    fn event_name(&self) -> &'static str {
        match self {
            Action::Reserve => "book_reserved",
            Action::Cancel => "book_reservation_cancelled",
        }
    }

    fn apply(&self, book: &mut Book, user: &str) -> bool {
        match self {
            Action::Reserve => book.reserve(user),
            Action::Cancel => book.cancel_reservation(user),
        }
    }
}

pub struct ReservationServiceImpl {
    branch_id: String,
    catalog: SharedCatalog,
    book_repository: Arc<dyn BookRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl ReservationServiceImpl {
    pub fn new(config: &Configuration, catalog: SharedCatalog, book_repository: Arc<dyn BookRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            catalog,
            book_repository,
            events_publisher,
        }
    }

    // The change is applied to a copy of the book, written to the document, and only then
    // swapped into the catalog. The write lock is held throughout.
    async fn mutate(&self, action: Action, book_id: &str, user: &str) -> LibraryResult<bool> {
        // surrounding whitespace is not part of the reserver's name
        let user = user.trim();
        if user.is_empty() {
            return Err(LibraryError::validation("reserver must not be blank", Some("user".to_string())));
        }
        let mut catalog = self.catalog.write().await;
        let key = catalog.find(book_id)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", book_id).as_str()))?;
        let mut staged = catalog.book(key).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", book_id).as_str()))?;
        if !action.apply(&mut staged, user) {
            tracing::debug!(book_id, user, action = ?action, available = staged.available_copies(),
                "reservation request refused");
            return Ok(false);
        }
        let record = catalog.to_dto(&staged);
        if let Err(err) = self.book_repository.update_after_mutation(&record).await {
            tracing::error!(book_id, user, action = ?action, error = %err, "failed to persist reservation change");
            return Err(err);
        }
        catalog.commit(key, staged)?;
        drop(catalog);
        tracing::info!(book_id, user, action = ?action, available = record.available_copies, "reservation updated");

        let metadata = HashMap::from([
            ("branch_id".to_string(), self.branch_id.to_string()),
            ("user".to_string(), user.to_string()),
        ]);
        match DomainEvent::updated(action.event_name(), "books", book_id, &metadata, &record) {
            Ok(event) => {
                if let Err(err) = self.events_publisher.publish(&event).await {
                    tracing::warn!(book_id, error = %err, "failed to publish {}", action.event_name());
                }
            }
            Err(err) => tracing::warn!(book_id, error = %err, "failed to build {}", action.event_name()),
        }
        Ok(true)
    }
}

#[async_trait]
impl ReservationService for ReservationServiceImpl {
    async fn reserve(&self, book_id: &str, user: &str) -> LibraryResult<bool> {
        self.mutate(Action::Reserve, book_id, user).await
    }

    async fn cancel_reservation(&self, book_id: &str, user: &str) -> LibraryResult<bool> {
        self.mutate(Action::Cancel, book_id, user).await
    }
}
