use std::sync::Arc;
use crate::books::factory::create_book_repository;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::SharedCatalog;
use crate::catalog::factory::{create_catalog_service, create_shared_catalog};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::gateway::events::EventPublisher;
use crate::gateway::factory::create_publisher;
use crate::reservation::domain::ReservationService;
use crate::reservation::factory::create_reservation_service;

// AppState wires both services to one in-memory catalog and one persistence gateway.
pub struct AppState {
    pub config: Configuration,
    pub store: RepositoryStore,
    pub catalog: SharedCatalog,
    pub catalog_service: Arc<dyn CatalogService>,
    pub reservation_service: Arc<dyn ReservationService>,
}

impl AppState {
    pub async fn new(config: Configuration, store: RepositoryStore) -> LibraryResult<AppState> {
        let book_repository = create_book_repository(&config, store);
        let publisher = create_publisher(store.gateway_publisher());
        AppState::with_parts(config, store, book_repository, publisher).await
    }

    pub async fn with_parts(config: Configuration, store: RepositoryStore,
                            book_repository: Arc<dyn BookRepository>,
                            publisher: Arc<dyn EventPublisher>) -> LibraryResult<AppState> {
        let catalog = create_shared_catalog(book_repository.as_ref()).await?;
        let catalog_service = create_catalog_service(
            &config, catalog.clone(), book_repository.clone(), publisher.clone());
        let reservation_service = create_reservation_service(
            &config, catalog.clone(), book_repository, publisher);
        Ok(AppState {
            config,
            store,
            catalog,
            catalog_service,
            reservation_service,
        })
    }
}

// Process exit status reported by the command-line front end.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExitStatus {
    Success,
    Refused,
    InvalidRequest,
    StorageFailure,
}

impl ExitStatus {
    pub fn code(&self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Refused => 1,
            ExitStatus::InvalidRequest => 2,
            ExitStatus::StorageFailure => 3,
        }
    }
}

pub type ControllerError = (ExitStatus, String);

impl From<CommandError> for ControllerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateKey { .. } => {
                (ExitStatus::InvalidRequest, err.to_string())
            }
            CommandError::NotFound { .. } => {
                (ExitStatus::InvalidRequest, err.to_string())
            }
            CommandError::Validation { .. } => {
                (ExitStatus::InvalidRequest, err.to_string())
            }
            CommandError::Storage { .. } => {
                (ExitStatus::StorageFailure, err.to_string())
            }
            CommandError::Serialization { .. } => {
                (ExitStatus::StorageFailure, err.to_string())
            }
            CommandError::Runtime { .. } => {
                (ExitStatus::StorageFailure, err.to_string())
            }
        }
    }
}
