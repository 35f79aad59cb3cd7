use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::books::repository::json_book_repository::JsonBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::store::{DocumentStore, FileDocumentStore, MemoryDocumentStore};

pub fn create_document_store(config: &Configuration, store: RepositoryStore) -> Arc<dyn DocumentStore> {
    match store {
        RepositoryStore::JsonFile => {
            Arc::new(FileDocumentStore::new(&config.database_path, config.atomic_writes))
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryDocumentStore::new())
        }
    }
}

pub fn create_book_repository(config: &Configuration, store: RepositoryStore) -> Arc<dyn BookRepository> {
    Arc::new(JsonBookRepository::new(create_document_store(config, store)))
}
