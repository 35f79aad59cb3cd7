use std::sync::Arc;
use crate::books::repository::json_book_repository::JsonBookRepository;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::utils::store::MemoryDocumentStore;

pub(crate) const DUNE_DOCUMENT: &str = r#"{"books": [{"id": "b1", "isbn": "111", "title": "Dune", "year": 1965,
    "publisher": "Ace", "authors": ["Frank Herbert"], "total_copies": 2, "available_copies": 2}]}"#;

pub(crate) struct Fixture {
    pub state: AppState,
    pub store: MemoryDocumentStore,
    pub publisher: MemoryPublisher,
}

pub(crate) async fn memory_state(contents: &str) -> Fixture {
    let store = MemoryDocumentStore::with_contents(contents);
    let publisher = MemoryPublisher::new();
    let repo = Arc::new(JsonBookRepository::new(Arc::new(store.clone())));
    let state = AppState::with_parts(Configuration::new("test"), RepositoryStore::Memory,
                                     repo, Arc::new(publisher.clone()))
        .await.expect("should build state");
    Fixture { state, store, publisher }
}
