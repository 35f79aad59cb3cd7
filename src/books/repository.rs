pub mod json_book_repository;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;


// BookRepository is the persistence gateway for the catalog document.
#[async_trait]
pub trait BookRepository: Sync + Send {
    // reads every stored record, creating an empty document when none exists
    async fn load(&self) -> LibraryResult<Vec<BookDto>>;

    // appends a new record and writes the document back
    async fn register(&self, record: &BookDto) -> LibraryResult<BookDto>;

    // rewrites available_copies and reservations of the stored record with the same id
    async fn update_after_mutation(&self, book: &BookDto) -> LibraryResult<()>;

    fn location(&self) -> String;
}
