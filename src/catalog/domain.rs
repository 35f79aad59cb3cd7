pub mod model;
pub mod search;
pub mod service;

use async_trait::async_trait;
use crate::books::dto::{AuthorDto, BookDto, PublisherDto};
use crate::core::library::{LibraryResult, SearchField};

#[async_trait]
pub trait CatalogService: Sync + Send {
    // rebuilds the in-memory catalog from the stored document
    async fn load_catalog(&self) -> LibraryResult<usize>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn search(&self, query: &str, field: SearchField) -> LibraryResult<Vec<BookDto>>;
    async fn register_book(&self, record: &BookDto) -> LibraryResult<BookDto>;
    async fn describe(&self, id: &str) -> LibraryResult<String>;
    async fn list_authors(&self) -> LibraryResult<Vec<AuthorDto>>;
    async fn list_publishers(&self) -> LibraryResult<Vec<PublisherDto>>;
}
