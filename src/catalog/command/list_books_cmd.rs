use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::{AuthorDto, BookDto, PublisherDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

// What a listing covers: every book, or the author and publisher registries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Listing {
    Books,
    Authors,
    Publishers,
}

pub struct ListCatalogCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListCatalogCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct ListCatalogCommandRequest {
    pub listing: Listing,
}

impl ListCatalogCommandRequest {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ListCatalogCommandResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<BookDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<PublisherDto>,
}

#[async_trait]
impl Command<ListCatalogCommandRequest, ListCatalogCommandResponse> for ListCatalogCommand {
    async fn execute(&self, req: ListCatalogCommandRequest) -> Result<ListCatalogCommandResponse, CommandError> {
        let mut res = ListCatalogCommandResponse::default();
        match req.listing {
            Listing::Books => res.books = self.catalog_service.list_books().await?,
            Listing::Authors => res.authors = self.catalog_service.list_authors().await?,
            Listing::Publishers => res.publishers = self.catalog_service.list_publishers().await?,
        }
        Ok(res)
    }
}
