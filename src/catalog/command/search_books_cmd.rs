use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::SearchField;

pub struct SearchBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchBooksCommandRequest {
    pub query: String,
    #[serde(default)]
    pub field: SearchField,
}

impl SearchBooksCommandRequest {
    pub fn new(query: &str, field: &str) -> Self {
        Self {
            query: query.to_string(),
            field: SearchField::from(field),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.catalog_service.search(req.query.as_str(), req.field)
            .await.map_err(CommandError::from).map(|books| SearchBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::core::command::Command;
    use crate::utils::fixtures::{memory_state, DUNE_DOCUMENT};

    #[tokio::test]
    async fn test_should_search_by_field() {
        let fixture = memory_state(DUNE_DOCUMENT).await;
        let cmd = SearchBooksCommand::new(fixture.state.catalog_service.clone());
        let res = cmd.execute(SearchBooksCommandRequest::new("HERBERT", "author")).await.expect("should search");
        assert_eq!(1, res.books.len());
        let res = cmd.execute(SearchBooksCommandRequest::new("herbert", "title")).await.expect("should search");
        assert!(res.books.is_empty());
    }

    #[tokio::test]
    async fn test_should_fall_back_to_general_search() {
        let fixture = memory_state(DUNE_DOCUMENT).await;
        let cmd = SearchBooksCommand::new(fixture.state.catalog_service.clone());
        let res = cmd.execute(SearchBooksCommandRequest::new("ace", "publisher")).await.expect("should search");
        assert_eq!("b1", res.books[0].id.as_str());
    }
}
