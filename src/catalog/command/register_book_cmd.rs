use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RegisterBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RegisterBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// The record is kept as raw JSON so missing or mistyped fields are reported by name.
#[derive(Debug, Deserialize)]
pub struct RegisterBookCommandRequest {
    pub record: Value,
}

impl RegisterBookCommandRequest {
    pub fn new(record: Value) -> Self {
        Self {
            record,
        }
    }

    pub fn from_book(book: &BookDto) -> Result<Self, CommandError> {
        let record = serde_json::to_value(book)
            .map_err(|err| CommandError::Serialization { message: err.to_string() })?;
        Ok(Self::new(record))
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<RegisterBookCommandRequest, RegisterBookCommandResponse> for RegisterBookCommand {
    async fn execute(&self, req: RegisterBookCommandRequest) -> Result<RegisterBookCommandResponse, CommandError> {
        let record = BookDto::from_value(&req.record)?;
        self.catalog_service.register_book(&record)
            .await.map_err(CommandError::from).map(|book| RegisterBookCommandResponse { book })
    }
}
