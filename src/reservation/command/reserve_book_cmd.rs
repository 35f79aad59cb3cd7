use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::reservation::domain::ReservationService;

pub struct ReserveBookCommand {
    reservation_service: Arc<dyn ReservationService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl ReserveBookCommand {
    pub fn new(reservation_service: Arc<dyn ReservationService>, catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            reservation_service,
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReservationCommandRequest {
    pub book_id: String,
    pub user: String,
}

impl ReservationCommandRequest {
    pub fn new(book_id: &str, user: &str) -> Self {
        Self {
            book_id: book_id.trim().to_string(),
            user: user.to_string(),
        }
    }
}

// accepted is false when the request was refused and nothing changed
#[derive(Debug, Serialize)]
pub struct ReservationCommandResponse {
    pub accepted: bool,
    pub book: BookDto,
}

#[async_trait]
impl Command<ReservationCommandRequest, ReservationCommandResponse> for ReserveBookCommand {
    async fn execute(&self, req: ReservationCommandRequest) -> Result<ReservationCommandResponse, CommandError> {
        let accepted = self.reservation_service.reserve(req.book_id.as_str(), req.user.as_str()).await?;
        let book = self.catalog_service.find_book_by_id(req.book_id.as_str()).await?;
        Ok(ReservationCommandResponse { accepted, book })
    }
}
