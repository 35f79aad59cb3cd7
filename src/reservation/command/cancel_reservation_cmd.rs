use std::sync::Arc;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::reservation::command::reserve_book_cmd::{ReservationCommandRequest, ReservationCommandResponse};
use crate::reservation::domain::ReservationService;

pub struct CancelReservationCommand {
    reservation_service: Arc<dyn ReservationService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl CancelReservationCommand {
    pub fn new(reservation_service: Arc<dyn ReservationService>, catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            reservation_service,
            catalog_service,
        }
    }
}

#[async_trait]
impl Command<ReservationCommandRequest, ReservationCommandResponse> for CancelReservationCommand {
    async fn execute(&self, req: ReservationCommandRequest) -> Result<ReservationCommandResponse, CommandError> {
        let accepted = self.reservation_service.cancel_reservation(req.book_id.as_str(), req.user.as_str()).await?;
        let book = self.catalog_service.find_book_by_id(req.book_id.as_str()).await?;
        Ok(ReservationCommandResponse { accepted, book })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::reservation::command::cancel_reservation_cmd::CancelReservationCommand;
    use crate::reservation::command::reserve_book_cmd::{ReservationCommandRequest, ReserveBookCommand};
    use crate::utils::fixtures::{memory_state, DUNE_DOCUMENT};

    #[tokio::test]
    async fn test_should_cancel_reservation() {
        let fixture = memory_state(DUNE_DOCUMENT).await;
        let reserve = ReserveBookCommand::new(fixture.state.reservation_service.clone(),
                                              fixture.state.catalog_service.clone());
        let cancel = CancelReservationCommand::new(fixture.state.reservation_service.clone(),
                                                   fixture.state.catalog_service.clone());
        let _ = reserve.execute(ReservationCommandRequest::new("b1", "bob")).await.expect("should reserve");
        let res = cancel.execute(ReservationCommandRequest::new("b1", "bob")).await.expect("should cancel");
        assert!(res.accepted);
        assert_eq!(2, res.book.available_copies);
        assert!(res.book.reservations.is_empty());

        let res = cancel.execute(ReservationCommandRequest::new("b1", "bob")).await.expect("should refuse");
        assert!(!res.accepted);
    }

    #[tokio::test]
    async fn test_should_fail_for_unknown_book() {
        let fixture = memory_state(DUNE_DOCUMENT).await;
        let cancel = CancelReservationCommand::new(fixture.state.reservation_service.clone(),
                                                   fixture.state.catalog_service.clone());
        let res = cancel.execute(ReservationCommandRequest::new("b9", "bob")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
