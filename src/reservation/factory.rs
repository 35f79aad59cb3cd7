use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::catalog::domain::model::SharedCatalog;
use crate::core::domain::Configuration;
use crate::gateway::events::EventPublisher;
use crate::reservation::domain::ReservationService;
use crate::reservation::domain::service::ReservationServiceImpl;

pub fn create_reservation_service(config: &Configuration, catalog: SharedCatalog,
                                  book_repository: Arc<dyn BookRepository>,
                                  publisher: Arc<dyn EventPublisher>) -> Arc<dyn ReservationService> {
    Arc::new(ReservationServiceImpl::new(config, catalog, book_repository, publisher))
}
