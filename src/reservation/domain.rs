use async_trait::async_trait;
use crate::core::library::LibraryResult;

pub mod service;

// ReservationService places and releases holds on single copies of a book. A refused
// request is Ok(false); errors are reserved for unknown books, bad input and storage failures.
#[async_trait]
pub trait ReservationService: Sync + Send {
    async fn reserve(&self, book_id: &str, user: &str) -> LibraryResult<bool>;
    async fn cancel_reservation(&self, book_id: &str, user: &str) -> LibraryResult<bool>;
}
