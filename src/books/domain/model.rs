use serde::{Deserialize, Serialize};
use crate::books::domain::BookHolder;
use crate::core::domain::Identifiable;

// Position of a book in the catalog arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookKey(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublisherId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    books: Vec<BookKey>,
}

impl Author {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            books: vec![],
        }
    }
}

impl BookHolder for Author {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn books(&self) -> &[BookKey] {
        &self.books
    }

    fn add_book(&mut self, book: BookKey) {
        if !self.books.contains(&book) {
            self.books.push(book);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Publisher {
    pub name: String,
    books: Vec<BookKey>,
}

impl Publisher {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            books: vec![],
        }
    }
}

impl BookHolder for Publisher {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn books(&self) -> &[BookKey] {
        &self.books
    }

    fn add_book(&mut self, book: BookKey) {
        if !self.books.contains(&book) {
            self.books.push(book);
        }
    }
}

// Book is a catalog title with a number of physical copies. Copy counts and the
// reservation list only change through reserve and cancel_reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub year: i32,
    pub category: Option<String>,
    pub average_rating: f64,
    pub authors: Vec<AuthorId>,
    pub publisher: PublisherId,
    total_copies: u32,
    available_copies: u32,
    reservations: Vec<String>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(id: &str, isbn: &str, title: &str, year: i32, publisher: PublisherId, authors: Vec<AuthorId>,
               total_copies: u32, available_copies: u32) -> Self {
        Self {
            id: id.to_string(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            year,
            category: None,
            average_rating: 0.0,
            authors,
            publisher,
            total_copies,
            available_copies,
            reservations: vec![],
        }
    }

    pub fn with_reservations(mut self, reservations: &[String]) -> Self {
        self.reservations = reservations.to_vec();
        self
    }

    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    pub fn available_copies(&self) -> u32 {
        self.available_copies
    }

    pub fn reservations(&self) -> &[String] {
        &self.reservations
    }

    pub fn get_availability(&self) -> bool {
        self.available_copies > 0
    }

    pub fn is_reserved_by(&self, user: &str) -> bool {
        self.reservations.iter().any(|r| r == user)
    }

    // Takes one copy for the user. Refused when no copy is left or the user already holds one.
    pub fn reserve(&mut self, user: &str) -> bool {
        if self.available_copies == 0 || self.is_reserved_by(user) {
            return false;
        }
        self.reservations.push(user.to_string());
        self.available_copies -= 1;
        true
    }

    // Returns the user's copy. The counter never goes past total_copies, even when the
    // stored state was already inconsistent.
    pub fn cancel_reservation(&mut self, user: &str) -> bool {
        let Some(pos) = self.reservations.iter().position(|r| r == user) else {
            return false;
        };
        self.reservations.remove(pos);
        self.available_copies = (self.available_copies + 1).min(self.total_copies);
        true
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.id.to_string()
    }
}


#[cfg(test)]
mod tests {
    use crate::books::domain::BookHolder;
    use crate::books::domain::model::{Author, AuthorId, Book, BookKey, Publisher, PublisherId};

    fn dune(total: u32, available: u32) -> Book {
        Book::new("b1", "111", "Dune", 1965, PublisherId(0), vec![AuthorId(0)], total, available)
    }

    #[tokio::test]
    async fn test_should_build_book() {
        let book = dune(2, 2);
        assert_eq!("Dune", book.title.as_str());
        assert_eq!(None, book.category);
        assert_eq!(0.0, book.average_rating);
        assert!(book.reservations().is_empty());
        assert!(book.get_availability());
    }

    #[tokio::test]
    async fn test_should_reserve_and_cancel() {
        let mut book = dune(2, 2);
        let before = book.clone();
        assert!(book.reserve("alice"));
        assert_eq!(1, book.available_copies());
        assert_eq!(vec!["alice".to_string()], book.reservations().to_vec());
        assert!(book.cancel_reservation("alice"));
        assert_eq!(before, book);
    }

    #[tokio::test]
    async fn test_should_refuse_duplicate_reservation() {
        let mut book = dune(2, 2);
        assert!(book.reserve("alice"));
        let after_first = book.clone();
        assert!(!book.reserve("alice"));
        assert_eq!(after_first, book);
    }

    #[tokio::test]
    async fn test_should_refuse_reservation_without_copies() {
        let mut book = dune(1, 1);
        assert!(book.reserve("alice"));
        assert!(!book.get_availability());
        assert!(!book.reserve("bob"));
        assert_eq!(vec!["alice".to_string()], book.reservations().to_vec());
        assert_eq!(0, book.available_copies());
    }

    #[tokio::test]
    async fn test_should_refuse_unknown_cancellation() {
        let mut book = dune(2, 1).with_reservations(&["alice".to_string()]);
        let before = book.clone();
        assert!(!book.cancel_reservation("bob"));
        assert_eq!(before, book);
    }

    #[tokio::test]
    async fn test_should_clamp_cancellation_at_total() {
        let mut book = dune(2, 2).with_reservations(&["ghost".to_string()]);
        assert!(book.cancel_reservation("ghost"));
        assert_eq!(2, book.available_copies());
        assert!(book.reservations().is_empty());
    }

    #[tokio::test]
    async fn test_should_keep_copies_in_bounds() {
        let mut book = dune(3, 3);
        let users = ["a", "b", "c", "d", "a", "b"];
        for user in users {
            let _ = book.reserve(user);
            assert!(book.available_copies() <= book.total_copies());
        }
        for user in users {
            let _ = book.cancel_reservation(user);
            assert!(book.available_copies() <= book.total_copies());
        }
        assert_eq!(3, book.available_copies());
    }

    #[tokio::test]
    async fn test_should_add_books_once() {
        let mut author = Author::from_name("Frank Herbert");
        author.add_book(BookKey(0));
        author.add_book(BookKey(0));
        author.add_book(BookKey(1));
        assert_eq!(&[BookKey(0), BookKey(1)], author.books());

        let mut publisher = Publisher::from_name("Ace");
        publisher.add_book(BookKey(1));
        publisher.add_book(BookKey(1));
        assert_eq!(&[BookKey(1)], publisher.books());
    }

    #[tokio::test]
    async fn test_should_report_author_availability() {
        let mut author = Author::from_name("Frank Herbert");
        assert!(!author.get_availability(&[]));
        let arena = vec![dune(1, 0), dune(1, 1)];
        author.add_book(BookKey(0));
        assert!(!author.get_availability(&arena));
        author.add_book(BookKey(1));
        assert!(author.get_availability(&arena));
    }
}
