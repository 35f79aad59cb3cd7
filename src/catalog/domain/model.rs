use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::books::domain::BookHolder;
use crate::books::domain::model::{Author, AuthorId, Book, BookKey, Publisher, PublisherId};
use crate::books::dto::{AuthorDto, BookDto, PublisherDto};
use crate::core::library::{LibraryError, LibraryResult};

pub type SharedCatalog = Arc<RwLock<Catalog>>;

// Catalog owns every book, author and publisher of one loaded document. Books refer to
// authors and publishers by id; authors and publishers refer back to books by key.
// The name registries are case-sensitive and only grow.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    authors: Vec<Author>,
    publishers: Vec<Publisher>,
    author_map: HashMap<String, AuthorId>,
    publisher_map: HashMap<String, PublisherId>,
    book_index: HashMap<String, BookKey>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Materializes records in document order. The first failing record aborts the build.
    pub fn from_records(records: &[BookDto]) -> LibraryResult<Self> {
        let mut catalog = Catalog::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, record: &BookDto) -> LibraryResult<BookKey> {
        record.validate()?;
        if self.book_index.contains_key(record.id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("book id {} already in catalog", record.id).as_str()));
        }
        let publisher = self.resolve_publisher(record.publisher.as_str());
        let authors: Vec<AuthorId> = record.authors.iter()
            .map(|name| self.resolve_author(name.as_str()))
            .collect();

        let key = BookKey(self.books.len());
        let mut book = Book::new(record.id.as_str(), record.isbn.as_str(), record.title.as_str(), record.year,
                                 publisher, authors.clone(), record.total_copies, record.available_copies)
            .with_reservations(&record.reservations);
        book.category = record.category.clone();
        book.average_rating = record.average_rating;

        self.publishers[publisher.0].add_book(key);
        for author in authors {
            self.authors[author.0].add_book(key);
        }
        self.book_index.insert(record.id.to_string(), key);
        self.books.push(book);
        Ok(key)
    }

    fn resolve_publisher(&mut self, name: &str) -> PublisherId {
        if let Some(id) = self.publisher_map.get(name) {
            return *id;
        }
        let id = PublisherId(self.publishers.len());
        self.publishers.push(Publisher::from_name(name));
        self.publisher_map.insert(name.to_string(), id);
        id
    }

    fn resolve_author(&mut self, name: &str) -> AuthorId {
        if let Some(id) = self.author_map.get(name) {
            return *id;
        }
        let id = AuthorId(self.authors.len());
        self.authors.push(Author::from_name(name));
        self.author_map.insert(name.to_string(), id);
        id
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<BookKey> {
        self.book_index.get(id).copied()
    }

    pub fn book(&self, key: BookKey) -> Option<&Book> {
        self.books.get(key.0)
    }

    // Swaps in a staged copy of an existing book. Identity fields must not change.
    pub(crate) fn commit(&mut self, key: BookKey, staged: Book) -> LibraryResult<()> {
        match self.books.get_mut(key.0) {
            Some(slot) if slot.id == staged.id => {
                *slot = staged;
                Ok(())
            }
            _ => Err(LibraryError::runtime(
                format!("staged book {} does not match catalog slot {}", staged.id, key.0).as_str(), None)),
        }
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn publishers(&self) -> &[Publisher] {
        &self.publishers
    }

    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id.0)
    }

    pub fn publisher(&self, id: PublisherId) -> Option<&Publisher> {
        self.publishers.get(id.0)
    }

    pub fn author_map(&self) -> &HashMap<String, AuthorId> {
        &self.author_map
    }

    pub fn publisher_map(&self) -> &HashMap<String, PublisherId> {
        &self.publisher_map
    }

    pub fn author_names<'a>(&'a self, book: &'a Book) -> impl Iterator<Item = &'a str> + 'a {
        book.authors.iter()
            .filter_map(|id| self.author(*id))
            .map(|author| author.name.as_str())
    }

    pub fn publisher_name<'a>(&'a self, book: &Book) -> &'a str {
        self.publisher(book.publisher).map(|p| p.name.as_str()).unwrap_or_default()
    }

    pub fn to_dto(&self, book: &Book) -> BookDto {
        BookDto {
            id: book.id.to_string(),
            isbn: book.isbn.to_string(),
            title: book.title.to_string(),
            year: book.year,
            publisher: self.publisher_name(book).to_string(),
            authors: self.author_names(book).map(str::to_string).collect(),
            total_copies: book.total_copies(),
            available_copies: book.available_copies(),
            average_rating: book.average_rating,
            category: book.category.clone(),
            reservations: book.reservations().to_vec(),
        }
    }

    pub fn describe(&self, book: &Book) -> String {
        self.to_dto(book).describe()
    }

    fn book_ids(&self, keys: &[BookKey]) -> Vec<String> {
        keys.iter().filter_map(|key| self.book(*key)).map(|b| b.id.to_string()).collect()
    }

    pub fn author_summaries(&self) -> Vec<AuthorDto> {
        self.authors.iter().map(|author| AuthorDto {
            name: author.name.to_string(),
            book_ids: self.book_ids(author.books()),
            available: author.get_availability(&self.books),
        }).collect()
    }

    pub fn publisher_summaries(&self) -> Vec<PublisherDto> {
        self.publishers.iter().map(|publisher| PublisherDto {
            name: publisher.name.to_string(),
            book_ids: self.book_ids(publisher.books()),
            available: publisher.get_availability(&self.books),
        }).collect()
    }
}
