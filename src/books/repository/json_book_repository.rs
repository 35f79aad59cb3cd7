use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Map, Value};

use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::store::DocumentStore;

const BOOKS_KEY: &str = "books";

// JsonBookRepository keeps the catalog as one JSON document of the form {"books": [...]}.
// Every write replaces the whole document; there is no locking between processes.
pub struct JsonBookRepository {
    store: Arc<dyn DocumentStore>,
}

impl JsonBookRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
        }
    }

    async fn read_document(&self) -> LibraryResult<Option<Map<String, Value>>> {
        let Some(contents) = self.store.read().await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(contents.as_str())? {
            Value::Object(doc) => Ok(Some(doc)),
            other => Err(LibraryError::serialization(
                format!("catalog document {} must be an object, found {}",
                        self.store.location(), type_name(&other)).as_str())),
        }
    }

    async fn write_document(&self, doc: &Map<String, Value>) -> LibraryResult<()> {
        let contents = render(doc)?;
        self.store.write(contents.as_str()).await
    }

    fn records_mut<'a>(&self, doc: &'a mut Map<String, Value>) -> LibraryResult<&'a mut Vec<Value>> {
        let location = self.store.location();
        match doc.entry(BOOKS_KEY).or_insert_with(|| json!([])) {
            Value::Array(records) => Ok(records),
            other => Err(LibraryError::serialization(
                format!("`books` in {} must be an array, found {}", location, type_name(other)).as_str())),
        }
    }
}

fn empty_document() -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert(BOOKS_KEY.to_string(), json!([]));
    doc
}

// four-space indentation, non-ASCII written as is
fn render(doc: &Map<String, Value>) -> LibraryResult<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|err| LibraryError::serialization(
        format!("catalog document is not utf-8 {}", err).as_str()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

#[async_trait]
impl BookRepository for JsonBookRepository {
    async fn load(&self) -> LibraryResult<Vec<BookDto>> {
        let Some(mut doc) = self.read_document().await? else {
            self.write_document(&empty_document()).await?;
            tracing::info!(location = self.store.location().as_str(), "initialized empty catalog document");
            return Ok(vec![]);
        };
        if !doc.contains_key(BOOKS_KEY) {
            return Ok(vec![]);
        }
        let records = self.records_mut(&mut doc)?;
        let mut ids = HashSet::new();
        let mut books = Vec::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            let book = BookDto::from_value(record).map_err(|err| match err {
                LibraryError::MalformedRecord { message, field } => LibraryError::MalformedRecord {
                    message: format!("book record #{} {}", pos, message),
                    field,
                },
                other => other,
            })?;
            if !ids.insert(book.id.clone()) {
                return Err(LibraryError::duplicate_key(
                    format!("book id {} appears more than once in {}", book.id, self.store.location()).as_str()));
            }
            books.push(book);
        }
        tracing::debug!(location = self.store.location().as_str(), books = books.len(), "loaded catalog document");
        Ok(books)
    }

    async fn register(&self, record: &BookDto) -> LibraryResult<BookDto> {
        record.validate_for_registration()?;
        let mut doc = self.read_document().await?.unwrap_or_else(empty_document);
        let records = self.records_mut(&mut doc)?;
        if records.iter().any(|r| record_id(r) == Some(record.id.as_str())) {
            return Err(LibraryError::duplicate_key(
                format!("book id {} already registered", record.id).as_str()));
        }
        records.push(serde_json::to_value(record)?);
        self.write_document(&doc).await?;
        Ok(record.clone())
    }

    async fn update_after_mutation(&self, book: &BookDto) -> LibraryResult<()> {
        let Some(mut doc) = self.read_document().await? else {
            return Err(LibraryError::not_found(
                format!("catalog document {} does not exist", self.store.location()).as_str()));
        };
        let records = self.records_mut(&mut doc)?;
        let Some(record) = records.iter_mut()
            .find(|r| record_id(r) == Some(book.id.as_str()))
            .and_then(Value::as_object_mut) else {
            return Err(LibraryError::not_found(
                format!("book {} not found in {}", book.id, self.store.location()).as_str()));
        };
        record.insert("available_copies".to_string(), json!(book.available_copies));
        record.insert("reservations".to_string(), json!(book.reservations));
        self.write_document(&doc).await
    }

    fn location(&self) -> String {
        self.store.location()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use crate::books::dto::BookDto;
    use crate::books::repository::BookRepository;
    use crate::books::repository::json_book_repository::JsonBookRepository;
    use crate::core::library::LibraryError;
    use crate::utils::store::{FileDocumentStore, MemoryDocumentStore};

    const DUNE: &str = r#"{"books": [{"id": "b1", "isbn": "111", "title": "Dune", "year": 1965,
        "publisher": "Ace", "authors": ["Frank Herbert"], "total_copies": 2, "available_copies": 2,
        "shelf": "A3"}]}"#;

    fn memory_repository(contents: Option<&str>) -> (JsonBookRepository, MemoryDocumentStore) {
        let store = contents.map(MemoryDocumentStore::with_contents).unwrap_or_default();
        (JsonBookRepository::new(Arc::new(store.clone())), store)
    }

    fn stored(store: &MemoryDocumentStore) -> Value {
        serde_json::from_str(store.contents().expect("should have document").as_str()).expect("should parse")
    }

    #[tokio::test]
    async fn test_should_initialize_missing_file() {
        let dir = TempDir::new().expect("should create dir");
        let path = dir.path().join("database.json");
        let repo = JsonBookRepository::new(Arc::new(FileDocumentStore::new(&path, true)));
        let books = repo.load().await.expect("should load");
        assert!(books.is_empty());
        let written: Value = serde_json::from_str(std::fs::read_to_string(&path).expect("should exist").as_str())
            .expect("should parse");
        assert_eq!(json!({"books": []}), written);
    }

    #[tokio::test]
    async fn test_should_load_records() {
        let (repo, store) = memory_repository(Some(DUNE));
        let books = repo.load().await.expect("should load");
        assert_eq!(1, books.len());
        assert_eq!("Dune", books[0].title.as_str());
        assert_eq!(0, store.write_count());
    }

    #[tokio::test]
    async fn test_should_treat_missing_books_key_as_empty() {
        let (repo, _) = memory_repository(Some("{}"));
        assert!(repo.load().await.expect("should load").is_empty());
    }

    #[tokio::test]
    async fn test_should_abort_load_on_malformed_record() {
        let (repo, _) = memory_repository(Some(r#"{"books": [
            {"id": "b1", "isbn": "111", "title": "Dune", "year": 1965, "publisher": "Ace", "total_copies": 2, "available_copies": 2},
            {"id": "b2", "isbn": "222", "title": "Emma", "publisher": "Murray", "total_copies": 1, "available_copies": 1}
        ]}"#));
        let res = repo.load().await;
        match res {
            Err(LibraryError::MalformedRecord { message, field }) => {
                assert!(message.contains("#1"));
                assert_eq!(Some("year".to_string()), field);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_ids_on_load() {
        let (repo, _) = memory_repository(Some(r#"{"books": [
            {"id": "b1", "isbn": "111", "title": "Dune", "year": 1965, "publisher": "Ace", "total_copies": 2, "available_copies": 2},
            {"id": "b1", "isbn": "222", "title": "Emma", "year": 1815, "publisher": "Murray", "total_copies": 1, "available_copies": 1}
        ]}"#));
        assert!(matches!(repo.load().await, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_fail_on_corrupt_document() {
        let (repo, _) = memory_repository(Some("{\"books\": ["));
        assert!(matches!(repo.load().await, Err(LibraryError::Serialization { .. })));
        let (repo, _) = memory_repository(Some("{\"books\": 3}"));
        assert!(matches!(repo.load().await, Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_register_record() {
        let (repo, store) = memory_repository(Some(DUNE));
        let record = BookDto::new("b2", "222", "Children of Dune", 1976, "Ace", &["Frank Herbert"], 1, 1);
        let saved = repo.register(&record).await.expect("should register");
        assert!(saved.reservations.is_empty());
        let doc = stored(&store);
        let books = doc["books"].as_array().expect("should be array");
        assert_eq!(2, books.len());
        assert_eq!(json!([]), books[1]["reservations"]);
        assert_eq!(None, books[1].get("category"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_registration() {
        let (repo, store) = memory_repository(Some(DUNE));
        let record = BookDto::new("b1", "999", "Other", 2000, "Ace", &[], 1, 1);
        assert!(matches!(repo.register(&record).await, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(0, store.write_count());
    }

    #[tokio::test]
    async fn test_should_update_copies_in_place() {
        let (repo, store) = memory_repository(Some(DUNE));
        let mut book = repo.load().await.expect("should load").remove(0);
        book.available_copies = 1;
        book.reservations = vec!["alice".to_string()];
        book.title = "ignored".to_string();
        repo.update_after_mutation(&book).await.expect("should update");
        let doc = stored(&store);
        assert_eq!(json!(1), doc["books"][0]["available_copies"]);
        assert_eq!(json!(["alice"]), doc["books"][0]["reservations"]);
        assert_eq!(json!("Dune"), doc["books"][0]["title"]);
        assert_eq!(json!("A3"), doc["books"][0]["shelf"]);
    }

    #[tokio::test]
    async fn test_should_not_update_unknown_book() {
        let (repo, store) = memory_repository(Some(DUNE));
        let book = BookDto::new("b9", "999", "Missing", 2000, "Ace", &[], 1, 1);
        assert!(matches!(repo.update_after_mutation(&book).await, Err(LibraryError::NotFound { .. })));
        assert_eq!(0, store.write_count());
    }

    #[tokio::test]
    async fn test_should_write_four_space_indent() {
        let (repo, store) = memory_repository(None);
        let record = BookDto::new("b1", "111", "Cem Anos de Solidão", 1967, "Record", &["Gabriel García Márquez"], 1, 1);
        let _ = repo.register(&record).await.expect("should register");
        let contents = store.contents().expect("should have document");
        assert!(contents.contains("\n    \"books\""));
        assert!(contents.contains("Solidão"));
    }
}
