use std::collections::HashSet;
use std::fmt::Write;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// Required record fields with the JSON shape each one must have.
const REQUIRED_FIELDS: [(&str, FieldKind); 7] = [
    ("id", FieldKind::Text),
    ("isbn", FieldKind::Text),
    ("title", FieldKind::Text),
    ("year", FieldKind::Year),
    ("publisher", FieldKind::Text),
    ("total_copies", FieldKind::Count),
    ("available_copies", FieldKind::Count),
];

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Year,
    Count,
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Year => value.as_i64().map(|y| i32::try_from(y).is_ok()).unwrap_or(false),
            FieldKind::Count => value.as_u64().map(|c| u32::try_from(c).is_ok()).unwrap_or(false),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Year => "an integer year",
            FieldKind::Count => "a non-negative integer",
        }
    }
}

// BookDto is the persisted book record, and the shape handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub year: i32,
    pub publisher: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub total_copies: u32,
    pub available_copies: u32,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub reservations: Vec<String>,
}

impl BookDto {
    pub fn new(id: &str, isbn: &str, title: &str, year: i32, publisher: &str, authors: &[&str],
               total_copies: u32, available_copies: u32) -> Self {
        Self {
            id: id.to_string(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            year,
            publisher: publisher.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            total_copies,
            available_copies,
            average_rating: 0.0,
            category: None,
            reservations: vec![],
        }
    }

    // Parses one raw record, naming the offending field when a required one is absent or mistyped.
    pub fn from_value(value: &Value) -> LibraryResult<BookDto> {
        let Some(map) = value.as_object() else {
            return Err(LibraryError::malformed("book record is not an object", None));
        };
        for (field, kind) in REQUIRED_FIELDS {
            match map.get(field) {
                None | Some(Value::Null) => {
                    return Err(LibraryError::malformed("missing required field", Some(field)));
                }
                Some(v) if !kind.accepts(v) => {
                    return Err(LibraryError::malformed(
                        format!("expected {} but found {}", kind.expected(), v).as_str(), Some(field)));
                }
                _ => {}
            }
        }
        let record: BookDto = serde_json::from_value(value.clone())
            .map_err(|err| LibraryError::malformed(err.to_string().as_str(), None))?;
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        for (field, val) in [("id", &self.id), ("isbn", &self.isbn), ("title", &self.title), ("publisher", &self.publisher)] {
            if val.trim().is_empty() {
                return Err(LibraryError::malformed("required field is blank", Some(field)));
            }
        }
        if self.available_copies > self.total_copies {
            return Err(LibraryError::malformed(
                format!("available copies {} exceed total copies {}",
                        self.available_copies, self.total_copies).as_str(), Some("available_copies")));
        }
        Ok(())
    }

    // Stricter checks for new records. Stored records may already carry stray reservers,
    // and those are accepted on load.
    pub fn validate_for_registration(&self) -> LibraryResult<()> {
        self.validate()?;
        let on_loan = (self.total_copies - self.available_copies) as usize;
        if self.reservations.len() > on_loan {
            return Err(LibraryError::malformed(
                format!("{} reservations but only {} copies out",
                        self.reservations.len(), on_loan).as_str(), Some("reservations")));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.reservations.iter().find(|r| !seen.insert(r.as_str())) {
            return Err(LibraryError::malformed(
                format!("reserver {} listed twice", dup).as_str(), Some("reservations")));
        }
        Ok(())
    }

    pub fn get_availability(&self) -> bool {
        self.available_copies > 0
    }

    pub fn describe(&self) -> String {
        let mut out = String::new();
        let authors = if self.authors.is_empty() { "-".to_string() } else { self.authors.join(", ") };
        let _ = writeln!(out, "Title: {}", self.title);
        let _ = writeln!(out, "ISBN: {}", self.isbn);
        let _ = writeln!(out, "Authors: {}", authors);
        let _ = writeln!(out, "Year: {}", self.year);
        let _ = writeln!(out, "Publisher: {}", self.publisher);
        if let Some(category) = &self.category {
            let _ = writeln!(out, "Category: {}", category);
        }
        let _ = writeln!(out, "Copies: {} of {} available", self.available_copies, self.total_copies);
        let _ = writeln!(out, "Average rating: {:.2}", self.average_rating);
        if self.reservations.is_empty() {
            let _ = write!(out, "Reservations: none");
        } else {
            let _ = write!(out, "Reservations: {}", self.reservations.join(", "));
        }
        out
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

// AuthorDto summarizes an author and the books credited to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub name: String,
    pub book_ids: Vec<String>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherDto {
    pub name: String,
    pub book_ids: Vec<String>,
    pub available: bool,
}
