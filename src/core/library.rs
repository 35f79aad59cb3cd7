use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    // A persisted or submitted book record is missing a required field or carries
    // a value of the wrong type.
    MalformedRecord {
        message: String,
        field: Option<String>,
    },
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // The backing document could not be read or written. Nothing in the core
    // retries these.
    Storage {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn malformed(message: &str, field: Option<&str>) -> LibraryError {
        LibraryError::MalformedRecord { message: message.to_string(), field: field.map(str::to_string) }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn storage(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Storage { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    // true for failures of the backing document rather than of the request itself
    pub fn is_persistence(&self) -> bool {
        matches!(self, LibraryError::Storage { .. } | LibraryError::Serialization { .. })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::storage(
            format!("document io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::MalformedRecord { message, field } => {
                match field {
                    Some(field) => write!(f, "malformed record: {} (field `{}`)", message, field),
                    None => write!(f, "malformed record: {}", message),
                }
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Storage { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// SearchField selects which attributes of a book a search query is matched against.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default)]
pub enum SearchField {
    #[default]
    General,
    Title,
    Isbn,
    Author,
}

impl From<String> for SearchField {
    fn from(s: String) -> Self {
        SearchField::from(s.as_str())
    }
}

impl From<&str> for SearchField {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "title" => SearchField::Title,
            "isbn" => SearchField::Isbn,
            "author" => SearchField::Author,
            _ => SearchField::General,
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SearchField::General => write!(f, "general"),
            SearchField::Title => write!(f, "title"),
            SearchField::Isbn => write!(f, "isbn"),
            SearchField::Author => write!(f, "author"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, SearchField};

    #[tokio::test]
    async fn test_should_create_malformed_error() {
        let err = LibraryError::malformed("record 0 has no isbn", Some("isbn"));
        assert!(matches!(err, LibraryError::MalformedRecord{ message: _, field: Some(_) }));
        assert!(err.to_string().contains("`isbn`"));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_storage_error() {
        let err = LibraryError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(err, LibraryError::Storage{ message: _, reason_code: Some(_) }));
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        let err = LibraryError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(matches!(err, LibraryError::Serialization{ message: _ }));
        assert!(err.is_persistence());
        assert!(!LibraryError::not_found("test").is_persistence());
    }

    #[tokio::test]
    async fn test_should_parse_search_field() {
        let fields = vec![
            SearchField::General,
            SearchField::Title,
            SearchField::Isbn,
            SearchField::Author,
        ];
        for field in fields {
            let str = field.to_string();
            assert_eq!(field, SearchField::from(str));
        }
        assert_eq!(SearchField::Title, SearchField::from(" TITLE "));
        assert_eq!(SearchField::General, SearchField::from("publisher"));
    }
}
