use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Storage {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::MalformedRecord { message, field } => {
                CommandError::Validation { message, reason_code: field }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Storage { message, reason_code } => {
                CommandError::Storage { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::DuplicateKey { message } => write!(f, "duplicate key: {}", message),
            CommandError::NotFound { message } => write!(f, "not found: {}", message),
            CommandError::Storage { message, .. } => write!(f, "storage failure: {}", message),
            CommandError::Runtime { message, .. } => write!(f, "runtime failure: {}", message),
            CommandError::Serialization { message } => write!(f, "invalid document: {}", message),
            CommandError::Validation { message, reason_code } => {
                match reason_code {
                    Some(code) => write!(f, "invalid input: {} ({})", message, code),
                    None => write!(f, "invalid input: {}", message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Storage { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_map_library_error() {
        let err = CommandError::from(LibraryError::malformed("no isbn", Some("isbn")));
        assert!(matches!(err, CommandError::Validation { message: _, reason_code: Some(ref code) } if code == "isbn"));
        let err = CommandError::from(LibraryError::not_found("b9"));
        assert!(matches!(err, CommandError::NotFound { .. }));
        assert_eq!("not found: b9", err.to_string());
    }
}
