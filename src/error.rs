use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorType {
    #[error("InvalidKey")]
    InvalidKey,
    #[error("DuplicateKey")]
    DuplicateKey,
    #[error("InvalidCharacteristicType")]
    InvalidCharacteristicType,
    #[error("InvalidTimeout")]
    InvalidTimeout,
    #[error("InvalidProps")]
    InvalidProps,
    #[error("InvalidUuid")]
    InvalidUuid,
}

#[derive(Debug, Clone, Error)]
#[error("**HapDelegate {error_type} Error**\n\n\t{name}:\n\t\t{description}")]
pub struct Error {
    name: String,
    description: String,
    #[source]
    error_type: ErrorType,
}

impl Error {
    pub fn new<T: Into<String>>(name: T, description: T, error_type: ErrorType) -> Self {
        Error {
            name: name.into(),
            description: description.into(),
            error_type,
        }
    }

    pub fn from_type(error_type: ErrorType) -> Self {
        Error {
            name: error_type.to_string(),
            description: error_type.to_string(),
            error_type,
        }
    }

    pub fn from_string(error: String, error_type: ErrorType) -> Self {
        Error {
            name: error_type.to_string(),
            description: error,
            error_type,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_type_and_description() {
        let err = Error::new("timeoutMs", "7000: not in [500, 5000]", ErrorType::InvalidTimeout);
        let text = err.to_string();
        assert!(text.contains("InvalidTimeout"));
        assert!(text.contains("7000: not in [500, 5000]"));
        assert_eq!(err.error_type(), ErrorType::InvalidTimeout);
    }

    #[test]
    fn test_source_is_error_type() {
        let err = Error::from_type(ErrorType::DuplicateKey);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("DuplicateKey"));
    }
}
