use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Collection file not found: '{path}'")]
    FileNotFound { path: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Collection file is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Duplicate id {id} in collection")]
    DuplicateId { id: i64 },

    #[error("End of input reached")]
    EndOfInput,

    #[error("Input cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CollectionError {
    pub fn validation(errors: &[String]) -> Self {
        Self::ValidationError {
            message: errors.join("; "),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::FileNotFound { .. } => ErrorCategory::Io,
            Self::SerializationError(_)
            | Self::EncodingError(_)
            | Self::InvalidValueError { .. }
            | Self::ValidationError { .. }
            | Self::DuplicateId { .. } => ErrorCategory::Data,
            Self::TomlError(_) | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::EndOfInput | Self::Cancelled => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cancelled => ErrorSeverity::Low,
            Self::FileNotFound { .. } | Self::EndOfInput => ErrorSeverity::Medium,
            Self::SerializationError(_)
            | Self::EncodingError(_)
            | Self::InvalidValueError { .. }
            | Self::ValidationError { .. }
            | Self::DuplicateId { .. }
            | Self::TomlError(_)
            | Self::ConfigValidationError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => {
                "The collection starts empty; 'save' will create the file"
            }
            Self::SerializationError(_) => {
                "Make sure the file holds a JSON array of movies. An empty collection is []"
            }
            Self::EncodingError(_) => "Save the collection file as UTF-8",
            Self::InvalidValueError { .. }
            | Self::ValidationError { .. }
            | Self::DuplicateId { .. } => {
                "Fix or remove the offending elements in the collection file"
            }
            Self::TomlError(_) | Self::ConfigValidationError { .. } => {
                "Check the configuration file and arguments"
            }
            Self::IoError(_) => "Check that the file is accessible and the disk is writable",
            Self::EndOfInput | Self::Cancelled => "Enter the command again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!("Collection file not found: '{}'", path),
            Self::SerializationError(e) => format!("Collection file is not valid JSON: {}", e),
            Self::DuplicateId { id } => {
                format!("Collection file contains id {} more than once", id)
            }
            Self::EndOfInput => "No user input detected!".to_string(),
            Self::Cancelled => "Cancelled...".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_and_category() {
        assert!(CollectionError::Cancelled.severity() < CollectionError::EndOfInput.severity());
        let io = CollectionError::IoError(std::io::Error::other("disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_validation_joins_all_messages() {
        let err = CollectionError::validation(&["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation error: a; b");
        assert_eq!(err.category(), ErrorCategory::Data);
    }

    #[test]
    fn test_invalid_value_is_a_data_error() {
        let err = "PURPLE".parse::<crate::domain::model::Color>().unwrap_err();
        assert!(matches!(err, CollectionError::InvalidValueError { .. }));
        assert_eq!(err.category(), ErrorCategory::Data);

        let bytes = String::from_utf8(vec![b'[', 0xFF, b']']).unwrap_err();
        assert_eq!(CollectionError::from(bytes).category(), ErrorCategory::Data);
    }
}
