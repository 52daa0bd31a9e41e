use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ParityError
pub type Result<T> = std::result::Result<T, ParityError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every failure the parity tooling can raise.
/// Parity violations are not errors and never appear here; they are
/// collected as values in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Usage
    InvalidInput,

    // Filesystem
    PathNotFound,
    NotADirectory,
    Io,

    // Documents
    DocumentNotFound,
    MalformedDocument,
    InvalidDocType,

    // Configuration
    DuplicateNormalizer,
    UnknownProfile,
    InvalidConfig,

    // Output
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::PathNotFound => "ERR_PATH_NOT_FOUND",
            ExErrorKind::NotADirectory => "ERR_NOT_A_DIRECTORY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::DocumentNotFound => "ERR_DOCUMENT_NOT_FOUND",
            ExErrorKind::MalformedDocument => "ERR_MALFORMED_DOCUMENT",
            ExErrorKind::InvalidDocType => "ERR_INVALID_DOC_TYPE",
            ExErrorKind::DuplicateNormalizer => "ERR_DUPLICATE_NORMALIZER",
            ExErrorKind::UnknownProfile => "ERR_UNKNOWN_PROFILE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used for logging and exit-code mapping plus
/// whatever context was known at the failure site.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    doc_type: Option<String>,
    path: Option<PathBuf>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            doc_type: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document type context
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the document type context, if any
    pub fn doc_type(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(doc_type) = &self.doc_type {
            write!(f, " (doc_type: {})", doc_type)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for parity runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParityError {
    // ===== Usage Errors =====
    /// Invalid invocation (bad flag value, conflicting options)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Path Errors =====
    /// A documents directory does not exist
    #[error("{role}-indexed documents path does not exist: {}", .path.display())]
    PathNotFound { role: String, path: PathBuf },

    /// A documents path exists but is not a directory
    #[error("{role}-indexed documents path is not a directory: {}", .path.display())]
    NotADirectory { role: String, path: PathBuf },

    /// Filesystem failure other than a missing path
    #[error("I/O error at {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    // ===== Document Errors =====
    /// No `<doc_type>.json` file in the directory
    #[error("Document not found for type '{doc_type}': {}", .path.display())]
    DocumentNotFound { doc_type: String, path: PathBuf },

    /// The document file is not valid JSON
    #[error("Malformed document for type '{doc_type}' at {}: {reason}", .path.display())]
    MalformedDocument {
        doc_type: String,
        path: PathBuf,
        reason: String,
    },

    /// A file name in a documents directory does not map to a single doc type
    #[error("Cannot derive a document type from file name '{file_name}': expected exactly one '.'")]
    InvalidDocType { file_name: String },

    // ===== Configuration Errors =====
    /// A normalizer was registered twice for the same doc type
    #[error("A normalizer is already registered for document type '{doc_type}'")]
    DuplicateNormalizer { doc_type: String },

    /// No built-in profile has this name
    #[error("Unknown profile '{name}'")]
    UnknownProfile { name: String },

    /// The overlay configuration file could not be used
    #[error("Invalid configuration in {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON/TOML encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ParityError {
    /// Build an `Io` error from a `std::io::Error` observed at `path`
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        ParityError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Conversion from ParityError to ExError
impl From<ParityError> for ExError {
    fn from(err: ParityError) -> Self {
        match err {
            ParityError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            ParityError::PathNotFound { role, path } => ExError::new(ExErrorKind::PathNotFound)
                .with_path(path)
                .with_message(format!("{}-indexed documents path does not exist", role)),

            ParityError::NotADirectory { role, path } => ExError::new(ExErrorKind::NotADirectory)
                .with_path(path)
                .with_message(format!("{}-indexed documents path is not a directory", role)),

            ParityError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),

            ParityError::DocumentNotFound { doc_type, path } => {
                ExError::new(ExErrorKind::DocumentNotFound)
                    .with_op("load_document")
                    .with_doc_type(doc_type)
                    .with_path(path)
                    .with_message("Document file not found")
            }

            ParityError::MalformedDocument {
                doc_type,
                path,
                reason,
            } => ExError::new(ExErrorKind::MalformedDocument)
                .with_op("load_document")
                .with_doc_type(doc_type)
                .with_path(path)
                .with_message(format!("Document is not valid JSON: {}", reason)),

            ParityError::InvalidDocType { file_name } => ExError::new(ExErrorKind::InvalidDocType)
                .with_op("list_doc_types")
                .with_message(format!(
                    "File name '{}' must contain exactly one '.'",
                    file_name
                )),

            ParityError::DuplicateNormalizer { doc_type } => {
                ExError::new(ExErrorKind::DuplicateNormalizer)
                    .with_op("register_normalizer")
                    .with_doc_type(doc_type)
                    .with_message("Normalizer already registered")
            }

            ParityError::UnknownProfile { name } => ExError::new(ExErrorKind::UnknownProfile)
                .with_message(format!("Unknown profile '{}'", name)),

            ParityError::InvalidConfig { path, reason } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("load_config")
                    .with_path(path)
                    .with_message(reason)
            }

            ParityError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ParityError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ParityError
impl From<serde_json::Error> for ParityError {
    fn from(err: serde_json::Error) -> Self {
        ParityError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to ParityError
impl From<toml::de::Error> for ParityError {
    fn from(err: toml::de::Error) -> Self {
        ParityError::Serialization {
            message: err.message().to_string(),
        }
    }
}
