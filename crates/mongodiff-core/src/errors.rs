use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in a capture run is fatal; the kind tells the operator
/// which class of problem stopped the run and maps to a stable code for
/// scripting against the tool's exit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidInput,

    // Database
    /// Server unreachable, handshake refused, or collection listing failed
    Connectivity,
    /// Cursor failure while iterating a collection
    Read,
    /// An `_id` that is neither an ObjectId nor a string
    UnsupportedIdentifier,
    /// A document without an `_id` field
    MissingIdentifier,
    /// A changed identifier could not be re-fetched at emission time
    DocumentMissing,

    // Output
    Render,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Connectivity => "ERR_CONNECTIVITY",
            ExErrorKind::Read => "ERR_READ",
            ExErrorKind::UnsupportedIdentifier => "ERR_UNSUPPORTED_IDENTIFIER",
            ExErrorKind::MissingIdentifier => "ERR_MISSING_IDENTIFIER",
            ExErrorKind::DocumentMissing => "ERR_DOCUMENT_MISSING",
            ExErrorKind::Render => "ERR_RENDER",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// `op` names the pipeline phase that failed (`list_collections`,
/// `collect_snapshot`, `fetch_document`, `write_artifacts`, ...), which is
/// what the operator sees first in the CLI's error line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    collection: Option<String>,
    identifier: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            collection: None,
            identifier: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation (pipeline phase) context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add collection name context
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Add document identifier context (canonical rendering)
    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }

    /// Add output file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
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

    /// Get the collection context, if any
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Get the identifier context, if any
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Get the output path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " {} failed", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        if let Some(identifier) = &self.identifier {
            write!(f, " (_id: {})", identifier)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the snapshot, diff and emission code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// `_id` holds a BSON type the tool cannot round-trip through scripts
    #[error("Can not handle identifier of type {type_name} in collection {collection}")]
    UnsupportedIdentifier {
        collection: String,
        type_name: String,
    },

    /// Document returned by the server carries no `_id`
    #[error("Document without _id in collection {collection}")]
    MissingIdentifier { collection: String },

    /// Not a 24 character hex rendering of a 12-byte object id
    #[error("Invalid object id hex: {value}")]
    InvalidObjectIdHex { value: String },

    /// Changed document was gone by the time it was re-fetched
    #[error("Document {identifier} no longer exists in collection {collection}")]
    DocumentMissing {
        collection: String,
        identifier: String,
    },

    /// Output prefix must name something
    #[error("Output prefix cannot be empty")]
    EmptyPrefix,

    /// Filename template referenced a placeholder the render context lacks
    #[error("Unknown placeholder {{{placeholder}}} in template {template}")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    /// Name that cannot be placed into a script line or a file name
    #[error("Cannot use {what} {name:?} in generated files: {reason}")]
    UnsafeName {
        what: String,
        name: String,
        reason: String,
    },

    /// JSON encoding failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from DiffError to ExError
impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        let message = err.to_string();
        match err {
            DiffError::UnsupportedIdentifier { collection, .. } => {
                ExError::new(ExErrorKind::UnsupportedIdentifier)
                    .with_collection(collection)
                    .with_message(message)
            }
            DiffError::MissingIdentifier { collection } => {
                ExError::new(ExErrorKind::MissingIdentifier)
                    .with_collection(collection)
                    .with_message(message)
            }
            DiffError::InvalidObjectIdHex { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            DiffError::DocumentMissing {
                collection,
                identifier,
            } => ExError::new(ExErrorKind::DocumentMissing)
                .with_op("fetch_document")
                .with_collection(collection)
                .with_identifier(identifier)
                .with_message(message),
            DiffError::EmptyPrefix => ExError::new(ExErrorKind::InvalidInput)
                .with_op("configure")
                .with_message(message),
            DiffError::UnknownPlaceholder { .. } => ExError::new(ExErrorKind::Render)
                .with_op("render_artifacts")
                .with_message(message),
            DiffError::UnsafeName { .. } => ExError::new(ExErrorKind::Render)
                .with_op("render_artifacts")
                .with_message(message),
            DiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Create an IO error for the given phase and path
pub fn io_error(op: &str, path: &std::path::Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_phase_and_context() {
        let err = ExError::new(ExErrorKind::Read)
            .with_op("collect_snapshot")
            .with_collection("users")
            .with_message("cursor killed");
        let text = err.to_string();
        assert_eq!(
            text,
            "[ERR_READ] collect_snapshot failed: cursor killed (collection: users)"
        );
    }

    #[test]
    fn test_document_missing_conversion_carries_identifier() {
        let err: ExError = DiffError::DocumentMissing {
            collection: "temp".to_string(),
            identifier: "\"abc\"".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::DocumentMissing);
        assert_eq!(err.op(), Some("fetch_document"));
        assert_eq!(err.collection(), Some("temp"));
        assert_eq!(err.identifier(), Some("\"abc\""));
    }

    #[test]
    fn test_unknown_placeholder_message_keeps_braces() {
        let err = DiffError::UnknownPlaceholder {
            template: "{nope}.sh".to_string(),
            placeholder: "nope".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown placeholder {nope} in template {nope}.sh"
        );
    }
}
