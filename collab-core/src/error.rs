/// Top-level collab error type.
///
/// All fallible operations in `collab-core` return [`Result<T, CollabError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum CollabError {
    /// A graph mutation was rejected (duplicate or unknown keys).
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// A snapshot document could not be loaded.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from graph store mutations.
///
/// A mutation that returns one of these leaves the store unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An employee or chat identity with this key is already registered.
    #[error("Duplicate {entity}: {key}")]
    DuplicateKey {
        /// Which registry rejected the key (`employee` or `chat identity`).
        entity: &'static str,
        /// The rejected key.
        key: String,
    },

    /// The referenced employee id is not registered.
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    /// The referenced chat identity is not mapped to any employee.
    #[error("Unknown chat identity: {0}")]
    UnknownIdentity(String),
}

/// Errors while reading a snapshot document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document is unusable as a whole: not an object, or a required
    /// top-level array is missing.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A syntax error at a byte offset. Inside an array this only discards
    /// the current record.
    #[error("Syntax error at byte {offset}: {message}")]
    Syntax {
        /// Byte offset into the document text.
        offset: usize,
        /// Description of what the reader expected.
        message: String,
    },
}

/// Errors in collab configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem I/O error reading the configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, CollabError>`.
pub type Result<T> = std::result::Result<T, CollabError>;
