//! Error types for sf-fieldgen.

/// Result type alias for sf-fieldgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for field generation.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns the record number the error points at, if it is tied to a row.
    pub fn record(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::MalformedRow { record, .. }
            | ErrorKind::Decode { record, .. }
            | ErrorKind::MissingObject { record }
            | ErrorKind::MissingFullName { record }
            | ErrorKind::InvalidName { record, .. } => Some(*record),
            _ => None,
        }
    }

    /// Returns the input line the offending row starts on, if known.
    pub fn line(&self) -> Option<u64> {
        match &self.kind {
            ErrorKind::MalformedRow { line, .. } | ErrorKind::Decode { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
///
/// Record numbers count the header as record 1, so the first data row is
/// record 2.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The input has no header row.
    #[error("Input is empty: no header row found")]
    EmptyInput,

    /// A header names a column that is not a recognized CustomField property.
    #[error("Unknown column '{name}' at position {position}")]
    UnknownColumn { name: String, position: usize },

    /// A header names the same column twice.
    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A required column is absent from the header.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A row has a different number of cells than the header.
    #[error(
        "Malformed row at record {record} (line {line}): expected {expected} cells, got {actual}"
    )]
    MalformedRow {
        record: usize,
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// A cell could not be decoded into its property's type.
    #[error("There is an unresolved issue with the value at record {record} (line {line}), column {column}: {message}")]
    Decode {
        record: usize,
        line: u64,
        column: String,
        message: String,
    },

    /// A row has no owning object.
    #[error("Missing owning object at record {record}")]
    MissingObject { record: usize },

    /// A row has no fullName.
    #[error("Missing fullName at record {record}")]
    MissingFullName { record: usize },

    /// An object or field name cannot be used as a path segment.
    #[error("Invalid name '{name}' at record {record}: names may not contain path separators or be '.' or '..'")]
    InvalidName { record: usize, name: String },

    /// The requested text encoding is not supported.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The input bytes are not valid in the requested encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Delimited text could not be read.
    #[error("CSV error: {0}")]
    Csv(String),

    /// XML could not be written.
    #[error("XML error: {0}")]
    Xml(String),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(String),
}

impl ErrorKind {
    /// Short stable name of the kind, used for machine-readable output.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "EmptyInput",
            ErrorKind::UnknownColumn { .. } => "UnknownColumn",
            ErrorKind::DuplicateColumn { .. } => "DuplicateColumn",
            ErrorKind::MissingColumn(_) => "MissingColumn",
            ErrorKind::MalformedRow { .. } => "MalformedRow",
            ErrorKind::Decode { .. } => "Decode",
            ErrorKind::MissingObject { .. } => "MissingObject",
            ErrorKind::MissingFullName { .. } => "MissingFullName",
            ErrorKind::InvalidName { .. } => "InvalidName",
            ErrorKind::UnsupportedEncoding(_) => "UnsupportedEncoding",
            ErrorKind::InvalidEncoding(_) => "InvalidEncoding",
            ErrorKind::Csv(_) => "Csv",
            ErrorKind::Xml(_) => "Xml",
            ErrorKind::Io(_) => "Io",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error {
            kind: ErrorKind::Csv(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = Error::new(ErrorKind::Decode {
            record: 3,
            line: 4,
            column: "valueSet".to_string(),
            message: "expected 4 parts".to_string(),
        });
        let text = err.to_string();
        assert!(text.contains("record 3 (line 4)"));
        assert!(text.contains("valueSet"));
        assert!(text.contains("expected 4 parts"));
        assert_eq!(err.record(), Some(3));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
        assert!(err.source.is_some());
        assert_eq!(err.line(), None);
        assert_eq!(err.kind.name(), "Io");
    }

    #[test]
    fn test_malformed_row_names_record_and_line() {
        let err = Error::new(ErrorKind::MalformedRow {
            record: 4,
            line: 7,
            expected: 5,
            actual: 3,
        });
        assert_eq!(err.record(), Some(4));
        assert_eq!(err.line(), Some(7));
        assert!(err.to_string().contains("expected 5 cells, got 3"));
    }
}
